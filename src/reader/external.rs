// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Reader for `EXTERNAL_LINKS` results.
//!
//! Each presigned link resolves to a JSON array of rows. Links are downloaded
//! strictly in the order the server listed them; expiration never reorders
//! them. When the payload also carries a `next_chunk_internal_link`, the
//! reader follows it for the next batch of links.

use crate::client::DatabricksClient;
use crate::error::{Error, Result};
use crate::frame::{DataFrame, FrameBuilder};
use crate::types::link::PresignedLink;
use crate::types::sea::ResultManifest;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Downloads presigned links one at a time and collects their rows.
#[derive(Debug)]
pub struct ExternalLinkReader<'a> {
    client: Arc<dyn DatabricksClient>,
    manifest: &'a ResultManifest,
}

impl<'a> ExternalLinkReader<'a> {
    pub fn new(client: Arc<dyn DatabricksClient>, manifest: &'a ResultManifest) -> Self {
        Self { client, manifest }
    }

    pub async fn read(
        &self,
        links: &[PresignedLink],
        mut next_link: Option<String>,
    ) -> Result<DataFrame> {
        let mut builder = FrameBuilder::new(&self.manifest.column_names());
        let mut fetched = 0usize;

        for link in links {
            builder.push_rows(&self.read_link(link).await?)?;
            fetched += 1;
        }

        while let Some(internal_link) = next_link.take() {
            let chunk = self.client.get_next_chunk(&internal_link).await?;
            let more: Vec<PresignedLink> = chunk
                .external_links
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(PresignedLink::from_external_link)
                .collect();

            tracing::debug!(
                "Fetched {} more links from {}",
                more.len(),
                internal_link
            );

            for link in &more {
                builder.push_rows(&self.read_link(link).await?)?;
                fetched += 1;
            }
            next_link = chunk.next_chunk_internal_link;
        }

        tracing::debug!(
            "Read {} external links, {} total rows",
            fetched,
            builder.num_rows()
        );
        Ok(builder.finish())
    }

    async fn read_link(&self, link: &PresignedLink) -> Result<Vec<Vec<JsonValue>>> {
        if link.is_expired() {
            tracing::warn!(
                "External link for chunk {:?} expired at {:?}; fetching anyway",
                link.chunk_index,
                link.expiration
            );
        }

        let body = self.client.fetch_external_link(&link.url).await?;
        let rows: Vec<Vec<JsonValue>> = serde_json::from_slice(&body).map_err(|e| {
            Error::json(
                format!("external link for chunk {:?}", link.chunk_index),
                e,
            )
        })?;

        Ok(rows)
    }
}
