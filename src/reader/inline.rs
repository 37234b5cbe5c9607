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

//! Reader for `INLINE` results paginated through internal links.

use crate::client::DatabricksClient;
use crate::error::{Error, Result};
use crate::frame::{DataFrame, FrameBuilder};
use crate::types::sea::ResultManifest;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Follows `next_chunk_internal_link` until a chunk carries no further link.
///
/// Unlike external links, inline chunks are:
/// - Fetched with the workspace token
/// - Returned as a `ResultData` object whose `data_array` holds the rows
#[derive(Debug)]
pub struct InlineChunkReader<'a> {
    client: Arc<dyn DatabricksClient>,
    manifest: &'a ResultManifest,
}

impl<'a> InlineChunkReader<'a> {
    pub fn new(client: Arc<dyn DatabricksClient>, manifest: &'a ResultManifest) -> Self {
        Self { client, manifest }
    }

    /// Collect `first_chunk` and every following chunk, then promote once.
    pub async fn read(
        &self,
        first_chunk: Vec<Vec<JsonValue>>,
        mut next_link: Option<String>,
    ) -> Result<DataFrame> {
        let mut builder = FrameBuilder::new(&self.manifest.column_names());
        builder.push_rows(&first_chunk)?;
        let mut chunks = 1usize;

        while let Some(link) = next_link.take() {
            tracing::debug!("Fetching inline chunk {} from {}", chunks, link);

            let chunk = self.client.get_next_chunk(&link).await?;
            let rows = chunk.data_array.ok_or_else(|| {
                Error::UnexpectedFormat(format!("chunk at {} carries no data_array", link))
            })?;

            builder.push_rows(&rows)?;
            next_link = chunk.next_chunk_internal_link;
            chunks += 1;
        }

        tracing::debug!(
            "Read {} inline chunks, {} total rows",
            chunks,
            builder.num_rows()
        );
        Ok(builder.finish())
    }
}
