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

//! Result readers that turn a completed statement into a [`DataFrame`].
//!
//! This module provides:
//! - `ResultMaterializer`: picks the inline or external-link path
//! - `inline`: follows `next_chunk_internal_link` pagination
//! - `external`: downloads presigned links in server order
//!
//! Chunks are fetched one at a time and their raw cells collected; columns
//! are promoted once after the last chunk. The manifest of the completed
//! statement is reused for every chunk; continuation responses do not
//! repeat it.

pub mod external;
pub mod inline;

use crate::client::DatabricksClient;
use crate::error::Result;
use crate::frame::DataFrame;
use crate::statement::{CompletedStatement, StatementResult};
use crate::types::link::PresignedLink;
use crate::types::sea::ResultManifest;
use serde_json::Value as JsonValue;
use std::sync::Arc;

pub use external::ExternalLinkReader;
pub use inline::InlineChunkReader;

/// Build a frame from one chunk of rows against the manifest's columns.
pub fn rows_to_frame(rows: &[Vec<JsonValue>], manifest: &ResultManifest) -> Result<DataFrame> {
    DataFrame::from_rows(rows, &manifest.column_names())
}

/// Converts completed statements into frames.
#[derive(Debug, Clone)]
pub struct ResultMaterializer {
    client: Arc<dyn DatabricksClient>,
}

impl ResultMaterializer {
    pub fn new(client: Arc<dyn DatabricksClient>) -> Self {
        Self { client }
    }

    /// Materialize whichever result shape the statement produced.
    pub async fn materialize(&self, completed: CompletedStatement) -> Result<DataFrame> {
        let CompletedStatement {
            statement_id,
            manifest,
            result,
        } = completed;

        match result {
            StatementResult::Inline {
                rows,
                next_chunk_internal_link,
            } => {
                tracing::info!(
                    "Using inline reader for statement {:?}: {} rows in first chunk",
                    statement_id,
                    rows.len()
                );
                self.from_inline(rows, next_chunk_internal_link, &manifest)
                    .await
            }
            StatementResult::ExternalLinks {
                links,
                next_chunk_internal_link,
            } => {
                tracing::info!(
                    "Using external link reader for statement {:?}: {} links",
                    statement_id,
                    links.len()
                );
                self.from_external_links(&links, next_chunk_internal_link, &manifest)
                    .await
            }
        }
    }

    /// Build from the first inline chunk, then follow pagination links.
    pub async fn from_inline(
        &self,
        first_chunk: Vec<Vec<JsonValue>>,
        next_chunk_internal_link: Option<String>,
        manifest: &ResultManifest,
    ) -> Result<DataFrame> {
        InlineChunkReader::new(self.client.clone(), manifest)
            .read(first_chunk, next_chunk_internal_link)
            .await
    }

    /// Download each link in order and collect its rows.
    pub async fn from_external_links(
        &self,
        links: &[PresignedLink],
        next_chunk_internal_link: Option<String>,
        manifest: &ResultManifest,
    ) -> Result<DataFrame> {
        ExternalLinkReader::new(self.client.clone(), manifest)
            .read(links, next_chunk_internal_link)
            .await
    }
}
