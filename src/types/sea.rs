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

//! SEA (Statement Execution API) request/response types.
//!
//! These types map directly to the JSON structures used by the Databricks
//! SQL Statement Execution API with the `JSON_ARRAY` result format.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// How the server should deliver result data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Disposition {
    /// Rows are embedded in the response, paginated via internal links.
    Inline,
    /// Rows are stored in cloud storage and exposed as presigned URLs.
    ExternalLinks,
}

/// Serialization format of result rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Format {
    #[default]
    JsonArray,
}

/// Request body for statement execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecuteStatementRequest {
    pub warehouse_id: String,
    pub statement: String,
    pub catalog: String,
    pub schema: String,
    pub disposition: Disposition,
    pub format: Format,
}

impl ExecuteStatementRequest {
    /// Returns a copy of this request with a different disposition.
    pub fn with_disposition(&self, disposition: Disposition) -> Self {
        Self {
            disposition,
            ..self.clone()
        }
    }
}

/// Response from statement execution or status polling.
#[derive(Debug, Clone, Deserialize)]
pub struct StatementExecutionResponse {
    #[serde(default)]
    pub statement_id: Option<String>,
    pub status: StatementStatus,
    #[serde(default)]
    pub manifest: Option<ResultManifest>,
    #[serde(default)]
    pub result: Option<ResultData>,
}

/// Status of a statement execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementStatus {
    pub state: StatementState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ServiceError>,
}

/// Possible states of a statement during execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatementState {
    Pending,
    Running,
    Succeeded,
    Failed,
    Canceled,
    Closed,
    /// Any state this client does not know about.
    #[serde(other)]
    Unknown,
}

impl StatementState {
    /// Returns `true` while the warehouse is still working on the statement.
    pub fn is_in_progress(self) -> bool {
        matches!(self, Self::Pending | Self::Running)
    }
}

/// Error information from the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Manifest describing the result set structure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultManifest {
    #[serde(default)]
    pub format: Option<Format>,
    pub schema: ResultSchema,
    #[serde(default)]
    pub total_chunk_count: Option<i64>,
    #[serde(default)]
    pub total_row_count: Option<i64>,
    #[serde(default)]
    pub truncated: bool,
}

impl ResultManifest {
    /// Builds a manifest from bare column names.
    pub fn from_column_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<ColumnInfo> = names
            .into_iter()
            .enumerate()
            .map(|(position, name)| ColumnInfo {
                name: name.into(),
                type_name: None,
                type_text: None,
                position: Some(position as i32),
            })
            .collect();

        Self {
            format: Some(Format::JsonArray),
            schema: ResultSchema {
                column_count: Some(columns.len() as i32),
                columns,
            },
            total_chunk_count: None,
            total_row_count: None,
            truncated: false,
        }
    }

    /// Column names in manifest order.
    pub fn column_names(&self) -> Vec<&str> {
        self.schema
            .columns
            .iter()
            .map(|column| column.name.as_str())
            .collect()
    }
}

/// Schema of the result set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultSchema {
    #[serde(default)]
    pub column_count: Option<i32>,
    #[serde(default)]
    pub columns: Vec<ColumnInfo>,
}

/// Information about a single column in the result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub type_text: Option<String>,
    #[serde(default)]
    pub position: Option<i32>,
}

/// Result data from the initial response or from a chunk fetch.
///
/// Chunk fetches through `next_chunk_internal_link` return this object at the
/// top level of the body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResultData {
    #[serde(default)]
    pub chunk_index: Option<i64>,
    #[serde(default)]
    pub row_offset: Option<i64>,
    #[serde(default)]
    pub row_count: Option<i64>,
    #[serde(default)]
    pub next_chunk_index: Option<i64>,
    #[serde(default)]
    pub next_chunk_internal_link: Option<String>,
    #[serde(default)]
    pub data_array: Option<Vec<Vec<JsonValue>>>,
    #[serde(default)]
    pub external_links: Option<Vec<ExternalLink>>,
}

/// Presigned link to one chunk of an `EXTERNAL_LINKS` result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExternalLink {
    pub external_link: String,
    /// ISO 8601 timestamp.
    #[serde(default)]
    pub expiration: Option<String>,
    #[serde(default)]
    pub chunk_index: Option<i64>,
    #[serde(default)]
    pub row_count: Option<i64>,
    #[serde(default)]
    pub next_chunk_index: Option<i64>,
}
