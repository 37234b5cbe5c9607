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

//! Statement lifecycle: submit, poll, escalate, classify.
//!
//! ```text
//!   submit(INLINE) -> PENDING/RUNNING --poll--> ... -> terminal
//!     FAILED     -> submit(EXTERNAL_LINKS) -> poll -> terminal   (once)
//!     SUCCEEDED  -> inline rows | external links | unexpected format
//!     otherwise  -> StatementFailed
//! ```

use crate::client::DatabricksClient;
use crate::descriptor::ConnectionDescriptor;
use crate::error::{Error, Result};
use crate::frame::DataFrame;
use crate::reader::ResultMaterializer;
use crate::types::link::PresignedLink;
use crate::types::sea::{
    Disposition, ExecuteStatementRequest, Format, ResultManifest, StatementExecutionResponse,
    StatementState,
};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default wait between status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Polling behavior of the statement executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// Interval between status polls.
    pub poll_interval: Duration,
    /// Maximum number of status polls per submission. `None` polls forever.
    pub max_poll_attempts: Option<u32>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_poll_attempts: None,
        }
    }
}

/// Result payload of a SUCCEEDED statement, by disposition.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementResult {
    /// First chunk of rows, with a link to the next chunk if there is one.
    Inline {
        rows: Vec<Vec<JsonValue>>,
        next_chunk_internal_link: Option<String>,
    },
    /// Presigned links in server order, with a link to further links if any.
    ExternalLinks {
        links: Vec<PresignedLink>,
        next_chunk_internal_link: Option<String>,
    },
}

/// A statement that finished successfully, ready to be materialized.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedStatement {
    pub statement_id: Option<String>,
    /// Captured once and reused for every chunk and link.
    pub manifest: ResultManifest,
    pub result: StatementResult,
}

impl CompletedStatement {
    /// Classify a SUCCEEDED response by the shape of its payload.
    pub fn from_response(response: StatementExecutionResponse) -> Result<Self> {
        let statement_id = response.statement_id;
        let manifest = response.manifest.ok_or_else(|| {
            Error::UnexpectedFormat(format!(
                "statement {:?} succeeded without a result manifest",
                statement_id
            ))
        })?;
        let data = response.result.unwrap_or_default();

        let result = if let Some(rows) = data.data_array {
            StatementResult::Inline {
                rows,
                next_chunk_internal_link: data.next_chunk_internal_link,
            }
        } else if let Some(links) = data.external_links {
            StatementResult::ExternalLinks {
                links: links.iter().map(PresignedLink::from_external_link).collect(),
                next_chunk_internal_link: data.next_chunk_internal_link,
            }
        } else {
            return Err(Error::UnexpectedFormat(format!(
                "statement {:?} succeeded but the result has neither data_array nor external_links",
                statement_id
            )));
        };

        Ok(Self {
            statement_id,
            manifest,
            result,
        })
    }
}

/// Runs one statement at a time to completion against a SQL warehouse.
#[derive(Debug, Clone)]
pub struct StatementExecutor {
    client: Arc<dyn DatabricksClient>,
    descriptor: Arc<ConnectionDescriptor>,
    config: PollConfig,
}

impl StatementExecutor {
    pub fn new(
        client: Arc<dyn DatabricksClient>,
        descriptor: Arc<ConnectionDescriptor>,
        config: PollConfig,
    ) -> Self {
        Self {
            client,
            descriptor,
            config,
        }
    }

    pub fn descriptor(&self) -> &ConnectionDescriptor {
        &self.descriptor
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Build a fresh request for `sql` against the descriptor's warehouse.
    pub fn build_request(&self, sql: &str, disposition: Disposition) -> ExecuteStatementRequest {
        ExecuteStatementRequest {
            warehouse_id: self.descriptor.warehouse_id().to_string(),
            statement: sql.to_string(),
            catalog: self.descriptor.catalog().to_string(),
            schema: self.descriptor.schema().to_string(),
            disposition,
            format: Format::JsonArray,
        }
    }

    /// Execute `sql` and materialize the result.
    pub async fn query(&self, sql: &str) -> Result<DataFrame> {
        let completed = self.execute(sql).await?;
        ResultMaterializer::new(self.client.clone())
            .materialize(completed)
            .await
    }

    /// Execute `sql` until it reaches a terminal state.
    ///
    /// A FAILED INLINE attempt is resubmitted once with EXTERNAL_LINKS. Any
    /// other terminal state, or a second failure, is returned as
    /// [`Error::StatementFailed`].
    pub async fn execute(&self, sql: &str) -> Result<CompletedStatement> {
        let request = self.build_request(sql, Disposition::Inline);
        let mut response = self.submit_and_wait(&request).await?;

        if response.status.state == StatementState::Failed {
            warn!(
                "Statement {:?} failed with INLINE disposition ({:?}), retrying with EXTERNAL_LINKS",
                response.statement_id,
                response.status.error.as_ref().and_then(|e| e.message.as_deref())
            );
            let escalated = request.with_disposition(Disposition::ExternalLinks);
            response = self.submit_and_wait(&escalated).await?;
        }

        if response.status.state != StatementState::Succeeded {
            return Err(Error::StatementFailed {
                statement_id: response.statement_id,
                state: response.status.state,
                status: response.status,
            });
        }

        let completed = CompletedStatement::from_response(response)?;
        info!(
            "Statement {:?} succeeded with {} columns ({})",
            completed.statement_id,
            completed.manifest.schema.columns.len(),
            match completed.result {
                StatementResult::Inline { .. } => "inline",
                StatementResult::ExternalLinks { .. } => "external links",
            }
        );
        Ok(completed)
    }

    /// Submit `request` and poll until the statement leaves PENDING/RUNNING.
    pub async fn submit_and_wait(
        &self,
        request: &ExecuteStatementRequest,
    ) -> Result<StatementExecutionResponse> {
        let response = self.client.submit_statement(request).await?;
        self.wait_for_completion(response).await
    }

    /// Wait for statement to complete, polling status.
    ///
    /// Issues exactly one status request per in-progress response observed,
    /// sleeping `poll_interval` before each.
    pub async fn wait_for_completion(
        &self,
        response: StatementExecutionResponse,
    ) -> Result<StatementExecutionResponse> {
        if !response.status.state.is_in_progress() {
            return Ok(response);
        }

        let statement_id = response.statement_id.clone().ok_or_else(|| {
            Error::UnexpectedFormat(format!(
                "statement is {:?} but the response carries no statement_id",
                response.status.state
            ))
        })?;

        let mut current = response;
        let mut attempts: u32 = 0;
        while current.status.state.is_in_progress() {
            if let Some(max) = self.config.max_poll_attempts {
                if attempts >= max {
                    return Err(Error::PollLimitExceeded {
                        statement_id,
                        attempts,
                    });
                }
            }

            tokio::time::sleep(self.config.poll_interval).await;
            attempts = attempts.saturating_add(1);

            debug!("Polling statement status: {} (poll {})", statement_id, attempts);
            current = self.client.get_statement_status(&statement_id).await?;
            if current.statement_id.is_none() {
                current.statement_id = Some(statement_id.clone());
            }
        }

        debug!(
            "Statement {} reached {:?} after {} polls",
            statement_id, current.status.state, attempts
        );
        Ok(current)
    }
}
