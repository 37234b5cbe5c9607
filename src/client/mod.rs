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

//! Client implementations for communicating with Databricks SQL endpoints.
//!
//! This module provides:
//! - `DatabricksClient` trait: the transport seam used by the statement
//!   executor and the result readers
//! - `DatabricksHttpClient`: low-level HTTP client with bearer authentication
//! - `SeaClient`: implementation using the Statement Execution API (REST)

pub mod http;
pub mod sea;

use crate::error::Result;
use crate::types::sea::{ExecuteStatementRequest, ResultData, StatementExecutionResponse};
use async_trait::async_trait;

pub use http::{DatabricksHttpClient, HttpClientConfig};
pub use sea::{RequestTarget, SeaClient};

/// Transport operations needed to run one statement to completion.
///
/// Every call is a single request/response; implementations must not retry.
#[async_trait]
pub trait DatabricksClient: Send + Sync + std::fmt::Debug {
    /// Submit a statement (authenticated POST to the statements endpoint).
    async fn submit_statement(
        &self,
        request: &ExecuteStatementRequest,
    ) -> Result<StatementExecutionResponse>;

    /// Poll statement status by id (authenticated GET).
    async fn get_statement_status(&self, statement_id: &str)
        -> Result<StatementExecutionResponse>;

    /// Fetch the chunk behind a server-relative `next_chunk_internal_link`
    /// (authenticated GET).
    async fn get_next_chunk(&self, internal_link: &str) -> Result<ResultData>;

    /// Download the raw body behind a presigned URL (unauthenticated GET).
    async fn fetch_external_link(&self, url: &str) -> Result<Vec<u8>>;
}
