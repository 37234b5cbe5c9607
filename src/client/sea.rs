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

//! SEA (Statement Execution API) client implementation.
//!
//! This module implements the `DatabricksClient` trait on top of
//! `DatabricksHttpClient` using the REST endpoints under
//! `/api/2.0/sql/statements`.

use crate::client::{DatabricksClient, DatabricksHttpClient};
use crate::descriptor::ConnectionDescriptor;
use crate::error::{Error, Result};
use crate::types::sea::{ExecuteStatementRequest, ResultData, StatementExecutionResponse};
use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Longest slice of a response body quoted in a parse error.
const BODY_EXCERPT_CHARS: usize = 512;

/// Where an authenticated request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestTarget<'a> {
    /// The statements endpoint itself (submission).
    Submit,
    /// Status of one statement.
    Status(&'a str),
    /// A server-relative pagination link.
    NextChunk(&'a str),
}

impl RequestTarget<'_> {
    /// Resolve this target to an absolute URL.
    pub fn url(&self, descriptor: &ConnectionDescriptor) -> String {
        match self {
            Self::Submit => descriptor.statements_url(),
            Self::Status(statement_id) => descriptor.statement_url(statement_id),
            Self::NextChunk(link) => descriptor.chunk_url(link),
        }
    }
}

/// SEA client for the Databricks SQL Statement Execution API.
#[derive(Debug)]
pub struct SeaClient {
    http_client: Arc<DatabricksHttpClient>,
    descriptor: Arc<ConnectionDescriptor>,
}

impl SeaClient {
    /// Create a new SEA client.
    pub fn new(
        http_client: Arc<DatabricksHttpClient>,
        descriptor: Arc<ConnectionDescriptor>,
    ) -> Self {
        Self {
            http_client,
            descriptor,
        }
    }

    /// Issue an authenticated request and decode the JSON response body.
    pub async fn request<T, B>(
        &self,
        method: Method,
        target: RequestTarget<'_>,
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = target.url(&self.descriptor);

        let mut builder = self.http_client.inner().request(method, &url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let request = builder.build()?;

        let response = self.http_client.execute(request).await?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            Error::json(
                format!("response from {} (body: {})", url, body_excerpt(&body)),
                e,
            )
        })
    }
}

fn body_excerpt(body: &str) -> String {
    match body.char_indices().nth(BODY_EXCERPT_CHARS) {
        Some((end, _)) => format!("{}... ({} bytes total)", &body[..end], body.len()),
        None => body.to_string(),
    }
}

#[async_trait]
impl DatabricksClient for SeaClient {
    async fn submit_statement(
        &self,
        request: &ExecuteStatementRequest,
    ) -> Result<StatementExecutionResponse> {
        debug!(
            "Submitting statement with disposition {:?}: {}",
            request.disposition, request.statement
        );

        let response: StatementExecutionResponse = self
            .request(Method::POST, RequestTarget::Submit, Some(request))
            .await?;

        debug!(
            "Execute response: statement_id={:?}, status={:?}",
            response.statement_id, response.status.state
        );

        Ok(response)
    }

    async fn get_statement_status(
        &self,
        statement_id: &str,
    ) -> Result<StatementExecutionResponse> {
        let response: StatementExecutionResponse = self
            .request(Method::GET, RequestTarget::Status(statement_id), None::<&()>)
            .await?;

        debug!(
            "Status response: statement_id={:?}, status={:?}",
            response.statement_id, response.status.state
        );

        Ok(response)
    }

    async fn get_next_chunk(&self, internal_link: &str) -> Result<ResultData> {
        let chunk: ResultData = self
            .request(Method::GET, RequestTarget::NextChunk(internal_link), None::<&()>)
            .await?;

        debug!(
            "Chunk response: chunk_index={:?}, rows={:?}, has_next={}",
            chunk.chunk_index,
            chunk.data_array.as_ref().map(Vec::len),
            chunk.next_chunk_internal_link.is_some()
        );

        Ok(chunk)
    }

    async fn fetch_external_link(&self, url: &str) -> Result<Vec<u8>> {
        let request = self.http_client.inner().get(url).build()?;

        let response = self.http_client.execute_without_auth(request).await?;
        let bytes = response.bytes().await?;

        debug!("Downloaded {} bytes from external link", bytes.len());

        Ok(bytes.to_vec())
    }
}
