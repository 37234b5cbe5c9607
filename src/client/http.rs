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

//! HTTP client implementation for the Databricks SQL API.
//!
//! This module provides a thin wrapper around `reqwest` with:
//! - Bearer token authentication for API calls
//! - Unauthenticated requests for presigned URLs
//! - Configurable timeouts
//!
//! Failed responses are returned as errors immediately; there is no retry.

use crate::error::{Error, Result};
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Request, Response};
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Connection timeout duration.
    pub connect_timeout: Duration,
    /// Read timeout duration.
    pub read_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(60),
            user_agent: format!("databricks-sql-frame/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// HTTP client for communicating with Databricks SQL endpoints.
pub struct DatabricksHttpClient {
    client: Client,
    config: HttpClientConfig,
    access_token: String,
}

impl std::fmt::Debug for DatabricksHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabricksHttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DatabricksHttpClient {
    /// Creates a new HTTP client with the given configuration and access token.
    pub fn new(config: HttpClientConfig, access_token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.read_timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            config,
            access_token: access_token.into(),
        })
    }

    /// Wraps an already built reqwest client.
    #[cfg(test)]
    pub(crate) fn with_client(
        client: Client,
        config: HttpClientConfig,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            config,
            access_token: access_token.into(),
        }
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Returns the underlying reqwest client for building requests.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Get the authorization header value.
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Execute an authenticated API request.
    ///
    /// Attaches `Authorization: Bearer <token>` and
    /// `Content-Type: application/json`.
    pub async fn execute(&self, mut request: Request) -> Result<Response> {
        let auth = HeaderValue::from_str(&self.auth_header()).map_err(|e| {
            Error::InvalidArgument(format!("access token is not a valid header value: {}", e))
        })?;
        let headers = request.headers_mut();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        self.execute_impl(request).await
    }

    /// Execute a request without authentication (for presigned URLs).
    ///
    /// Presigned URLs embed their own temporary credentials; sending the
    /// workspace token along with them is rejected by the storage service.
    pub async fn execute_without_auth(&self, request: Request) -> Result<Response> {
        self.execute_impl(request).await
    }

    async fn execute_impl(&self, request: Request) -> Result<Response> {
        let method = request.method().clone();
        debug!("Executing {} {}", method, redact_query(request.url()));

        let response = self.client.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(Error::Http {
            status: status.as_u16(),
            body: error_body,
        })
    }
}

/// Presigned URLs carry credentials in the query string; keep them out of logs.
fn redact_query(url: &reqwest::Url) -> String {
    let mut shown = url.clone();
    if shown.query().is_some() {
        shown.set_query(Some("redacted"));
    }
    shown.to_string()
}
