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

//! Error types for the statement client.
//!
//! Every failure is surfaced to the caller; nothing is retried or swallowed
//! apart from the single disposition escalation in `statement`.

use crate::types::sea::{StatementState, StatementStatus};
use thiserror::Error;

/// Errors produced while submitting statements or materializing results.
#[derive(Debug, Error)]
pub enum Error {
    /// The server answered with a non-success HTTP status.
    #[error("HTTP {status} - {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response (connect, timeout, TLS, ...).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A response body could not be decoded.
    #[error("Failed to parse {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The statement finished in a state other than SUCCEEDED.
    #[error("Statement {} finished in state {state:?}: {}", .statement_id.as_deref().unwrap_or("<unknown>"), render_status(.status))]
    StatementFailed {
        statement_id: Option<String>,
        state: StatementState,
        status: StatementStatus,
    },

    /// The statement succeeded but the payload has neither inline data nor external links.
    #[error("Unexpected result format: {0}")]
    UnexpectedFormat(String),

    /// Result rows do not line up with the manifest.
    #[error("Failed to materialize result: {0}")]
    Materialization(String),

    /// Polling hit the configured attempt ceiling.
    #[error("Statement {statement_id} still running after {attempts} status polls")]
    PollLimitExceeded { statement_id: String, attempts: u32 },

    /// Configuration was missing or malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The blocking facade could not start its runtime.
    #[error("Failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error(transparent)]
    Arrow(#[from] arrow_schema::ArrowError),
}

impl Error {
    pub(crate) fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    /// Returns `true` for errors raised by the HTTP layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::Request(_))
    }
}

fn render_status(status: &StatementStatus) -> String {
    serde_json::to_string(status).unwrap_or_else(|_| format!("{:?}", status))
}

pub type Result<T> = std::result::Result<T, Error>;
