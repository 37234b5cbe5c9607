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

//! Immutable connection parameters shared by every request.

/// Fixed sub-path of the statement submission/status endpoint.
pub const STATEMENTS_PATH: &str = "/api/2.0/sql/statements";

/// Endpoint, credentials, and target identifiers for a SQL warehouse.
///
/// Nothing is validated here beyond the fields being present; a wrong host
/// or token surfaces as a transport failure on first use.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    host: String,
    access_token: String,
    catalog: String,
    schema: String,
    warehouse_id: String,
}

impl ConnectionDescriptor {
    pub fn new(
        host: impl Into<String>,
        access_token: impl Into<String>,
        catalog: impl Into<String>,
        schema: impl Into<String>,
        warehouse_id: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            catalog: catalog.into(),
            schema: schema.into(),
            warehouse_id: warehouse_id.into(),
        }
    }

    /// Workspace URL without a trailing slash.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn warehouse_id(&self) -> &str {
        &self.warehouse_id
    }

    /// Statement submission endpoint.
    pub fn statements_url(&self) -> String {
        format!("{}{}", self.host, STATEMENTS_PATH)
    }

    /// Status endpoint for a single statement.
    pub fn statement_url(&self, statement_id: &str) -> String {
        format!("{}/{}", self.statements_url(), statement_id)
    }

    /// Resolve a server-relative `next_chunk_internal_link`.
    ///
    /// The link already contains the statements path, so it is appended to
    /// the host.
    pub fn chunk_url(&self, internal_link: &str) -> String {
        if internal_link.starts_with('/') {
            format!("{}{}", self.host, internal_link)
        } else {
            format!("{}/{}", self.host, internal_link)
        }
    }
}

impl std::fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionDescriptor")
            .field("host", &self.host)
            .field("access_token", &"<redacted>")
            .field("catalog", &self.catalog)
            .field("schema", &self.schema)
            .field("warehouse_id", &self.warehouse_id)
            .finish()
    }
}
