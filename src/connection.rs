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

//! Blocking connection to a Databricks SQL warehouse.

use crate::client::{DatabricksClient, DatabricksHttpClient, HttpClientConfig, SeaClient};
use crate::descriptor::ConnectionDescriptor;
use crate::error::{Error, Result};
use crate::frame::DataFrame;
use crate::metadata;
use crate::statement::{PollConfig, StatementExecutor};
use std::sync::Arc;
use tracing::debug;

/// Represents an active connection to a Databricks SQL warehouse.
///
/// The connection owns a Tokio runtime and blocks the calling thread on each
/// call. Calls run one at a time; nothing is shared between executions.
#[derive(Debug)]
pub struct Connection {
    executor: StatementExecutor,

    // Tokio runtime for async operations
    runtime: tokio::runtime::Runtime,
}

impl Connection {
    /// Connect through the Statement Execution REST API.
    pub fn new(
        descriptor: ConnectionDescriptor,
        http_config: HttpClientConfig,
        poll_config: PollConfig,
    ) -> Result<Self> {
        let http_client = Arc::new(DatabricksHttpClient::new(
            http_config,
            descriptor.access_token(),
        )?);
        let descriptor = Arc::new(descriptor);
        let client: Arc<dyn DatabricksClient> =
            Arc::new(SeaClient::new(http_client, descriptor.clone()));

        Self::with_client(descriptor, client, poll_config)
    }

    /// Connect with an explicit client implementation.
    pub fn with_client(
        descriptor: Arc<ConnectionDescriptor>,
        client: Arc<dyn DatabricksClient>,
        poll_config: PollConfig,
    ) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new().map_err(Error::Runtime)?;

        debug!(
            "Created connection to {} with warehouse {}",
            descriptor.host(),
            descriptor.warehouse_id()
        );

        Ok(Self {
            executor: StatementExecutor::new(client, descriptor, poll_config),
            runtime,
        })
    }

    pub fn descriptor(&self) -> &ConnectionDescriptor {
        self.executor.descriptor()
    }

    pub fn poll_config(&self) -> &PollConfig {
        self.executor.config()
    }

    /// Run `sql` to completion and materialize its result.
    pub fn execute(&self, sql: &str) -> Result<DataFrame> {
        self.runtime.block_on(self.executor.query(sql))
    }

    /// Columns of `table` in the connection's schema.
    ///
    /// See [`metadata::get_table_metadata`].
    pub fn table_metadata(&self, table: &str) -> Result<DataFrame> {
        self.runtime
            .block_on(metadata::get_table_metadata(&self.executor, table))
    }

    /// Tables of the connection's schema.
    pub fn list_tables(&self) -> Result<DataFrame> {
        self.runtime.block_on(metadata::list_tables(&self.executor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{inline_response, state_response, test_descriptor, ScriptedClient};
    use crate::types::sea::Disposition;
    use serde_json::json;

    fn connection(client: Arc<ScriptedClient>) -> Connection {
        Connection::with_client(Arc::new(test_descriptor()), client, PollConfig::default())
            .unwrap()
    }

    #[test]
    fn test_new_builds_sea_connection() {
        let conn = Connection::new(
            test_descriptor(),
            HttpClientConfig::default(),
            PollConfig::default(),
        )
        .unwrap();
        assert_eq!(conn.descriptor().warehouse_id(), "wh-test");
        assert_eq!(conn.poll_config(), &PollConfig::default());
    }

    #[test]
    fn test_execute_blocks_until_frame() {
        let client = Arc::new(ScriptedClient::new());
        client.push_submit(inline_response("s1", &["n"], json!([["1"], ["2"]]), None));

        let frame = connection(client.clone()).execute("SELECT n FROM t").unwrap();

        assert_eq!(frame.num_rows(), 2);
        let submitted = client.submitted();
        assert_eq!(submitted[0].statement, "SELECT n FROM t");
        assert_eq!(submitted[0].disposition, Disposition::Inline);
        assert_eq!(submitted[0].catalog, "main");
        assert_eq!(submitted[0].schema, "sales");
    }

    #[test]
    fn test_execute_reports_failure() {
        let client = Arc::new(ScriptedClient::new());
        client.push_submit(state_response("s1", "FAILED"));
        client.push_submit(state_response("s2", "FAILED"));

        let err = connection(client).execute("SELECT 1").unwrap_err();
        assert!(matches!(err, Error::StatementFailed { .. }));
    }

    #[test]
    fn test_table_metadata_and_list_tables() {
        let client = Arc::new(ScriptedClient::new());
        client.push_submit(inline_response(
            "s1",
            &["column_name", "data_type"],
            json!([["id", "int"]]),
            None,
        ));
        client.push_submit(inline_response(
            "s2",
            &["database", "tableName", "isTemporary"],
            json!([["sales", "orders", "false"]]),
            None,
        ));

        let conn = connection(client);
        let columns = conn.table_metadata("orders").unwrap();
        assert_eq!(
            columns.column_names(),
            vec!["name", "type", "current_selection", "table_name"]
        );
        let tables = conn.list_tables().unwrap();
        assert_eq!(tables.num_rows(), 1);
    }
}
