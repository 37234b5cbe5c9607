// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! End-to-end tests of the blocking connection against a mock client.

use async_trait::async_trait;
use databricks_sql_frame::types::sea::{
    Disposition, ExecuteStatementRequest, ResultData, StatementExecutionResponse, StatementState,
};
use databricks_sql_frame::{
    ColumnData, Connection, ConnectionDescriptor, DatabricksClient, Error, PollConfig, Result,
    Value,
};
use serde_json::{json, Value as JsonValue};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock client that replays responses keyed by disposition.
#[derive(Debug, Default)]
struct MockClient {
    inline: Mutex<VecDeque<StatementExecutionResponse>>,
    external: Mutex<VecDeque<StatementExecutionResponse>>,
    statuses: Mutex<VecDeque<StatementExecutionResponse>>,
    chunks: Mutex<HashMap<String, ResultData>>,
    links: Mutex<HashMap<String, Vec<u8>>>,
    requests: Mutex<Vec<ExecuteStatementRequest>>,
    polls: Mutex<u32>,
}

impl MockClient {
    fn on_inline(&self, response: JsonValue) -> &Self {
        self.inline.lock().unwrap().push_back(parse(response));
        self
    }

    fn on_external(&self, response: JsonValue) -> &Self {
        self.external.lock().unwrap().push_back(parse(response));
        self
    }

    fn on_status(&self, response: JsonValue) -> &Self {
        self.statuses.lock().unwrap().push_back(parse(response));
        self
    }

    fn on_chunk(&self, link: &str, data: JsonValue) -> &Self {
        self.chunks
            .lock()
            .unwrap()
            .insert(link.to_string(), serde_json::from_value(data).unwrap());
        self
    }

    fn on_link(&self, url: &str, rows: JsonValue) -> &Self {
        self.links
            .lock()
            .unwrap()
            .insert(url.to_string(), serde_json::to_vec(&rows).unwrap());
        self
    }

    fn dispositions(&self) -> Vec<Disposition> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.disposition)
            .collect()
    }

    fn polls(&self) -> u32 {
        *self.polls.lock().unwrap()
    }
}

fn parse(response: JsonValue) -> StatementExecutionResponse {
    serde_json::from_value(response).unwrap()
}

fn not_found(what: &str) -> Error {
    Error::Http {
        status: 404,
        body: what.to_string(),
    }
}

#[async_trait]
impl DatabricksClient for MockClient {
    async fn submit_statement(
        &self,
        request: &ExecuteStatementRequest,
    ) -> Result<StatementExecutionResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let queue = match request.disposition {
            Disposition::Inline => &self.inline,
            Disposition::ExternalLinks => &self.external,
        };
        queue
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| not_found("submit"))
    }

    async fn get_statement_status(
        &self,
        _statement_id: &str,
    ) -> Result<StatementExecutionResponse> {
        *self.polls.lock().unwrap() += 1;
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| not_found("status"))
    }

    async fn get_next_chunk(&self, internal_link: &str) -> Result<ResultData> {
        self.chunks
            .lock()
            .unwrap()
            .get(internal_link)
            .cloned()
            .ok_or_else(|| not_found(internal_link))
    }

    async fn fetch_external_link(&self, url: &str) -> Result<Vec<u8>> {
        self.links
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| not_found(url))
    }
}

fn manifest(columns: &[&str]) -> JsonValue {
    let columns: Vec<JsonValue> = columns
        .iter()
        .enumerate()
        .map(|(i, name)| json!({"name": name, "position": i}))
        .collect();
    json!({"format": "JSON_ARRAY", "schema": {"column_count": columns.len(), "columns": columns}})
}

fn connect(client: Arc<MockClient>) -> Connection {
    let descriptor = ConnectionDescriptor::new(
        "https://example.databricks.com",
        "dapi-token",
        "main",
        "shop",
        "wh1",
    );
    let poll = PollConfig {
        poll_interval: Duration::from_millis(1),
        max_poll_attempts: None,
    };
    Connection::with_client(Arc::new(descriptor), client, poll).unwrap()
}

#[test]
fn test_immediate_success_follows_manifest_order() {
    let client = Arc::new(MockClient::default());
    client.on_inline(json!({
        "statement_id": "s1",
        "status": {"state": "SUCCEEDED"},
        "manifest": manifest(&["label", "qty", "price"]),
        "result": {"data_array": [["a", "1", "1.5"], ["b", null, "2"]]}
    }));

    let frame = connect(client.clone()).execute("SELECT * FROM items").unwrap();

    assert_eq!(frame.column_names(), vec!["label", "qty", "price"]);
    assert_eq!(
        frame.column("qty").unwrap().data(),
        &ColumnData::Int64(vec![Some(1), None])
    );
    assert_eq!(
        frame.column("price").unwrap().data(),
        &ColumnData::Float64(vec![Some(1.5), Some(2.0)])
    );
    assert_eq!(client.polls(), 0);
}

#[test]
fn test_pending_statement_is_polled_once_per_pending_response() {
    let client = Arc::new(MockClient::default());
    client
        .on_inline(json!({"statement_id": "s1", "status": {"state": "PENDING"}}))
        .on_status(json!({"statement_id": "s1", "status": {"state": "PENDING"}}))
        .on_status(json!({"statement_id": "s1", "status": {"state": "RUNNING"}}))
        .on_status(json!({
            "statement_id": "s1",
            "status": {"state": "SUCCEEDED"},
            "manifest": manifest(&["n"]),
            "result": {"data_array": [["7"]]}
        }));

    let frame = connect(client.clone()).execute("SELECT 7 AS n").unwrap();

    assert_eq!(client.polls(), 3);
    assert_eq!(frame.row(0).unwrap(), vec![Value::from(7i64)]);
}

#[test]
fn test_failed_inline_escalates_to_external_links() {
    let external = json!({
        "statement_id": "s2",
        "status": {"state": "SUCCEEDED"},
        "manifest": manifest(&["id", "name"]),
        "result": {"external_links": [
            {"external_link": "https://bucket/0", "chunk_index": 0},
            {"external_link": "https://bucket/1", "chunk_index": 1}
        ]}
    });
    let escalated = Arc::new(MockClient::default());
    escalated
        .on_inline(json!({
            "statement_id": "s1",
            "status": {"state": "FAILED", "error": {"message": "result too large"}}
        }))
        .on_external(external.clone())
        .on_link("https://bucket/0", json!([["1", "x"], ["2", "y"]]))
        .on_link("https://bucket/1", json!([["3", "z"]]));

    let direct = Arc::new(MockClient::default());
    direct
        .on_inline(external)
        .on_link("https://bucket/0", json!([["1", "x"], ["2", "y"]]))
        .on_link("https://bucket/1", json!([["3", "z"]]));

    let via_escalation = connect(escalated.clone()).execute("SELECT * FROM big").unwrap();
    let built_directly = connect(direct).execute("SELECT * FROM big").unwrap();

    assert_eq!(
        escalated.dispositions(),
        vec![Disposition::Inline, Disposition::ExternalLinks]
    );
    assert_eq!(via_escalation, built_directly);
    assert_eq!(via_escalation.num_rows(), 3);
}

#[test]
fn test_second_failure_is_reported() {
    let client = Arc::new(MockClient::default());
    client
        .on_inline(json!({"statement_id": "s1", "status": {"state": "FAILED"}}))
        .on_external(json!({
            "statement_id": "s2",
            "status": {"state": "FAILED", "error": {"error_code": "BAD_REQUEST", "message": "syntax error"}}
        }));

    let err = connect(client.clone()).execute("SELEC 1").unwrap_err();

    match err {
        Error::StatementFailed { state, status, .. } => {
            assert_eq!(state, StatementState::Failed);
            assert!(err_message(&status).contains("syntax error"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(client.dispositions().len(), 2);
}

fn err_message(status: &databricks_sql_frame::types::sea::StatementStatus) -> String {
    status
        .error
        .as_ref()
        .and_then(|e| e.message.clone())
        .unwrap_or_default()
}

#[test]
fn test_inline_pagination_concatenates_chunks() {
    let client = Arc::new(MockClient::default());
    client
        .on_inline(json!({
            "statement_id": "s1",
            "status": {"state": "SUCCEEDED"},
            "manifest": manifest(&["v"]),
            "result": {
                "data_array": [["1"], ["2"]],
                "next_chunk_internal_link": "/api/2.0/sql/statements/s1/result/chunks/1"
            }
        }))
        .on_chunk(
            "/api/2.0/sql/statements/s1/result/chunks/1",
            json!({"chunk_index": 1, "data_array": [["2.5"]]}),
        );

    let frame = connect(client).execute("SELECT v FROM t").unwrap();

    assert_eq!(
        frame.column("v").unwrap().data(),
        &ColumnData::Float64(vec![Some(1.0), Some(2.0), Some(2.5)])
    );
}

#[test]
fn test_table_metadata_contract() {
    let client = Arc::new(MockClient::default());
    client.on_inline(json!({
        "statement_id": "s1",
        "status": {"state": "SUCCEEDED"},
        "manifest": manifest(&["column_name", "data_type"]),
        "result": {"data_array": [["order_id", "bigint"], ["placed_at", "timestamp"]]}
    }));

    let frame = connect(client).table_metadata("orders").unwrap();

    assert_eq!(
        frame.column_names(),
        vec!["name", "type", "current_selection", "table_name"]
    );
    assert_eq!(
        frame.column("current_selection").unwrap().data(),
        &ColumnData::Int64(vec![Some(1), Some(1)])
    );
    assert_eq!(
        frame.column("table_name").unwrap().values(),
        vec![Value::from("orders"), Value::from("orders")]
    );
}

#[test]
fn test_list_tables_is_idempotent() {
    let listing = json!({
        "statement_id": "s",
        "status": {"state": "SUCCEEDED"},
        "manifest": manifest(&["database", "tableName", "isTemporary"]),
        "result": {"data_array": [["shop", "orders", "false"], ["shop", "items", "false"]]}
    });
    let client = Arc::new(MockClient::default());
    client.on_inline(listing.clone()).on_inline(listing);

    let conn = connect(client);
    let first = conn.list_tables().unwrap();
    let second = conn.list_tables().unwrap();

    assert_eq!(first, second);
    assert_eq!(first.column_names(), vec!["database", "tableName", "isTemporary"]);
}
