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

//! Scripted `DatabricksClient` and response builders shared by unit tests.

use crate::client::DatabricksClient;
use crate::descriptor::ConnectionDescriptor;
use crate::error::{Error, Result};
use crate::types::sea::{ExecuteStatementRequest, ResultData, StatementExecutionResponse};
use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

pub fn test_descriptor() -> ConnectionDescriptor {
    ConnectionDescriptor::new(
        "https://test.databricks.com",
        "test-token",
        "main",
        "sales",
        "wh-test",
    )
}

pub fn state_response(statement_id: &str, state: &str) -> StatementExecutionResponse {
    serde_json::from_value(json!({
        "statement_id": statement_id,
        "status": {"state": state}
    }))
    .unwrap()
}

pub fn pending_response(statement_id: &str) -> StatementExecutionResponse {
    state_response(statement_id, "PENDING")
}

fn manifest_json(columns: &[&str]) -> JsonValue {
    let columns: Vec<JsonValue> = columns
        .iter()
        .enumerate()
        .map(|(i, name)| json!({"name": name, "type_name": "STRING", "position": i}))
        .collect();
    json!({
        "format": "JSON_ARRAY",
        "schema": {"column_count": columns.len(), "columns": columns}
    })
}

pub fn inline_response(
    statement_id: &str,
    columns: &[&str],
    rows: JsonValue,
    next_chunk_internal_link: Option<&str>,
) -> StatementExecutionResponse {
    serde_json::from_value(json!({
        "statement_id": statement_id,
        "status": {"state": "SUCCEEDED"},
        "manifest": manifest_json(columns),
        "result": {
            "chunk_index": 0,
            "data_array": rows,
            "next_chunk_internal_link": next_chunk_internal_link
        }
    }))
    .unwrap()
}

pub fn external_links_response(
    statement_id: &str,
    columns: &[&str],
    urls: &[&str],
) -> StatementExecutionResponse {
    let links: Vec<JsonValue> = urls
        .iter()
        .enumerate()
        .map(|(i, url)| {
            json!({
                "external_link": url,
                "expiration": "2099-01-01T00:00:00Z",
                "chunk_index": i
            })
        })
        .collect();
    serde_json::from_value(json!({
        "statement_id": statement_id,
        "status": {"state": "SUCCEEDED"},
        "manifest": manifest_json(columns),
        "result": {"external_links": links}
    }))
    .unwrap()
}

pub fn chunk(rows: JsonValue, next_chunk_internal_link: Option<&str>) -> ResultData {
    serde_json::from_value(json!({
        "data_array": rows,
        "next_chunk_internal_link": next_chunk_internal_link
    }))
    .unwrap()
}

/// Replays queued responses and records every call it receives.
#[derive(Debug, Default)]
pub struct ScriptedClient {
    submits: Mutex<VecDeque<Result<StatementExecutionResponse>>>,
    statuses: Mutex<VecDeque<Result<StatementExecutionResponse>>>,
    chunks: Mutex<HashMap<String, ResultData>>,
    links: Mutex<HashMap<String, Vec<u8>>>,
    submitted: Mutex<Vec<ExecuteStatementRequest>>,
    status_ids: Mutex<Vec<String>>,
    chunk_requests: Mutex<Vec<String>>,
    link_requests: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_submit(&self, response: StatementExecutionResponse) {
        self.submits.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_submit_error(&self, error: Error) {
        self.submits.lock().unwrap().push_back(Err(error));
    }

    pub fn push_status(&self, response: StatementExecutionResponse) {
        self.statuses.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_chunk(&self, internal_link: &str, data: ResultData) {
        self.chunks
            .lock()
            .unwrap()
            .insert(internal_link.to_string(), data);
    }

    pub fn push_link(&self, url: &str, rows: JsonValue) {
        self.links
            .lock()
            .unwrap()
            .insert(url.to_string(), serde_json::to_vec(&rows).unwrap());
    }

    pub fn push_raw_link(&self, url: &str, body: &[u8]) {
        self.links
            .lock()
            .unwrap()
            .insert(url.to_string(), body.to_vec());
    }

    pub fn submitted(&self) -> Vec<ExecuteStatementRequest> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn status_calls(&self) -> usize {
        self.status_ids.lock().unwrap().len()
    }

    pub fn chunk_requests(&self) -> Vec<String> {
        self.chunk_requests.lock().unwrap().clone()
    }

    pub fn link_requests(&self) -> Vec<String> {
        self.link_requests.lock().unwrap().clone()
    }
}

fn unscripted(what: &str) -> Error {
    Error::Http {
        status: 404,
        body: format!("no scripted response for {}", what),
    }
}

#[async_trait]
impl DatabricksClient for ScriptedClient {
    async fn submit_statement(
        &self,
        request: &ExecuteStatementRequest,
    ) -> Result<StatementExecutionResponse> {
        self.submitted.lock().unwrap().push(request.clone());
        self.submits
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("submit")))
    }

    async fn get_statement_status(
        &self,
        statement_id: &str,
    ) -> Result<StatementExecutionResponse> {
        self.status_ids
            .lock()
            .unwrap()
            .push(statement_id.to_string());
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted(statement_id)))
    }

    async fn get_next_chunk(&self, internal_link: &str) -> Result<ResultData> {
        self.chunk_requests
            .lock()
            .unwrap()
            .push(internal_link.to_string());
        self.chunks
            .lock()
            .unwrap()
            .get(internal_link)
            .cloned()
            .ok_or_else(|| unscripted(internal_link))
    }

    async fn fetch_external_link(&self, url: &str) -> Result<Vec<u8>> {
        self.link_requests.lock().unwrap().push(url.to_string());
        self.links
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| unscripted(url))
    }
}
