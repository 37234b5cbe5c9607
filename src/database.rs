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

//! Connection configuration for a Databricks SQL warehouse.

use crate::client::HttpClientConfig;
use crate::connection::Connection;
use crate::descriptor::ConnectionDescriptor;
use crate::error::{Error, Result};
use crate::logging::{init_logging, LogConfig};
use crate::statement::PollConfig;
use std::time::Duration;
use tracing::debug;

/// Holds connection configuration until [`Database::connect`] is called.
///
/// Options are set by string key, mirroring a driver option API:
///
/// | Option | Description |
/// |--------|-------------|
/// | `uri` | Databricks workspace URL |
/// | `databricks.http_path` | SQL warehouse HTTP path (extracts warehouse_id) |
/// | `databricks.warehouse_id` | SQL warehouse ID directly |
/// | `databricks.access_token` | Personal access token |
/// | `databricks.catalog` | Catalog for statements |
/// | `databricks.schema` | Schema for statements and metadata |
/// | `databricks.poll_interval_ms` | Wait between status polls |
/// | `databricks.max_poll_attempts` | Status polls per submission before giving up |
/// | `databricks.http.connect_timeout_ms` | HTTP connect timeout |
/// | `databricks.http.read_timeout_ms` | HTTP request timeout |
/// | `databricks.log_level` | OFF, ERROR, WARN, INFO, DEBUG or TRACE |
/// | `databricks.log_file` | Append logs to this file instead of stderr |
#[derive(Debug, Default, Clone)]
pub struct Database {
    // Core configuration
    uri: Option<String>,
    warehouse_id: Option<String>,
    access_token: Option<String>,
    catalog: Option<String>,
    schema: Option<String>,

    http_config: HttpClientConfig,
    poll_config: PollConfig,
    log_config: LogConfig,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    pub fn warehouse_id(&self) -> Option<&str> {
        self.warehouse_id.as_deref()
    }

    pub fn catalog(&self) -> Option<&str> {
        self.catalog.as_deref()
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn poll_config(&self) -> &PollConfig {
        &self.poll_config
    }

    pub fn http_config(&self) -> &HttpClientConfig {
        &self.http_config
    }

    /// Set one option by key.
    pub fn set_option(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "uri" => self.uri = Some(value.to_string()),
            "databricks.http_path" => {
                let id = Self::extract_warehouse_id(value).ok_or_else(|| {
                    Error::InvalidArgument(format!(
                        "http_path '{}' does not name a warehouse (/sql/1.0/warehouses/<id>)",
                        value
                    ))
                })?;
                self.warehouse_id = Some(id);
            }
            "databricks.warehouse_id" => self.warehouse_id = Some(value.to_string()),
            "databricks.access_token" => self.access_token = Some(value.to_string()),
            "databricks.catalog" => self.catalog = Some(value.to_string()),
            "databricks.schema" => self.schema = Some(value.to_string()),
            "databricks.poll_interval_ms" => {
                let interval = Self::parse_millis(key, value)?;
                if interval.is_zero() {
                    return Err(Error::InvalidArgument(format!(
                        "{} must be greater than zero",
                        key
                    )));
                }
                self.poll_config.poll_interval = interval;
            }
            "databricks.max_poll_attempts" => {
                let attempts = value.trim().parse::<u32>().map_err(|_| {
                    Error::InvalidArgument(format!("{} must be a non-negative integer", key))
                })?;
                self.poll_config.max_poll_attempts = Some(attempts);
            }
            "databricks.http.connect_timeout_ms" => {
                self.http_config.connect_timeout = Self::parse_millis(key, value)?;
            }
            "databricks.http.read_timeout_ms" => {
                self.http_config.read_timeout = Self::parse_millis(key, value)?;
            }
            "databricks.log_level" => {
                self.log_config.level = Some(LogConfig::parse_level(value)?);
            }
            "databricks.log_file" => self.log_config.file = Some(value.to_string()),
            _ => {
                return Err(Error::InvalidArgument(format!("unknown option '{}'", key)));
            }
        }
        Ok(())
    }

    pub fn with_option(mut self, key: &str, value: &str) -> Result<Self> {
        self.set_option(key, value)?;
        Ok(self)
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn with_warehouse_id(mut self, warehouse_id: impl Into<String>) -> Self {
        self.warehouse_id = Some(warehouse_id.into());
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_poll_config(mut self, poll_config: PollConfig) -> Self {
        self.poll_config = poll_config;
        self
    }

    /// Validate the configuration into a descriptor.
    pub fn descriptor(&self) -> Result<ConnectionDescriptor> {
        let host = Self::required(&self.uri, "uri not set")?;
        let warehouse_id = Self::required(
            &self.warehouse_id,
            "warehouse_id not set (set via databricks.http_path or databricks.warehouse_id)",
        )?;
        let access_token = Self::required(&self.access_token, "access_token not set")?;
        let catalog = Self::required(&self.catalog, "catalog not set")?;
        let schema = Self::required(&self.schema, "schema not set")?;

        Ok(ConnectionDescriptor::new(
            host,
            access_token,
            catalog,
            schema,
            warehouse_id,
        ))
    }

    /// Open a connection, initializing logging on first use.
    pub fn connect(&self) -> Result<Connection> {
        let descriptor = self.descriptor()?;
        init_logging(&self.log_config);

        debug!(
            "Creating connection to {} with warehouse {}",
            descriptor.host(),
            descriptor.warehouse_id()
        );

        Connection::new(
            descriptor,
            self.http_config.clone(),
            self.poll_config.clone(),
        )
    }

    /// Extract warehouse ID from HTTP path if provided.
    /// Format: /sql/1.0/warehouses/{warehouse_id}
    fn extract_warehouse_id(http_path: &str) -> Option<String> {
        http_path
            .strip_prefix("/sql/1.0/warehouses/")
            .or_else(|| http_path.strip_prefix("sql/1.0/warehouses/"))
            .map(|s| s.trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
    }

    fn parse_millis(key: &str, value: &str) -> Result<Duration> {
        value
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| Error::InvalidArgument(format!("{} must be a number of milliseconds", key)))
    }

    fn required<'a>(value: &'a Option<String>, message: &str) -> Result<&'a str> {
        value
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::InvalidArgument(message.to_string()))
    }
}
