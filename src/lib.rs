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

//! Databricks SQL client that returns dataframes.
//!
//! This crate runs SQL statements on a Databricks SQL warehouse through the
//! Statement Execution API and materializes each result as a [`DataFrame`].
//!
//! ## Overview
//!
//! - [`Database`] - Holds connection configuration
//! - [`Connection`] - Blocking connection that executes statements
//! - [`StatementExecutor`] - Async submit / poll / escalate lifecycle
//! - [`DataFrame`] - Column-major result with per-column numeric promotion
//!
//! A statement is first submitted with the `INLINE` disposition. If that
//! attempt fails it is resubmitted once with `EXTERNAL_LINKS`. Inline results
//! are paginated through internal links; external results are downloaded from
//! presigned URLs in server order.
//!
//! ## Example
//!
//! ```no_run
//! use databricks_sql_frame::Database;
//!
//! # fn main() -> databricks_sql_frame::Result<()> {
//! let mut database = Database::new();
//! database.set_option("uri", "https://my-workspace.databricks.com")?;
//! database.set_option("databricks.http_path", "/sql/1.0/warehouses/abc123")?;
//! database.set_option("databricks.access_token", "dapi...")?;
//! database.set_option("databricks.catalog", "main")?;
//! database.set_option("databricks.schema", "sales")?;
//!
//! let connection = database.connect()?;
//! let frame = connection.execute("SELECT * FROM orders")?;
//! let columns = connection.table_metadata("orders")?;
//! let tables = connection.list_tables()?;
//! # Ok(())
//! # }
//! ```
//!
//! See [`Database`] for the full list of options.

pub mod client;
pub mod connection;
pub mod database;
pub mod descriptor;
pub mod error;
pub mod frame;
pub mod logging;
pub mod metadata;
pub mod reader;
pub mod statement;
pub mod types;

#[cfg(test)]
mod test_util;

// Re-export main types
pub use connection::Connection;
pub use database::Database;
pub use descriptor::ConnectionDescriptor;
pub use error::{Error, Result};
pub use frame::{Column, ColumnData, ColumnType, DataFrame, FrameBuilder, Number, Value};
pub use statement::{PollConfig, StatementExecutor};

// Re-export client types for advanced users
pub use client::{DatabricksClient, DatabricksHttpClient, HttpClientConfig, SeaClient};
