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

//! Metadata queries executed through the [`StatementExecutor`].
//!
//! ## Example
//!
//! ```ignore
//! let columns = get_table_metadata(&executor, "orders").await?;
//! assert_eq!(columns.column_names(), TABLE_METADATA_COLUMNS);
//! let tables = list_tables(&executor).await?;
//! ```

use crate::error::{Error, Result};
use crate::frame::{Column, ColumnData, DataFrame, Value};
use crate::metadata::sql::SqlCommandBuilder;
use crate::statement::StatementExecutor;
use tracing::debug;

/// Column names of a table metadata frame, in order.
pub const TABLE_METADATA_COLUMNS: [&str; 4] = ["name", "type", "current_selection", "table_name"];

/// Describe the columns of `table` in the executor's schema.
///
/// The result always has the columns in [`TABLE_METADATA_COLUMNS`]: the
/// column name, its data type, a constant `1` and the table name.
pub async fn get_table_metadata(executor: &StatementExecutor, table: &str) -> Result<DataFrame> {
    let sql = SqlCommandBuilder::new(executor.descriptor().schema()).build_table_columns(table);
    debug!("Executing metadata query: {}", sql);

    let raw = executor.query(&sql).await?;
    let frame = reshape_table_metadata(raw, table)?;

    debug!("Found {} columns for table {}", frame.num_rows(), table);
    Ok(frame)
}

/// List the tables of the executor's schema with server column names.
pub async fn list_tables(executor: &StatementExecutor) -> Result<DataFrame> {
    let sql = SqlCommandBuilder::new(executor.descriptor().schema()).build_show_tables();
    debug!("Executing metadata query: {}", sql);

    executor.query(&sql).await
}

/// Reshape a `(column_name, data_type)` frame into the table metadata layout.
///
/// The first two columns are taken by position.
pub fn reshape_table_metadata(raw: DataFrame, table: &str) -> Result<DataFrame> {
    let [name_column, type_column] = match raw.columns() {
        [name, data_type, ..] => [name, data_type],
        other => {
            return Err(Error::UnexpectedFormat(format!(
                "column lookup returned {} columns, expected 2",
                other.len()
            )))
        }
    };
    let rows = raw.num_rows();

    DataFrame::from_columns(vec![
        Column::new(TABLE_METADATA_COLUMNS[0], name_column.data().clone()),
        Column::new(TABLE_METADATA_COLUMNS[1], type_column.data().clone()),
        Column::new(
            TABLE_METADATA_COLUMNS[2],
            ColumnData::Int64(vec![Some(1); rows]),
        ),
        Column::new(
            TABLE_METADATA_COLUMNS[3],
            ColumnData::Raw(vec![Value::Text(table.to_string()); rows]),
        ),
    ])
}
