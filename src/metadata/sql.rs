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

//! SQL command builder for metadata queries.
//!
//! Builds the INFORMATION_SCHEMA column lookup and `SHOW TABLES` with
//! identifier and string-literal escaping.

/// Builds SQL commands for metadata queries scoped to one schema.
///
/// # Examples
///
/// ```
/// use databricks_sql_frame::metadata::SqlCommandBuilder;
///
/// let sql = SqlCommandBuilder::new("sales").build_show_tables();
/// assert_eq!(sql, "SHOW TABLES IN `sales`");
/// ```
#[derive(Debug, Clone)]
pub struct SqlCommandBuilder {
    schema: String,
}

impl SqlCommandBuilder {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
        }
    }

    /// Build the column lookup for `table`, ordered by ordinal position.
    ///
    /// Returns two columns: `column_name` and `data_type`.
    pub fn build_table_columns(&self, table: &str) -> String {
        format!(
            "SELECT column_name, data_type FROM information_schema.columns \
             WHERE table_schema = {} AND table_name = {} \
             ORDER BY ordinal_position",
            Self::escape_literal(&self.schema),
            Self::escape_literal(table)
        )
    }

    /// Build `SHOW TABLES IN \`{schema}\``.
    pub fn build_show_tables(&self) -> String {
        format!("SHOW TABLES IN {}", Self::escape_identifier(&self.schema))
    }

    /// Escape an identifier for use in SQL by wrapping in backticks.
    ///
    /// Any backticks within the identifier are doubled (`` ` `` → `` `` ``).
    pub fn escape_identifier(name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    /// Quote a string literal, doubling embedded single quotes.
    pub fn escape_literal(value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }
}
