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

//! Metadata helpers built on the statement executor.
//!
//! ## Module Structure
//!
//! - `sql`: SQL command builder for metadata queries
//! - `service`: runs the queries and reshapes the results

pub mod service;
pub mod sql;

pub use service::{
    get_table_metadata, list_tables, reshape_table_metadata, TABLE_METADATA_COLUMNS,
};
pub use sql::SqlCommandBuilder;
