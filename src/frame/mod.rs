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

//! In-memory column-major result frame.
//!
//! A [`DataFrame`] is built from row-major JSON cells. Each column is promoted
//! independently: if every non-null cell parses as a number the column becomes
//! `Int64` (all integral) or `Float64`; otherwise it keeps the original
//! tagged values. Nulls stay missing either way.
//!
//! Multi-chunk results go through a [`FrameBuilder`], which keeps the raw
//! cells of every chunk and promotes each column once in
//! [`FrameBuilder::finish`]. Promotion therefore sees the whole column, and a
//! paginated result equals the frame built from all of its rows at once.

mod arrow;
pub mod value;

pub use value::{Number, Value};

use crate::error::{Error, Result};
use serde_json::Value as JsonValue;

/// Storage type of a column after promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int64,
    Float64,
    /// Not promoted; cells keep their original representation.
    Raw,
}

/// Column storage.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Int64(Vec<Option<i64>>),
    Float64(Vec<Option<f64>>),
    Raw(Vec<Value>),
}

impl ColumnData {
    /// Apply all-or-nothing numeric promotion to a column of raw cells.
    pub fn promote(values: Vec<Value>) -> Self {
        if values.is_empty() {
            return Self::Raw(values);
        }

        let mut numbers = Vec::with_capacity(values.len());
        for value in &values {
            if value.is_null() {
                numbers.push(None);
                continue;
            }
            match value.to_number() {
                Some(n) => numbers.push(Some(n)),
                None => return Self::Raw(values),
            }
        }

        if numbers.iter().flatten().all(|n| matches!(n, Number::Int(_))) {
            Self::Int64(
                numbers
                    .into_iter()
                    .map(|n| match n {
                        Some(Number::Int(v)) => Some(v),
                        _ => None,
                    })
                    .collect(),
            )
        } else {
            Self::Float64(
                numbers
                    .into_iter()
                    .map(|n| n.map(Number::as_f64))
                    .collect(),
            )
        }
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            Self::Int64(_) => ColumnType::Int64,
            Self::Float64(_) => ColumnType::Float64,
            Self::Raw(_) => ColumnType::Raw,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Int64(v) => v.len(),
            Self::Float64(v) => v.len(),
            Self::Raw(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell at `index` as a tagged value.
    pub fn get(&self, index: usize) -> Option<Value> {
        match self {
            Self::Int64(v) => v.get(index).map(|c| Value::from(*c)),
            Self::Float64(v) => v.get(index).map(|c| Value::from(*c)),
            Self::Raw(v) => v.get(index).cloned(),
        }
    }

    fn into_values(self) -> Vec<Value> {
        match self {
            Self::Int64(v) => v.into_iter().map(Value::from).collect(),
            Self::Float64(v) => v.into_iter().map(Value::from).collect(),
            Self::Raw(v) => v,
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Build a column from raw cells, applying numeric promotion.
    pub fn from_values(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(name, ColumnData::promote(values))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn column_type(&self) -> ColumnType {
        self.data.column_type()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.data.get(index)
    }

    /// All cells as tagged values.
    pub fn values(&self) -> Vec<Value> {
        self.data.clone().into_values()
    }
}

/// Ordered set of equally long named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFrame {
    columns: Vec<Column>,
    num_rows: usize,
}

impl DataFrame {
    /// Build a frame from columns of equal length.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let num_rows = columns.first().map(Column::len).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.len() != num_rows) {
            return Err(Error::Materialization(format!(
                "column '{}' has {} rows, expected {}",
                bad.name(),
                bad.len(),
                num_rows
            )));
        }
        Ok(Self { columns, num_rows })
    }

    /// Transpose row-major JSON cells into promoted columns.
    ///
    /// Every row must have exactly one cell per column name.
    pub fn from_rows<S: AsRef<str>>(rows: &[Vec<JsonValue>], column_names: &[S]) -> Result<Self> {
        let mut builder = FrameBuilder::new(column_names);
        builder.push_rows(rows)?;
        Ok(builder.finish())
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// One row as tagged values in column order.
    pub fn row(&self, index: usize) -> Option<Vec<Value>> {
        if index >= self.num_rows {
            return None;
        }
        self.columns.iter().map(|c| c.get(index)).collect()
    }
}

/// Accumulates raw cells chunk by chunk against a fixed column list.
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    names: Vec<String>,
    cells: Vec<Vec<Value>>,
    num_rows: usize,
}

impl FrameBuilder {
    pub fn new<S: AsRef<str>>(column_names: &[S]) -> Self {
        Self {
            names: column_names.iter().map(|n| n.as_ref().to_string()).collect(),
            cells: column_names.iter().map(|_| Vec::new()).collect(),
            num_rows: 0,
        }
    }

    /// Add one chunk of rows. Every row must have one cell per column.
    pub fn push_rows(&mut self, rows: &[Vec<JsonValue>]) -> Result<()> {
        let width = self.names.len();
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(Error::Materialization(format!(
                "row {} has {} values but the manifest lists {} columns",
                self.num_rows + index,
                row.len(),
                width
            )));
        }

        for column in &mut self.cells {
            column.reserve(rows.len());
        }
        for row in rows {
            for (column, cell) in self.cells.iter_mut().zip(row) {
                column.push(Value::from_json(cell));
            }
        }
        self.num_rows += rows.len();
        Ok(())
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Promote every column over all pushed rows.
    pub fn finish(self) -> DataFrame {
        let columns = self
            .names
            .into_iter()
            .zip(self.cells)
            .map(|(name, values)| Column::from_values(name, values))
            .collect();

        DataFrame {
            columns,
            num_rows: self.num_rows,
        }
    }
}
