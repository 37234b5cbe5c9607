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

//! Export of a [`DataFrame`] as an Arrow `RecordBatch`.

use super::{Column, ColumnData, DataFrame, Value};
use crate::error::Result;
use arrow_array::{
    ArrayRef, BooleanArray, Float64Array, Int64Array, RecordBatch, RecordBatchOptions, StringArray,
};
use arrow_schema::{DataType, Field, Schema};
use std::sync::Arc;

impl DataFrame {
    /// Convert to a single Arrow `RecordBatch`.
    ///
    /// `Int64`/`Float64` columns map directly. Raw columns become `Boolean`
    /// when every non-null cell is a boolean, otherwise `Utf8` with each cell
    /// rendered as text. All fields are nullable.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let (fields, arrays): (Vec<Field>, Vec<ArrayRef>) =
            self.columns().iter().map(column_to_arrow).unzip();

        let options = RecordBatchOptions::new().with_row_count(Some(self.num_rows()));
        let batch =
            RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), arrays, &options)?;
        Ok(batch)
    }
}

fn column_to_arrow(column: &Column) -> (Field, ArrayRef) {
    let (data_type, array): (DataType, ArrayRef) = match column.data() {
        ColumnData::Int64(values) => (
            DataType::Int64,
            Arc::new(Int64Array::from(values.clone())),
        ),
        ColumnData::Float64(values) => (
            DataType::Float64,
            Arc::new(Float64Array::from(values.clone())),
        ),
        ColumnData::Raw(values) if is_boolean(values) => {
            let cells: Vec<Option<bool>> = values
                .iter()
                .map(|v| match v {
                    Value::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect();
            (DataType::Boolean, Arc::new(BooleanArray::from(cells)))
        }
        ColumnData::Raw(values) => {
            let cells: Vec<Option<String>> = values
                .iter()
                .map(|v| (!v.is_null()).then(|| v.to_string()))
                .collect();
            (DataType::Utf8, Arc::new(StringArray::from(cells)))
        }
    };

    (Field::new(column.name(), data_type, true), array)
}

fn is_boolean(values: &[Value]) -> bool {
    values.iter().any(|v| matches!(v, Value::Bool(_)))
        && values
            .iter()
            .all(|v| matches!(v, Value::Bool(_) | Value::Null))
}
