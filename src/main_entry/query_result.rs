use std::ops::Index;
use std::sync::Arc;

use derive_builder::Builder;
use log::{debug, trace};
use once_cell::sync::OnceCell;
use strum_macros::{AsRefStr, Display};

use super::{Record, ResultError};
use crate::function::{ColumnCast, ColumnTypes, FunctionError, IDENTITY_CAST};
use crate::types_v2::ScalarValue;

/// What to do with rows whose length differs from the column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RowLengthPolicy {
    /// Pair values with columns up to the shorter of the two.
    #[default]
    Truncate,
    /// Reject such rows when the result is built.
    Strict,
}

/// Tabular output of one query: column names, positional rows and an
/// optional casting strategy per column.
///
/// Column-keyed [`Record`]s are built on first access and kept for the
/// lifetime of the value. Changing `columns` or `rows` afterwards does not
/// rebuild them; build a new result (or [`QueryResult::duplicate`]) instead.
#[derive(Builder, Debug, Default)]
#[builder(
    pattern = "owned",
    build_fn(validate = "Self::validate", error = "ResultError")
)]
pub struct QueryResult {
    columns: Vec<String>,
    rows: Vec<Vec<ScalarValue>>,
    #[builder(default)]
    column_types: ColumnTypes,
    #[builder(default)]
    row_length_policy: RowLengthPolicy,
    #[builder(setter(skip))]
    records: OnceCell<Vec<Record>>,
}

impl QueryResultBuilder {
    fn validate(&self) -> Result<(), ResultError> {
        let policy = self.row_length_policy.unwrap_or_default();
        if policy != RowLengthPolicy::Strict {
            return Ok(());
        }
        trace!(
            "validate row lengths with {} policy",
            AsRef::<str>::as_ref(&policy)
        );
        match (&self.columns, &self.rows) {
            (Some(columns), Some(rows)) => check_row_lengths(columns, rows),
            _ => Ok(()),
        }
    }
}

fn check_row_lengths(columns: &[String], rows: &[Vec<ScalarValue>]) -> Result<(), ResultError> {
    match rows.iter().position(|row| row.len() != columns.len()) {
        Some(row) => Err(ResultError::MalformedRow {
            row,
            expected: columns.len(),
            actual: rows[row].len(),
        }),
        None => Ok(()),
    }
}

impl QueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<ScalarValue>>) -> Self {
        Self::with_column_types(columns, rows, ColumnTypes::new())
    }

    pub fn with_column_types(
        columns: Vec<String>,
        rows: Vec<Vec<ScalarValue>>,
        column_types: ColumnTypes,
    ) -> Self {
        Self {
            columns,
            rows,
            column_types,
            row_length_policy: RowLengthPolicy::default(),
            records: OnceCell::new(),
        }
    }

    pub fn builder() -> QueryResultBuilder {
        QueryResultBuilder::default()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Does not refresh records that were already built.
    pub fn columns_mut(&mut self) -> &mut Vec<String> {
        &mut self.columns
    }

    pub fn rows(&self) -> &[Vec<ScalarValue>] {
        &self.rows
    }

    /// Does not refresh records that were already built.
    pub fn rows_mut(&mut self) -> &mut Vec<Vec<ScalarValue>> {
        &mut self.rows
    }

    pub fn column_types(&self) -> &ColumnTypes {
        &self.column_types
    }

    pub fn row_length_policy(&self) -> RowLengthPolicy {
        self.row_length_policy
    }

    /// Casting strategy for `column`, the shared identity cast when none was given.
    pub fn column_type(&self, column: &str) -> &dyn ColumnCast {
        match self.column_types.get(column) {
            Some(cast) => cast.as_ref(),
            None => IDENTITY_CAST.as_ref(),
        }
    }

    pub fn cast_value(
        &self,
        column: &str,
        value: &ScalarValue,
    ) -> Result<ScalarValue, FunctionError> {
        self.column_type(column).cast(value)
    }

    /// Fails with [`ResultError::MalformedRow`] on the first row whose length
    /// differs from the column count.
    pub fn check_row_lengths(&self) -> Result<(), ResultError> {
        check_row_lengths(&self.columns, &self.rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_materialized(&self) -> bool {
        self.records.get().is_some()
    }

    /// All records, built on the first call.
    pub fn to_records(&self) -> &[Record] {
        self.records.get_or_init(|| self.materialize())
    }

    pub fn into_records(self) -> Vec<Record> {
        match self.records.into_inner() {
            Some(records) => records,
            None => build_records(&self.columns, &self.rows),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.to_records().iter()
    }

    pub fn each<F>(&self, f: F)
    where
        F: FnMut(&Record),
    {
        self.iter().for_each(f)
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.to_records().get(index)
    }

    /// Record at `index`; negative indices count back from the last record.
    pub fn at(&self, index: isize) -> Result<&Record, ResultError> {
        let records = self.to_records();
        let len = records.len();
        let pos = if index < 0 {
            len.checked_sub(index.unsigned_abs())
        } else {
            Some(index as usize)
        };
        pos.and_then(|pos| records.get(pos))
            .ok_or(ResultError::IndexOutOfRange { index, len })
    }

    pub fn first(&self) -> Option<&Record> {
        self.to_records().first()
    }

    pub fn last(&self) -> Option<&Record> {
        self.to_records().last()
    }

    /// Copies `columns` and `rows` into a new result whose records are not built yet.
    pub fn duplicate(&self) -> Self {
        trace!(
            "duplicate query result with {} columns and {} rows",
            self.columns.len(),
            self.rows.len()
        );
        Self {
            columns: self.columns.clone(),
            rows: self.rows.clone(),
            column_types: self.column_types.clone(),
            row_length_policy: self.row_length_policy,
            records: OnceCell::new(),
        }
    }

    fn materialize(&self) -> Vec<Record> {
        debug!(
            "materialize {} records over {} columns, row length policy: {}",
            self.rows.len(),
            self.columns.len(),
            self.row_length_policy
        );
        build_records(&self.columns, &self.rows)
    }
}

fn build_records(columns: &[String], rows: &[Vec<ScalarValue>]) -> Vec<Record> {
    let keys = columns
        .iter()
        .map(|column| Arc::<str>::from(column.as_str()))
        .collect::<Vec<_>>();
    rows.iter()
        .map(|row| {
            keys.iter()
                .cloned()
                .zip(row.iter().cloned())
                .collect::<Record>()
        })
        .collect()
}

impl Clone for QueryResult {
    fn clone(&self) -> Self {
        self.duplicate()
    }
}

impl Index<usize> for QueryResult {
    type Output = Record;

    fn index(&self, index: usize) -> &Self::Output {
        &self.to_records()[index]
    }
}

impl<'a> IntoIterator for &'a QueryResult {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for QueryResult {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_records().into_iter()
    }
}
