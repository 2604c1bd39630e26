use std::sync::Arc;

use arrow::record_batch::RecordBatch;
use derive_new::new;
use log::debug;

use super::{QueryResult, ResultError};
use crate::function::{ColumnTypes, DefaultCastFunctions};
use crate::types_v2::{LogicalType, ScalarValue};

#[derive(new, Debug, Clone)]
pub struct BaseQueryResult {
    /// The SQL types of the result
    pub(crate) types: Vec<LogicalType>,
    /// The names of the result
    pub(crate) names: Vec<String>,
}

/// Query output as handed over by the execution layer.
#[derive(new, Debug, Clone)]
pub struct MaterializedQueryResult {
    pub(crate) base: BaseQueryResult,
    pub(crate) collection: Vec<RecordBatch>,
}

impl MaterializedQueryResult {
    pub fn types(&self) -> &[LogicalType] {
        &self.base.types
    }

    pub fn names(&self) -> &[String] {
        &self.base.names
    }

    pub fn num_rows(&self) -> usize {
        self.collection.iter().map(|batch| batch.num_rows()).sum()
    }

    fn column_types(&self) -> Result<ColumnTypes, ResultError> {
        let mut column_types = ColumnTypes::with_capacity(self.base.names.len());
        for (name, logical_type) in self.base.names.iter().zip(self.base.types.iter()) {
            // nothing to cast into for untyped columns
            if logical_type == &LogicalType::SqlNull {
                continue;
            }
            let function = DefaultCastFunctions::get_cast_function(logical_type, false)?;
            column_types.insert(name.clone(), Arc::new(function));
        }
        Ok(column_types)
    }

    fn rows(&self) -> Result<Vec<Vec<ScalarValue>>, ResultError> {
        let width = self.base.names.len();
        let mut rows = Vec::with_capacity(self.num_rows());
        for batch in self.collection.iter() {
            if batch.num_columns() != width {
                return Err(ResultError::InternalError(format!(
                    "record batch has {} columns but the result has {}",
                    batch.num_columns(),
                    width
                )));
            }
            for row_idx in 0..batch.num_rows() {
                let row = batch
                    .columns()
                    .iter()
                    .map(|array| ScalarValue::try_from_array(array, row_idx))
                    .collect::<Result<Vec<_>, _>>()?;
                rows.push(row);
            }
        }
        Ok(rows)
    }
}

impl TryFrom<MaterializedQueryResult> for QueryResult {
    type Error = ResultError;

    fn try_from(value: MaterializedQueryResult) -> Result<Self, Self::Error> {
        if value.base.names.len() != value.base.types.len() {
            return Err(ResultError::InternalError(format!(
                "result has {} names but {} types",
                value.base.names.len(),
                value.base.types.len()
            )));
        }
        let column_types = value.column_types()?;
        let rows = value.rows()?;
        debug!(
            "build query result from {} record batches with {} rows",
            value.collection.len(),
            rows.len()
        );
        Ok(QueryResult::with_column_types(
            value.base.names,
            rows,
            column_types,
        ))
    }
}

#[cfg(test)]
mod tests {
    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::error::ArrowError;
    use pretty_assertions::assert_eq;

    use super::*;

    fn build_record_batch(
        ids: Vec<i64>,
        names: Vec<Option<&str>>,
    ) -> Result<RecordBatch, ArrowError> {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("first_name", DataType::Utf8, true),
        ]));

        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(ids)),
                Arc::new(StringArray::from(names)),
            ],
        )
    }

    fn build_base() -> BaseQueryResult {
        BaseQueryResult::new(
            vec![LogicalType::Bigint, LogicalType::Varchar],
            vec!["id".to_string(), "first_name".to_string()],
        )
    }

    #[test]
    fn flatten_record_batches_into_rows() -> Result<(), ResultError> {
        let collection = vec![
            build_record_batch(vec![1, 2], vec![Some("Bill"), Some("Gregg")])?,
            build_record_batch(vec![3], vec![None])?,
        ];
        let materialized = MaterializedQueryResult::new(build_base(), collection);
        assert_eq!(materialized.num_rows(), 3);

        let result = QueryResult::try_from(materialized)?;
        assert_eq!(result.columns(), &["id".to_string(), "first_name".to_string()]);
        assert_eq!(result.len(), 3);
        assert_eq!(result[0]["first_name"], ScalarValue::from("Bill"));
        assert_eq!(result.at(-1)?["id"], ScalarValue::from(3i64));
        assert_eq!(result.at(-1)?["first_name"], ScalarValue::String(None));
        Ok(())
    }

    #[test]
    fn column_types_follow_logical_types() -> Result<(), ResultError> {
        let collection = vec![build_record_batch(vec![5], vec![Some("10")])?];
        let materialized = MaterializedQueryResult::new(build_base(), collection);
        let result = QueryResult::try_from(materialized)?;
        assert_eq!(
            result.column_type("id").target_type(),
            Some(LogicalType::Bigint)
        );
        assert_eq!(
            result.cast_value("id", &ScalarValue::from("10"))?,
            ScalarValue::from(10i64)
        );
        Ok(())
    }

    #[test]
    fn empty_collection() -> Result<(), ResultError> {
        let materialized = MaterializedQueryResult::new(build_base(), vec![]);
        let result = QueryResult::try_from(materialized)?;
        assert!(result.is_empty());
        assert_eq!(result.columns().len(), 2);
        assert_eq!(result.last(), None);
        Ok(())
    }

    #[test]
    fn mismatched_batch_width_is_rejected() -> Result<(), ArrowError> {
        let base = BaseQueryResult::new(vec![LogicalType::Bigint], vec!["id".to_string()]);
        let collection = vec![build_record_batch(vec![1], vec![Some("Bill")])?];
        let result = QueryResult::try_from(MaterializedQueryResult::new(base, collection));
        assert!(matches!(result, Err(ResultError::InternalError(_))));
        Ok(())
    }

    #[test]
    fn mismatched_names_and_types_are_rejected() {
        let base = BaseQueryResult::new(vec![], vec!["id".to_string()]);
        let result = QueryResult::try_from(MaterializedQueryResult::new(base, vec![]));
        assert!(matches!(result, Err(ResultError::InternalError(_))));
    }
}
