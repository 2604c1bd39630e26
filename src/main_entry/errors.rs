use arrow::error::ArrowError;
use derive_builder::UninitializedFieldError;

use crate::function::FunctionError;
use crate::types_v2::TypeError;

#[derive(thiserror::Error, Debug)]
pub enum ResultError {
    #[error("index {index} out of range for {len} records")]
    IndexOutOfRange { index: isize, len: usize },
    #[error("row {row} has {actual} values but the result has {expected} columns")]
    MalformedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("uninitialized field: {0}")]
    UninitializedField(&'static str),
    #[error("type error: {0}")]
    TypeError(
        #[source]
        #[from]
        TypeError,
    ),
    #[error("Function error: {0}")]
    FunctionError(
        #[source]
        #[from]
        FunctionError,
    ),
    #[error("Arrow error: {0}")]
    ArrowError(
        #[source]
        #[from]
        ArrowError,
    ),
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<UninitializedFieldError> for ResultError {
    fn from(err: UninitializedFieldError) -> Self {
        ResultError::UninitializedField(err.field_name())
    }
}
