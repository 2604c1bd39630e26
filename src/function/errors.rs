use arrow::error::ArrowError;

use crate::types_v2::TypeError;

#[derive(thiserror::Error, Debug)]
pub enum FunctionError {
    #[error("type error: {0}")]
    TypeError(
        #[from]
        #[source]
        TypeError,
    ),
    #[error("arrow error: {0}")]
    ArrowError(
        #[from]
        #[source]
        ArrowError,
    ),
    #[error("Cast error: {0}")]
    CastError(String),
}
