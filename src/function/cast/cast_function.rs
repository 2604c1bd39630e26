use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use derive_new::new;

use crate::function::FunctionError;
use crate::types_v2::{LogicalType, ScalarValue};

/// Turns a raw column value into its cast value.
pub trait ColumnCast: Debug + Send + Sync {
    fn cast(&self, value: &ScalarValue) -> Result<ScalarValue, FunctionError>;

    /// The type produced by `cast`, `None` when the input type is kept.
    fn target_type(&self) -> Option<LogicalType> {
        None
    }
}

pub type ColumnCastRef = Arc<dyn ColumnCast>;

/// Casting strategy per column name.
pub type ColumnTypes = HashMap<String, ColumnCastRef>;

pub type CastFunc = fn(
    value: &ScalarValue,
    to_type: &LogicalType,
    try_cast: bool,
) -> Result<ScalarValue, FunctionError>;

#[derive(new, Clone)]
pub struct CastFunction {
    /// The target type of the cast
    pub(crate) target: LogicalType,
    /// Produce a typed null instead of an error for unconvertible values
    pub(crate) try_cast: bool,
    /// The main cast function to execute
    pub(crate) function: CastFunc,
}

impl ColumnCast for CastFunction {
    fn cast(&self, value: &ScalarValue) -> Result<ScalarValue, FunctionError> {
        (self.function)(value, &self.target, self.try_cast)
    }

    fn target_type(&self) -> Option<LogicalType> {
        Some(self.target.clone())
    }
}

impl std::fmt::Debug for CastFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CastFunction")
            .field("cast", &format!("-> {:?}", self.target))
            .field("try_cast", &self.try_cast)
            .finish()
    }
}
