use std::sync::Arc;

use arrow::compute::{cast_with_options, CastOptions};
use arrow::datatypes::DataType;

use super::{CastFunction, ColumnCast, ColumnCastRef};
use crate::function::FunctionError;
use crate::types_v2::{LogicalType, ScalarValue};

lazy_static! {
    /// Shared no-op strategy for columns without an explicit type.
    pub static ref IDENTITY_CAST: ColumnCastRef = Arc::new(IdentityCast);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityCast;

impl ColumnCast for IdentityCast {
    fn cast(&self, value: &ScalarValue) -> Result<ScalarValue, FunctionError> {
        Ok(value.clone())
    }
}

pub struct DefaultCastFunctions;

impl DefaultCastFunctions {
    fn default_cast_function(
        value: &ScalarValue,
        to_type: &LogicalType,
        try_cast: bool,
    ) -> Result<ScalarValue, FunctionError> {
        if &value.get_logical_type() == to_type {
            return Ok(value.clone());
        }
        if value.is_null() {
            return Ok(ScalarValue::new_null(to_type));
        }
        let array = value.to_array();
        let data_type: DataType = to_type.clone().into();
        let options = CastOptions { safe: try_cast };
        let casted = cast_with_options(&array, &data_type, &options)?;
        Ok(ScalarValue::try_from_array(&casted, 0)?)
    }

    pub fn get_cast_function(
        target: &LogicalType,
        try_cast: bool,
    ) -> Result<CastFunction, FunctionError> {
        match target {
            LogicalType::SqlNull => Err(FunctionError::CastError(
                "can not cast values to the NULL type".to_string(),
            )),
            _ => Ok(CastFunction::new(
                target.clone(),
                try_cast,
                Self::default_cast_function,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case("42".into(), LogicalType::Integer, 42i32.into())]
    #[test_case(7i32.into(), LogicalType::Varchar, "7".into())]
    #[test_case(7i8.into(), LogicalType::Bigint, 7i64.into())]
    #[test_case(1i32.into(), LogicalType::Double, 1.0f64.into())]
    #[test_case(ScalarValue::Null, LogicalType::Integer, ScalarValue::Int32(None))]
    #[test_case(ScalarValue::String(None), LogicalType::Boolean, ScalarValue::Boolean(None))]
    fn cast_to_target_type(value: ScalarValue, target: LogicalType, expected: ScalarValue) {
        let function = DefaultCastFunctions::get_cast_function(&target, false).unwrap();
        assert_eq!(function.cast(&value).unwrap(), expected);
        assert_eq!(function.target_type(), Some(target));
    }

    #[test]
    fn try_cast_turns_bad_input_into_null() {
        let function =
            DefaultCastFunctions::get_cast_function(&LogicalType::Integer, true).unwrap();
        assert_eq!(function.cast(&"abc".into()).unwrap(), ScalarValue::Int32(None));
    }

    #[test]
    fn strict_cast_reports_bad_input() {
        let function =
            DefaultCastFunctions::get_cast_function(&LogicalType::Integer, false).unwrap();
        let result = function.cast(&"abc".into());
        assert!(matches!(result, Err(FunctionError::ArrowError(_))));
    }

    #[test]
    fn null_type_has_no_cast_function() {
        let result = DefaultCastFunctions::get_cast_function(&LogicalType::SqlNull, false);
        assert!(matches!(result, Err(FunctionError::CastError(_))));
    }

    #[test]
    fn identity_cast_returns_input() {
        let value = ScalarValue::from("unchanged");
        assert_eq!(IDENTITY_CAST.cast(&value).unwrap(), value);
        assert_eq!(IDENTITY_CAST.target_type(), None);
    }

    #[test]
    fn identity_cast_is_shared() {
        let first = IDENTITY_CAST.clone();
        let second = IDENTITY_CAST.clone();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
