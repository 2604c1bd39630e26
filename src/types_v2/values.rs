use std::fmt;
use std::sync::Arc;

use arrow::array::{
    new_null_array, Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int16Array,
    Int32Array, Int64Array, Int8Array, StringArray, UInt16Array, UInt32Array, UInt64Array,
    UInt8Array,
};
use arrow::datatypes::DataType;

use super::{LogicalType, TypeError};

/// Represents a dynamically typed, nullable single value.
/// This is the single-valued counter-part of arrow’s `Array`.
///
/// Floats compare by bit pattern, so `NaN` equals itself and `0.0` differs
/// from `-0.0`.
#[derive(Clone, Debug)]
pub enum ScalarValue {
    /// represents `DataType::Null` (castable to/from any other type)
    Null,
    /// true or false value
    Boolean(Option<bool>),
    /// 32bit float
    Float32(Option<f32>),
    /// 64bit float
    Float64(Option<f64>),
    /// signed 8bit int
    Int8(Option<i8>),
    /// signed 16bit int
    Int16(Option<i16>),
    /// signed 32bit int
    Int32(Option<i32>),
    /// signed 64bit int
    Int64(Option<i64>),
    /// unsigned 8bit int
    UInt8(Option<u8>),
    /// unsigned 16bit int
    UInt16(Option<u16>),
    /// unsigned 32bit int
    UInt32(Option<u32>),
    /// unsigned 64bit int
    UInt64(Option<u64>),
    /// utf-8 encoded string.
    String(Option<String>),
}

impl PartialEq for ScalarValue {
    fn eq(&self, other: &Self) -> bool {
        use ScalarValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Boolean(l), Boolean(r)) => l == r,
            (Float32(l), Float32(r)) => l.map(f32::to_bits) == r.map(f32::to_bits),
            (Float64(l), Float64(r)) => l.map(f64::to_bits) == r.map(f64::to_bits),
            (Int8(l), Int8(r)) => l == r,
            (Int16(l), Int16(r)) => l == r,
            (Int32(l), Int32(r)) => l == r,
            (Int64(l), Int64(r)) => l == r,
            (UInt8(l), UInt8(r)) => l == r,
            (UInt16(l), UInt16(r)) => l == r,
            (UInt32(l), UInt32(r)) => l == r,
            (UInt64(l), UInt64(r)) => l == r,
            (String(l), String(r)) => l == r,
            _ => false,
        }
    }
}

impl Eq for ScalarValue {}

macro_rules! impl_scalar {
    ($ty:ty, $scalar:tt) => {
        impl From<$ty> for ScalarValue {
            fn from(value: $ty) -> Self {
                ScalarValue::$scalar(Some(value))
            }
        }

        impl From<Option<$ty>> for ScalarValue {
            fn from(value: Option<$ty>) -> Self {
                ScalarValue::$scalar(value)
            }
        }
    };
}

impl_scalar!(f32, Float32);
impl_scalar!(f64, Float64);
impl_scalar!(i8, Int8);
impl_scalar!(i16, Int16);
impl_scalar!(i32, Int32);
impl_scalar!(i64, Int64);
impl_scalar!(u8, UInt8);
impl_scalar!(u16, UInt16);
impl_scalar!(u32, UInt32);
impl_scalar!(u64, UInt64);
impl_scalar!(bool, Boolean);
impl_scalar!(String, String);

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::String(Some(value.to_string()))
    }
}

macro_rules! typed_value {
    ($array:expr, $index:expr, $array_type:ident, $scalar:ident) => {{
        let array = $array
            .as_any()
            .downcast_ref::<$array_type>()
            .ok_or_else(|| {
                TypeError::InternalError(format!(
                    "failed to downcast array to {}",
                    stringify!($array_type)
                ))
            })?;
        ScalarValue::$scalar(if array.is_null($index) {
            None
        } else {
            Some(array.value($index).to_owned())
        })
    }};
}

impl ScalarValue {
    /// Typed null for the given logical type.
    pub fn new_null(logical_type: &LogicalType) -> Self {
        match logical_type {
            LogicalType::SqlNull => ScalarValue::Null,
            LogicalType::Boolean => ScalarValue::Boolean(None),
            LogicalType::Tinyint => ScalarValue::Int8(None),
            LogicalType::UTinyint => ScalarValue::UInt8(None),
            LogicalType::Smallint => ScalarValue::Int16(None),
            LogicalType::USmallint => ScalarValue::UInt16(None),
            LogicalType::Integer => ScalarValue::Int32(None),
            LogicalType::UInteger => ScalarValue::UInt32(None),
            LogicalType::Bigint => ScalarValue::Int64(None),
            LogicalType::UBigint => ScalarValue::UInt64(None),
            LogicalType::Float => ScalarValue::Float32(None),
            LogicalType::Double => ScalarValue::Float64(None),
            LogicalType::Varchar => ScalarValue::String(None),
        }
    }

    pub fn get_logical_type(&self) -> LogicalType {
        match self {
            ScalarValue::Null => LogicalType::SqlNull,
            ScalarValue::Boolean(_) => LogicalType::Boolean,
            ScalarValue::Float32(_) => LogicalType::Float,
            ScalarValue::Float64(_) => LogicalType::Double,
            ScalarValue::Int8(_) => LogicalType::Tinyint,
            ScalarValue::Int16(_) => LogicalType::Smallint,
            ScalarValue::Int32(_) => LogicalType::Integer,
            ScalarValue::Int64(_) => LogicalType::Bigint,
            ScalarValue::UInt8(_) => LogicalType::UTinyint,
            ScalarValue::UInt16(_) => LogicalType::USmallint,
            ScalarValue::UInt32(_) => LogicalType::UInteger,
            ScalarValue::UInt64(_) => LogicalType::UBigint,
            ScalarValue::String(_) => LogicalType::Varchar,
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            ScalarValue::Null => true,
            ScalarValue::Boolean(v) => v.is_none(),
            ScalarValue::Float32(v) => v.is_none(),
            ScalarValue::Float64(v) => v.is_none(),
            ScalarValue::Int8(v) => v.is_none(),
            ScalarValue::Int16(v) => v.is_none(),
            ScalarValue::Int32(v) => v.is_none(),
            ScalarValue::Int64(v) => v.is_none(),
            ScalarValue::UInt8(v) => v.is_none(),
            ScalarValue::UInt16(v) => v.is_none(),
            ScalarValue::UInt32(v) => v.is_none(),
            ScalarValue::UInt64(v) => v.is_none(),
            ScalarValue::String(v) => v.is_none(),
        }
    }

    /// Wraps the value into a single-element arrow array.
    pub fn to_array(&self) -> ArrayRef {
        match self {
            ScalarValue::Null => new_null_array(&DataType::Null, 1),
            ScalarValue::Boolean(v) => Arc::new(BooleanArray::from(vec![*v])),
            ScalarValue::Float32(v) => Arc::new(Float32Array::from(vec![*v])),
            ScalarValue::Float64(v) => Arc::new(Float64Array::from(vec![*v])),
            ScalarValue::Int8(v) => Arc::new(Int8Array::from(vec![*v])),
            ScalarValue::Int16(v) => Arc::new(Int16Array::from(vec![*v])),
            ScalarValue::Int32(v) => Arc::new(Int32Array::from(vec![*v])),
            ScalarValue::Int64(v) => Arc::new(Int64Array::from(vec![*v])),
            ScalarValue::UInt8(v) => Arc::new(UInt8Array::from(vec![*v])),
            ScalarValue::UInt16(v) => Arc::new(UInt16Array::from(vec![*v])),
            ScalarValue::UInt32(v) => Arc::new(UInt32Array::from(vec![*v])),
            ScalarValue::UInt64(v) => Arc::new(UInt64Array::from(vec![*v])),
            ScalarValue::String(v) => Arc::new(StringArray::from(vec![v.as_deref()])),
        }
    }

    /// Reads the value at `index` out of an arrow array.
    pub fn try_from_array(array: &ArrayRef, index: usize) -> Result<Self, TypeError> {
        if index >= array.len() {
            return Err(TypeError::InternalError(format!(
                "index {} out of bounds for array of length {}",
                index,
                array.len()
            )));
        }
        let value = match array.data_type() {
            DataType::Null => ScalarValue::Null,
            DataType::Boolean => typed_value!(array, index, BooleanArray, Boolean),
            DataType::Float32 => typed_value!(array, index, Float32Array, Float32),
            DataType::Float64 => typed_value!(array, index, Float64Array, Float64),
            DataType::Int8 => typed_value!(array, index, Int8Array, Int8),
            DataType::Int16 => typed_value!(array, index, Int16Array, Int16),
            DataType::Int32 => typed_value!(array, index, Int32Array, Int32),
            DataType::Int64 => typed_value!(array, index, Int64Array, Int64),
            DataType::UInt8 => typed_value!(array, index, UInt8Array, UInt8),
            DataType::UInt16 => typed_value!(array, index, UInt16Array, UInt16),
            DataType::UInt32 => typed_value!(array, index, UInt32Array, UInt32),
            DataType::UInt64 => typed_value!(array, index, UInt64Array, UInt64),
            DataType::Utf8 => typed_value!(array, index, StringArray, String),
            other => return Err(TypeError::UnsupportedArrowType(other.to_string())),
        };
        Ok(value)
    }
}

macro_rules! format_option {
    ($f:expr, $value:expr) => {
        match $value {
            Some(v) => write!($f, "{}", v),
            None => write!($f, "NULL"),
        }
    };
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScalarValue::Null => write!(f, "NULL"),
            ScalarValue::Boolean(v) => format_option!(f, v),
            ScalarValue::Float32(v) => format_option!(f, v),
            ScalarValue::Float64(v) => format_option!(f, v),
            ScalarValue::Int8(v) => format_option!(f, v),
            ScalarValue::Int16(v) => format_option!(f, v),
            ScalarValue::Int32(v) => format_option!(f, v),
            ScalarValue::Int64(v) => format_option!(f, v),
            ScalarValue::UInt8(v) => format_option!(f, v),
            ScalarValue::UInt16(v) => format_option!(f, v),
            ScalarValue::UInt32(v) => format_option!(f, v),
            ScalarValue::UInt64(v) => format_option!(f, v),
            ScalarValue::String(v) => format_option!(f, v),
        }
    }
}
