use arrow::datatypes::DataType;

use super::TypeError;

/// Sqlrs type conversion:
/// LogicalType <-> arrow::datatypes::DataType
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogicalType {
    SqlNull,
    Boolean,
    Tinyint,
    UTinyint,
    Smallint,
    USmallint,
    Integer,
    UInteger,
    Bigint,
    UBigint,
    Float,
    Double,
    Varchar,
}

impl LogicalType {
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            LogicalType::Tinyint
                | LogicalType::UTinyint
                | LogicalType::Smallint
                | LogicalType::USmallint
                | LogicalType::Integer
                | LogicalType::UInteger
                | LogicalType::Bigint
                | LogicalType::UBigint
                | LogicalType::Float
                | LogicalType::Double
        )
    }
}

impl From<LogicalType> for DataType {
    fn from(value: LogicalType) -> Self {
        match value {
            LogicalType::SqlNull => DataType::Null,
            LogicalType::Boolean => DataType::Boolean,
            LogicalType::Tinyint => DataType::Int8,
            LogicalType::UTinyint => DataType::UInt8,
            LogicalType::Smallint => DataType::Int16,
            LogicalType::USmallint => DataType::UInt16,
            LogicalType::Integer => DataType::Int32,
            LogicalType::UInteger => DataType::UInt32,
            LogicalType::Bigint => DataType::Int64,
            LogicalType::UBigint => DataType::UInt64,
            LogicalType::Float => DataType::Float32,
            LogicalType::Double => DataType::Float64,
            LogicalType::Varchar => DataType::Utf8,
        }
    }
}

impl TryFrom<&DataType> for LogicalType {
    type Error = TypeError;

    fn try_from(value: &DataType) -> Result<Self, Self::Error> {
        match value {
            DataType::Null => Ok(LogicalType::SqlNull),
            DataType::Boolean => Ok(LogicalType::Boolean),
            DataType::Int8 => Ok(LogicalType::Tinyint),
            DataType::UInt8 => Ok(LogicalType::UTinyint),
            DataType::Int16 => Ok(LogicalType::Smallint),
            DataType::UInt16 => Ok(LogicalType::USmallint),
            DataType::Int32 => Ok(LogicalType::Integer),
            DataType::UInt32 => Ok(LogicalType::UInteger),
            DataType::Int64 => Ok(LogicalType::Bigint),
            DataType::UInt64 => Ok(LogicalType::UBigint),
            DataType::Float32 => Ok(LogicalType::Float),
            DataType::Float64 => Ok(LogicalType::Double),
            DataType::Utf8 => Ok(LogicalType::Varchar),
            other => Err(TypeError::UnsupportedArrowType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(LogicalType::Boolean)]
    #[test_case(LogicalType::UTinyint)]
    #[test_case(LogicalType::Integer)]
    #[test_case(LogicalType::Double)]
    #[test_case(LogicalType::Varchar)]
    fn logical_type_survives_arrow_conversion(logical_type: LogicalType) {
        let data_type: DataType = logical_type.clone().into();
        assert_eq!(LogicalType::try_from(&data_type).unwrap(), logical_type);
    }

    #[test]
    fn unsupported_arrow_type_is_rejected() {
        let result = LogicalType::try_from(&DataType::Date32);
        assert!(matches!(result, Err(TypeError::UnsupportedArrowType(_))));
    }

    #[test]
    fn numeric_types() {
        assert!(LogicalType::Bigint.is_numeric());
        assert!(LogicalType::Float.is_numeric());
        assert!(!LogicalType::Varchar.is_numeric());
        assert!(!LogicalType::SqlNull.is_numeric());
    }
}
