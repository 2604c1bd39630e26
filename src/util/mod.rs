use crate::main_entry::{QueryResult, Record};
use crate::types_v2::ScalarValue;

/// follow rules: https://www.sqlite.org/sqllogictest/doc/trunk/about.wiki
/// NULL values are rendered as "NULL".
/// Empty strings are rendered as "(empty)".
pub fn record_to_string(record: &Record) -> String {
    let mut output = String::new();
    for (idx, value) in record.values().enumerate() {
        if idx != 0 {
            output.push(' ');
        }
        match value {
            ScalarValue::String(Some(s)) if s.is_empty() => output.push_str("(empty)"),
            other => output.push_str(&other.to_string()),
        }
    }
    output
}

/// One line per record.
pub fn query_result_to_string(result: &QueryResult) -> String {
    let mut output = String::new();
    for record in result {
        output.push_str(&record_to_string(record));
        output.push('\n');
    }
    output
}
