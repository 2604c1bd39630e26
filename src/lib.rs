#[macro_use]
extern crate lazy_static;

pub mod function;
pub mod main_entry;
pub mod types_v2;
pub mod util;

pub use self::main_entry::{
    BaseQueryResult, MaterializedQueryResult, QueryResult, QueryResultBuilder, Record,
    ResultError, RowLengthPolicy,
};
