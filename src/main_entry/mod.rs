mod errors;
mod materialized_query_result;
mod query_result;
mod record;

pub use errors::*;
pub use materialized_query_result::*;
pub use query_result::*;
pub use record::*;
