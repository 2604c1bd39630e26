mod cast_function;
mod default_cast;

pub use cast_function::*;
pub use default_cast::*;
