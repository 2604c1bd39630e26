mod errors;
mod types;
mod values;

pub use errors::*;
pub use types::*;
pub use values::*;
