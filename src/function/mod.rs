mod cast;
mod errors;

pub use cast::*;
pub use errors::*;
