#[derive(thiserror::Error, Debug)]
pub enum TypeError {
    #[error("unsupported arrow type: {0}")]
    UnsupportedArrowType(String),
    #[error("Internal error: {0}")]
    InternalError(String),
}
