use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid colour: {0}")]
    InvalidColor(String),

    #[error("invalid role: {0}")]
    InvalidRole(String),
}
