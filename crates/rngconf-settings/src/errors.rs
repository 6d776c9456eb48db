use thiserror::Error;

/// Errors raised by a persistence medium.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid settings file: {0}")]
    Invalid(String),
}

/// Result type for persistence operations.
pub type PersistResult<T> = std::result::Result<T, PersistError>;
