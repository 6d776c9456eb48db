use thiserror::Error;

/// Core error type shared across rngconf crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The relation violates internal invariants.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

/// Convenience alias for results returned by rngconf crates.
pub type Result<T> = std::result::Result<T, Error>;
