use thiserror::Error;

/// Result alias for errors emitted by eslint-suppress internals.
pub type SuppressResult<T> = Result<T, SuppressError>;

/// Structured error type for eslint-suppress subsystems.
#[derive(Debug, Error)]
pub enum SuppressError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("linter failure: {0}")]
    Linter(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SuppressError {
    pub fn linter(msg: impl Into<String>) -> Self {
        Self::Linter(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
