//! Error types for sqlweave

use thiserror::Error;

/// Result type alias for rendering operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors returned while rendering a fragment or statement.
///
/// Every error aborts the render it happened in; nested fragments propagate
/// their errors to the enclosing statement unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqlError {
    /// A required clause is missing or two clauses cannot be combined
    #[error("{0}")]
    Validation(String),

    /// An argument is incompatible with the operator it was given to
    #[error("{0}")]
    InvalidArgument(String),

    /// A deferred value producer failed
    #[error("valuer error: {0}")]
    Valuer(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Unrecognized placeholder format name
    #[error("unknown placeholder format: {0}")]
    InvalidPlaceholderFormat(String),
}

impl SqlError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a valuer error
    pub fn valuer(message: impl Into<String>) -> Self {
        Self::Valuer(message.into())
    }
}

impl From<serde_json::Error> for SqlError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
