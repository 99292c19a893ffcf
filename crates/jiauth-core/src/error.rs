//! Error types for parsing JIAuth values.

use thiserror::Error;

/// A result type using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur when parsing values defined by the JIAuth service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The user ID is not an integer.
    #[error("invalid user ID: {0:?}")]
    InvalidUserId(String),

    /// The ticket is empty.
    #[error("ticket must not be empty")]
    EmptyTicket,
}
