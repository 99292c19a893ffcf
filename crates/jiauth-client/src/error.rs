//! Client error types.
//!
//! Errors reported by the service itself are not here: they arrive as
//! [`ApiResponse::Failure`](crate::ApiResponse::Failure).

use thiserror::Error;

/// A result type using `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that prevent a JIAuth call from producing a service response.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The client configuration cannot be used to build requests.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    /// The service could not be reached or the response could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body is not JSON, or not the shape the endpoint documents.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Returns `true` if the service was never heard from.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
