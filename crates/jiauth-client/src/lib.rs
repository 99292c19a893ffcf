//! HTTP client for the JIAuth identity service.
//!
//! This crate wraps the five JIAuth endpoints an application uses:
//!
//! - Ticket lookup (`GET api/ticket/{ticket}`)
//! - User profile lookup (`GET api/user/{userId}`)
//! - Group membership changes (`POST`/`DELETE api/groups/{group}/members`)
//! - Inter-application login (`GET api/app_login/{clientId}`)
//!
//! Every request is authenticated with the `X-Client-Id` and `X-Client-Secret`
//! headers. The service reports failures in-band with an `errorCode` field;
//! those come back as [`ApiResponse::Failure`], never as an `Err`. An `Err`
//! means the request could not be completed or its response could not be read.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐
//! │   Application    │────▶│   IdentityApi    │
//! │                  │     │   (trait)        │
//! └──────────────────┘     └────────┬─────────┘
//!                                   │
//!                          ┌────────▼─────────┐
//!                          │   AuthClient     │
//!                          │   (reqwest)      │
//!                          └────────┬─────────┘
//!                                   │ HTTP + X-Client-* headers
//!                          ┌────────▼─────────┐
//!                          │   JIAuth         │
//!                          │   service        │
//!                          └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use jiauth_client::{ApiResponse, AuthClient, ClientConfig, IdentityApi};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new("http://localhost:9000", "first_app", "first_app_secret");
//! let client = AuthClient::new(config)?;
//!
//! match client.login("other_app").await? {
//!     ApiResponse::Success(ticket) => println!("ticket: {ticket}"),
//!     ApiResponse::Failure(err) => println!("login refused: {}", err.error_code),
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fmt;

use serde::Deserialize;

pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use api::IdentityApi;
pub use client::AuthClient;
pub use error::{ClientError, Result};
pub use types::{
    Address, ApiError, ApiResponse, AppTicketResult, LoginValue, MembershipRequest, UserDetails,
    UserProfile,
};

pub use jiauth_core::{ErrorCode, Ticket, TicketType, UserId, VALID_LOGIN_TYPES};

#[cfg(any(test, feature = "test-utils"))]
pub use api::MockIdentityApi;

/// Connection settings for a JIAuth service.
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the service (e.g., `http://localhost:9000`).
    pub base_url: String,
    /// Client id of this application, sent as `X-Client-Id`.
    pub client_id: String,
    /// Client secret of this application, sent as `X-Client-Secret`.
    pub client_secret: String,
}

impl ClientConfig {
    /// Create a configuration from its three values.
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Build the absolute URL for an endpoint path such as `api/user/6`.
    #[must_use]
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls() {
        let config = ClientConfig::new("http://localhost:9000", "first_app", "secret");
        assert_eq!(
            config.endpoint_url("api/ticket/abc"),
            "http://localhost:9000/api/ticket/abc"
        );

        let config = ClientConfig::new("http://localhost:9000/", "first_app", "secret");
        assert_eq!(
            config.endpoint_url("api/user/6"),
            "http://localhost:9000/api/user/6"
        );
    }

    #[test]
    fn debug_redacts_secret() {
        let config = ClientConfig::new("http://localhost:9000", "first_app", "first_app_secret");
        let debug = format!("{config:?}");
        assert!(debug.contains("first_app"));
        assert!(!debug.contains("first_app_secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn config_deserializes() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"base_url":"http://auth:9000","client_id":"a","client_secret":"b"}"#,
        )
        .unwrap();
        assert_eq!(config.base_url, "http://auth:9000");
        assert_eq!(config.client_id, "a");
        assert_eq!(config.client_secret, "b");
    }

    #[test]
    fn client_error_transport_flag() {
        assert!(!ClientError::Decode("bad".into()).is_transport());
        assert!(!ClientError::InvalidConfig("bad".into()).is_transport());
    }
}
