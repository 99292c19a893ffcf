//! Core types shared by the JIAuth client crates.
//!
//! This crate holds the values the remote JIAuth service defines and the client
//! only passes through:
//!
//! - **Error codes**: the numeric `errorCode` values carried by error responses
//! - **Ticket types**: the kinds of tickets the service issues, and which of them
//!   count as a valid login
//! - **Identifiers**: `UserId` and `Ticket`
//!
//! # Example
//!
//! ```
//! use jiauth_core::{ErrorCode, TicketType, UserId};
//!
//! let user: UserId = "6".parse().unwrap();
//! assert_eq!(user.get(), 6);
//!
//! assert!(TicketType::EmailConfirm.is_valid_login());
//! assert!(!TicketType::Register.is_valid_login());
//!
//! assert_eq!(ErrorCode::UNKNOWN_APP.get(), 102);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod codes;
pub mod error;
pub mod ids;

pub use codes::{ErrorCode, TicketType, VALID_LOGIN_TYPES};
pub use error::{CoreError, Result};
pub use ids::{Ticket, UserId};
