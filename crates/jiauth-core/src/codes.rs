//! Error codes and ticket types defined by the JIAuth service.
//!
//! Both sets are owned by the remote service. The client passes error codes
//! through unchanged, including ones it does not know.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric `errorCode` returned by the JIAuth service.
///
/// Known codes are available as associated constants. Any other value is kept
/// as-is so that newer service codes still reach the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(i64);

impl ErrorCode {
    /// `E_UNKNOWN_ERROR`
    pub const UNKNOWN_ERROR: Self = Self(100);
    /// `E_MISSING_DATA`
    pub const MISSING_DATA: Self = Self(101);
    /// `E_UNKNOWN_APP`: the client id is not registered.
    pub const UNKNOWN_APP: Self = Self(102);
    /// `E_INVALID_APP_SECRET`
    pub const INVALID_APP_SECRET: Self = Self(103);
    /// `E_INVALID_CAPTCHA`
    pub const INVALID_CAPTCHA: Self = Self(104);
    /// `E_INVALID_TICKET`. Shares its value with [`Self::GROUP_NOT_FOUND`].
    pub const INVALID_TICKET: Self = Self(201);
    /// `E_GROUP_NOT_FOUND`. Shares its value with [`Self::INVALID_TICKET`].
    pub const GROUP_NOT_FOUND: Self = Self(201);
    /// `E_USER_NOT_FOUND`
    pub const USER_NOT_FOUND: Self = Self(202);
    /// `E_MISSING_PERMISSION`
    pub const MISSING_PERMISSION: Self = Self(203);

    /// Every distinct code the service documents, in ascending order.
    pub const KNOWN: [Self; 8] = [
        Self::UNKNOWN_ERROR,
        Self::MISSING_DATA,
        Self::UNKNOWN_APP,
        Self::INVALID_APP_SECRET,
        Self::INVALID_CAPTCHA,
        Self::INVALID_TICKET,
        Self::USER_NOT_FOUND,
        Self::MISSING_PERMISSION,
    ];

    /// Wrap a raw code.
    #[must_use]
    pub const fn new(code: i64) -> Self {
        Self(code)
    }

    /// Return the raw numeric value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Returns `true` if the service documents this code.
    #[must_use]
    pub const fn is_known(self) -> bool {
        matches!(self.0, 100..=104 | 201..=203)
    }

    /// Return the service's symbolic name for this code, if known.
    ///
    /// Code 201 is defined twice by the service (`E_INVALID_TICKET` and
    /// `E_GROUP_NOT_FOUND`), so both names are returned for it.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            100 => Some("E_UNKNOWN_ERROR"),
            101 => Some("E_MISSING_DATA"),
            102 => Some("E_UNKNOWN_APP"),
            103 => Some("E_INVALID_APP_SECRET"),
            104 => Some("E_INVALID_CAPTCHA"),
            201 => Some("E_INVALID_TICKET|E_GROUP_NOT_FOUND"),
            202 => Some("E_USER_NOT_FOUND"),
            203 => Some("E_MISSING_PERMISSION"),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({name})", self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

impl From<i64> for ErrorCode {
    fn from(code: i64) -> Self {
        Self(code)
    }
}

impl From<ErrorCode> for i64 {
    fn from(code: ErrorCode) -> Self {
        code.0
    }
}

/// The kind of event a ticket was issued for.
///
/// Types the service adds later decode as [`TicketType::Other`] and keep
/// their wire value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TicketType {
    /// Plain login.
    Login,
    /// Account registration.
    Register,
    /// Registration of an already registered email.
    DoubleRegister,
    /// Email address confirmation.
    EmailConfirm,
    /// Password reset.
    PasswordReset,
    /// User explicitly granted access to the application.
    ExplicitGrant,
    /// Inter-application login.
    App,
    /// A type this client does not know.
    Other(String),
}

/// Ticket types that authenticate a user.
///
/// The client does not enforce this; callers check it themselves with
/// [`TicketType::is_valid_login`].
pub const VALID_LOGIN_TYPES: [TicketType; 5] = [
    TicketType::Login,
    TicketType::EmailConfirm,
    TicketType::PasswordReset,
    TicketType::ExplicitGrant,
    TicketType::App,
];

impl TicketType {
    /// All ticket types the service documents, in its declaration order.
    pub const KNOWN: [Self; 7] = [
        Self::Login,
        Self::Register,
        Self::DoubleRegister,
        Self::EmailConfirm,
        Self::PasswordReset,
        Self::ExplicitGrant,
        Self::App,
    ];

    /// Return the wire value of this ticket type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Login => "T_LOGIN",
            Self::Register => "T_REGISTER",
            Self::DoubleRegister => "T_DOUBLE_REGISTER",
            Self::EmailConfirm => "T_EMAIL_CONFIRM",
            Self::PasswordReset => "T_PASSWORD_RESET",
            Self::ExplicitGrant => "T_EXPLICIT_GRANT",
            Self::App => "T_APP",
            Self::Other(value) => value.as_str(),
        }
    }

    /// Returns `true` unless this is [`TicketType::Other`].
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Returns `true` if a ticket of this type authenticates a user.
    ///
    /// Unknown types never do.
    #[must_use]
    pub const fn is_valid_login(&self) -> bool {
        matches!(
            self,
            Self::Login | Self::EmailConfirm | Self::PasswordReset | Self::ExplicitGrant | Self::App
        )
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for TicketType {
    fn from(value: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|t| t.as_str() == value)
            .unwrap_or_else(|| Self::Other(value.to_string()))
    }
}

impl From<String> for TicketType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<TicketType> for String {
    fn from(ticket_type: TicketType) -> Self {
        match ticket_type {
            TicketType::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}
