//! Identifier types for JIAuth users and tickets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A JIAuth user identifier.
///
/// The service uses plain integers. Parsing from a string accepts numeric text
/// such as `"6"`, so user IDs read from forms or URLs serialize as JSON numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Create a `UserId` from its numeric value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Return the numeric value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| CoreError::InvalidUserId(s.to_string()))
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<u32> for UserId {
    fn from(id: u32) -> Self {
        Self(i64::from(id))
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// An opaque ticket issued by the JIAuth service.
///
/// Tickets identify a login, registration or grant event. The client never
/// inspects their content.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticket(String);

impl Ticket {
    /// Wrap a ticket string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is empty.
    pub fn new(ticket: impl Into<String>) -> Result<Self, CoreError> {
        let ticket = ticket.into();
        if ticket.is_empty() {
            return Err(CoreError::EmptyTicket);
        }
        Ok(Self(ticket))
    }

    /// Wrap a ticket exactly as the service issued it, even if empty.
    #[must_use]
    pub fn from_issued(ticket: impl Into<String>) -> Self {
        Self(ticket.into())
    }

    /// Return the ticket as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the ticket and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

// Tickets are bearer credentials.
impl fmt::Debug for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Ticket(..)")
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticket {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Ticket {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_parses_numeric_strings() {
        assert_eq!("6".parse::<UserId>().unwrap(), UserId::new(6));
        assert_eq!(" 42 ".parse::<UserId>().unwrap(), UserId::new(42));
    }

    #[test]
    fn user_id_rejects_non_numeric() {
        assert!("six".parse::<UserId>().is_err());
        assert!("".parse::<UserId>().is_err());
        assert!("6.5".parse::<UserId>().is_err());
    }

    #[test]
    fn user_id_serializes_as_number() {
        let id: UserId = "6".parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "6");

        let parsed: UserId = serde_json::from_str("17").unwrap();
        assert_eq!(parsed.get(), 17);
    }

    #[test]
    fn ticket_rejects_empty() {
        assert_eq!(Ticket::new(""), Err(CoreError::EmptyTicket));
    }

    #[test]
    fn issued_ticket_may_be_empty() {
        assert_eq!(Ticket::from_issued("").as_str(), "");
        assert_eq!(Ticket::from_issued("abc123"), Ticket::new("abc123").unwrap());
    }

    #[test]
    fn ticket_debug_hides_value() {
        let ticket = Ticket::new("abc123").unwrap();
        assert_eq!(format!("{ticket:?}"), "Ticket(..)");
        assert_eq!(ticket.to_string(), "abc123");
    }

    #[test]
    fn ticket_serde_is_transparent() {
        let ticket: Ticket = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(ticket.as_str(), "abc123");
        assert_eq!(serde_json::to_string(&ticket).unwrap(), "\"abc123\"");
    }
}
