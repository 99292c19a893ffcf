//! Request and response shapes for the JIAuth API.
//!
//! Field names follow the service's camelCase JSON.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use jiauth_core::{ErrorCode, Ticket, TicketType, UserId};

use crate::error::{ClientError, Result};

/// Name and phone number of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Phone number, if the user gave one.
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Postal address of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street address.
    pub address: String,
    /// Second address line.
    #[serde(default)]
    pub address_complement: Option<String>,
    /// Postal code.
    pub post_code: String,
    /// Region or state.
    pub region: String,
    /// Country.
    pub country: String,
}

/// A user profile as returned by `api/user/{userId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User ID.
    pub id: UserId,
    /// Email address.
    pub email: String,
    /// Personal details.
    pub details: UserDetails,
    /// Postal address.
    pub address: Address,
}

/// The result of looking up a ticket with `api/ticket/{ticket}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppTicketResult {
    /// ID of the user the ticket was issued for.
    pub user_id: UserId,
    /// Email of that user.
    pub user_email: String,
    /// What the ticket was issued for.
    pub ticket_type: TicketType,
    /// Groups the user belongs to.
    #[serde(default)]
    pub groups: Vec<String>,
    /// Full profile of the user.
    pub user: UserProfile,
}

/// The service's error envelope: `{"errorCode": <int>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("JIAuth error {error_code}")]
pub struct ApiError {
    /// The reported error code.
    #[serde(rename = "errorCode")]
    pub error_code: ErrorCode,
}

impl ApiError {
    /// Create an error envelope for a code.
    #[must_use]
    pub const fn new(error_code: ErrorCode) -> Self {
        Self { error_code }
    }

    /// Extract the error envelope from a decoded response, if it is one.
    ///
    /// A missing or `null` `errorCode` means the response is not an error.
    ///
    /// # Errors
    ///
    /// Returns `Decode` if `errorCode` is present but not an integer.
    pub fn from_value(value: &Value) -> Result<Option<Self>> {
        match value.get("errorCode") {
            None | Some(Value::Null) => Ok(None),
            Some(code) => code
                .as_i64()
                .map(|code| Some(Self::new(ErrorCode::new(code))))
                .ok_or_else(|| {
                    ClientError::Decode(format!("errorCode is not an integer: {code}"))
                }),
        }
    }
}

/// Either the payload an endpoint documents or the service's error envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse<T> {
    /// The service accepted the request.
    Success(T),
    /// The service answered with an `errorCode`.
    Failure(ApiError),
}

impl<T> ApiResponse<T> {
    /// Returns `true` for `Success`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Return the error code of a `Failure`.
    #[must_use]
    pub const fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Success(_) => None,
            Self::Failure(err) => Some(err.error_code),
        }
    }

    /// Return a reference to the payload of a `Success`.
    #[must_use]
    pub const fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Convert into a `Result`, turning the error envelope into `Err`.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of a `Failure`.
    pub fn into_result(self) -> std::result::Result<T, ApiError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(err) => Err(err),
        }
    }
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Decode a response: the error envelope if `errorCode` is set, `T` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `Decode` if the value is neither an error envelope nor a `T`.
    pub fn from_value(value: Value) -> Result<Self> {
        if let Some(err) = ApiError::from_value(&value)? {
            return Ok(Self::Failure(err));
        }
        serde_json::from_value(value)
            .map(Self::Success)
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

impl ApiResponse<()> {
    /// Interpret a group membership response.
    ///
    /// Anything without an `errorCode`, including an empty body, is a success.
    ///
    /// # Errors
    ///
    /// Returns `Decode` if `errorCode` is present but not an integer.
    pub fn membership_from_value(value: &Value) -> Result<Self> {
        Ok(match ApiError::from_value(value)? {
            Some(err) => Self::Failure(err),
            None => Self::Success(()),
        })
    }
}

/// Second element of a login result pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValue {
    /// The ticket issued for the other application.
    Ticket(Ticket),
    /// Why the login was refused.
    ErrorCode(ErrorCode),
}

impl ApiResponse<Ticket> {
    /// Interpret an `api/app_login` response.
    ///
    /// The presence of a `ticket` field decides success, even if an
    /// `errorCode` is also present. An empty ticket string is still a
    /// success and is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `Decode` if the ticket is not a string, or if the response
    /// carries neither a ticket nor an error code.
    pub fn login_from_value(value: &Value) -> Result<Self> {
        match value.get("ticket") {
            None | Some(Value::Null) => match ApiError::from_value(value)? {
                Some(err) => Ok(Self::Failure(err)),
                None => Err(ClientError::Decode(
                    "login response has neither ticket nor errorCode".to_string(),
                )),
            },
            Some(Value::String(ticket)) => Ok(Self::Success(Ticket::from_issued(ticket.as_str()))),
            Some(other) => Err(ClientError::Decode(format!(
                "ticket is not a string: {other}"
            ))),
        }
    }

    /// Return the login result as a `(success, value)` pair.
    #[must_use]
    pub fn into_pair(self) -> (bool, LoginValue) {
        match self {
            Self::Success(ticket) => (true, LoginValue::Ticket(ticket)),
            Self::Failure(err) => (false, LoginValue::ErrorCode(err.error_code)),
        }
    }
}

/// Body of `POST api/groups/{group}/members`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MembershipRequest {
    /// User to add.
    #[serde(rename = "userId")]
    pub user_id: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile_json() -> Value {
        json!({
            "id": 6,
            "email": "jane@example.com",
            "details": {"firstName": "Jane", "lastName": "Doe", "phoneNumber": null},
            "address": {
                "address": "1 Main Street",
                "addressComplement": null,
                "postCode": "75001",
                "region": "IDF",
                "country": "FR"
            }
        })
    }

    #[test]
    fn membership_request_serializes_user_id_as_number() {
        let req = MembershipRequest {
            user_id: "6".parse().unwrap(),
        };
        assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"userId":6}"#);
    }

    #[test]
    fn membership_error_code_wins() {
        for code in ErrorCode::KNOWN {
            let value = json!({"errorCode": code.get()});
            let outcome = ApiResponse::<()>::membership_from_value(&value).unwrap();
            assert_eq!(outcome.error_code(), Some(code));
        }
    }

    #[test]
    fn membership_without_error_code_succeeds() {
        for value in [json!({}), json!(true), Value::Null, json!({"errorCode": null})] {
            let outcome = ApiResponse::<()>::membership_from_value(&value).unwrap();
            assert_eq!(outcome, ApiResponse::Success(()));
        }
    }

    #[test]
    fn non_integer_error_code_is_decode_error() {
        let value = json!({"errorCode": "oops"});
        let err = ApiResponse::<()>::membership_from_value(&value).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn login_pairs() {
        let ok = ApiResponse::<Ticket>::login_from_value(&json!({"ticket": "abc123"})).unwrap();
        assert_eq!(
            ok.into_pair(),
            (true, LoginValue::Ticket(Ticket::new("abc123").unwrap()))
        );

        let refused = ApiResponse::<Ticket>::login_from_value(&json!({"errorCode": 102})).unwrap();
        assert_eq!(
            refused.into_pair(),
            (false, LoginValue::ErrorCode(ErrorCode::UNKNOWN_APP))
        );
    }

    #[test]
    fn login_empty_ticket_is_success() {
        let outcome = ApiResponse::<Ticket>::login_from_value(&json!({"ticket": ""})).unwrap();
        let (ok, value) = outcome.into_pair();
        assert!(ok);
        assert_eq!(value, LoginValue::Ticket(Ticket::from_issued("")));
    }

    #[test]
    fn login_ticket_takes_precedence() {
        let value = json!({"ticket": "abc123", "errorCode": 100});
        let outcome = ApiResponse::<Ticket>::login_from_value(&value).unwrap();
        assert!(outcome.is_success());
    }

    #[test]
    fn login_without_ticket_or_code_is_decode_error() {
        assert!(ApiResponse::<Ticket>::login_from_value(&json!({})).is_err());
        assert!(ApiResponse::<Ticket>::login_from_value(&Value::Null).is_err());
        assert!(ApiResponse::<Ticket>::login_from_value(&json!({"ticket": 5})).is_err());
    }

    #[test]
    fn user_profile_decodes() {
        let outcome = ApiResponse::<UserProfile>::from_value(profile_json()).unwrap();
        let profile = outcome.success().unwrap();
        assert_eq!(profile.id, UserId::new(6));
        assert_eq!(profile.details.first_name, "Jane");
        assert_eq!(profile.details.phone_number, None);
        assert_eq!(profile.address.post_code, "75001");
    }

    #[test]
    fn app_ticket_decodes() {
        let value = json!({
            "userId": 6,
            "userEmail": "jane@example.com",
            "ticketType": "T_APP",
            "groups": ["group"],
            "user": profile_json(),
        });
        let result = ApiResponse::<AppTicketResult>::from_value(value)
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(result.ticket_type, TicketType::App);
        assert!(result.ticket_type.is_valid_login());
        assert_eq!(result.groups, vec!["group".to_string()]);
        assert_eq!(result.user.email, result.user_email);
    }

    #[test]
    fn app_ticket_with_unknown_type_decodes() {
        let value = json!({
            "userId": 6,
            "userEmail": "jane@example.com",
            "ticketType": "T_NEW_KIND",
            "user": profile_json(),
        });
        let result = ApiResponse::<AppTicketResult>::from_value(value)
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(result.ticket_type, TicketType::Other("T_NEW_KIND".to_string()));
        assert!(!result.ticket_type.is_valid_login());
    }

    #[test]
    fn error_envelope_beats_payload_decoding() {
        let outcome = ApiResponse::<UserProfile>::from_value(json!({"errorCode": 202})).unwrap();
        assert_eq!(outcome.error_code(), Some(ErrorCode::USER_NOT_FOUND));
        assert_eq!(
            outcome.into_result().unwrap_err().to_string(),
            "JIAuth error 202 (E_USER_NOT_FOUND)"
        );
    }

    #[test]
    fn wrong_shape_is_decode_error() {
        let err = ApiResponse::<UserProfile>::from_value(json!({"id": "x"})).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
