//! The JIAuth operations as a trait.
//!
//! Application code can depend on `IdentityApi` rather than on `AuthClient`,
//! and swap in `MockIdentityApi` in tests.

use async_trait::async_trait;

use jiauth_core::{Ticket, UserId};

use crate::error::Result;
use crate::types::{ApiResponse, AppTicketResult, UserProfile};

#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockIdentityApi;

/// Operations offered by a JIAuth service.
///
/// Service-reported errors are returned as [`ApiResponse::Failure`]. An `Err`
/// means no usable response was obtained.
#[async_trait]
pub trait IdentityApi: Send + Sync {
    /// Look up a ticket issued to a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    async fn get_app_ticket(&self, ticket: &Ticket) -> Result<ApiResponse<AppTicketResult>>;

    /// Fetch a user's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    async fn get_user_info(&self, user_id: UserId) -> Result<ApiResponse<UserProfile>>;

    /// Add a user to a group.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    async fn add_user_to_group(&self, group: &str, user_id: UserId) -> Result<ApiResponse<()>>;

    /// Remove a user from a group.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    async fn remove_user_from_group(&self, group: &str, user_id: UserId)
        -> Result<ApiResponse<()>>;

    /// Obtain a ticket for logging into another application.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    async fn login(&self, other_app_client_id: &str) -> Result<ApiResponse<Ticket>>;
}

#[cfg(any(test, feature = "test-utils"))]
mod mock {
    use std::collections::{BTreeSet, HashMap};

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use jiauth_core::{ErrorCode, Ticket, UserId};

    use super::IdentityApi;
    use crate::error::Result;
    use crate::types::{ApiError, ApiResponse, AppTicketResult, UserProfile};

    #[derive(Default)]
    struct MockState {
        tickets: HashMap<Ticket, AppTicketResult>,
        users: HashMap<UserId, UserProfile>,
        groups: HashMap<String, BTreeSet<UserId>>,
        apps: HashMap<String, Ticket>,
        calls: Vec<String>,
    }

    /// An in-memory JIAuth service for testing.
    ///
    /// It answers with the same error codes the real service uses: unknown
    /// tickets give `E_INVALID_TICKET`, unknown users `E_USER_NOT_FOUND`,
    /// unknown groups `E_GROUP_NOT_FOUND` and unknown apps `E_UNKNOWN_APP`.
    #[derive(Default)]
    pub struct MockIdentityApi {
        state: Mutex<MockState>,
    }

    fn failure<T>(code: ErrorCode) -> Result<ApiResponse<T>> {
        Ok(ApiResponse::Failure(ApiError::new(code)))
    }

    impl MockIdentityApi {
        /// Register a ticket and what looking it up returns.
        #[must_use]
        pub fn with_ticket(self, ticket: Ticket, result: AppTicketResult) -> Self {
            self.state.lock().tickets.insert(ticket, result);
            self
        }

        /// Register a user profile.
        #[must_use]
        pub fn with_user(self, profile: UserProfile) -> Self {
            self.state.lock().users.insert(profile.id, profile);
            self
        }

        /// Register an empty group.
        #[must_use]
        pub fn with_group(self, group: impl Into<String>) -> Self {
            self.state.lock().groups.entry(group.into()).or_default();
            self
        }

        /// Register an application and the ticket `login` issues for it.
        #[must_use]
        pub fn with_app(self, client_id: impl Into<String>, ticket: Ticket) -> Self {
            self.state.lock().apps.insert(client_id.into(), ticket);
            self
        }

        /// Members of a group, in ascending order.
        #[must_use]
        pub fn members(&self, group: &str) -> Vec<UserId> {
            self.state
                .lock()
                .groups
                .get(group)
                .map(|members| members.iter().copied().collect())
                .unwrap_or_default()
        }

        /// The calls made so far, as `"<operation> <args>"` strings.
        #[must_use]
        pub fn calls(&self) -> Vec<String> {
            self.state.lock().calls.clone()
        }
    }

    #[async_trait]
    impl IdentityApi for MockIdentityApi {
        async fn get_app_ticket(&self, ticket: &Ticket) -> Result<ApiResponse<AppTicketResult>> {
            let mut state = self.state.lock();
            state.calls.push(format!("get_app_ticket {ticket}"));
            match state.tickets.get(ticket) {
                Some(result) => Ok(ApiResponse::Success(result.clone())),
                None => failure(ErrorCode::INVALID_TICKET),
            }
        }

        async fn get_user_info(&self, user_id: UserId) -> Result<ApiResponse<UserProfile>> {
            let mut state = self.state.lock();
            state.calls.push(format!("get_user_info {user_id}"));
            match state.users.get(&user_id) {
                Some(profile) => Ok(ApiResponse::Success(profile.clone())),
                None => failure(ErrorCode::USER_NOT_FOUND),
            }
        }

        async fn add_user_to_group(&self, group: &str, user_id: UserId) -> Result<ApiResponse<()>> {
            let mut state = self.state.lock();
            state.calls.push(format!("add_user_to_group {group} {user_id}"));
            if !state.users.contains_key(&user_id) {
                return failure(ErrorCode::USER_NOT_FOUND);
            }
            match state.groups.get_mut(group) {
                Some(members) => {
                    members.insert(user_id);
                    Ok(ApiResponse::Success(()))
                }
                None => failure(ErrorCode::GROUP_NOT_FOUND),
            }
        }

        async fn remove_user_from_group(
            &self,
            group: &str,
            user_id: UserId,
        ) -> Result<ApiResponse<()>> {
            let mut state = self.state.lock();
            state
                .calls
                .push(format!("remove_user_from_group {group} {user_id}"));
            let Some(members) = state.groups.get_mut(group) else {
                return failure(ErrorCode::GROUP_NOT_FOUND);
            };
            if members.remove(&user_id) {
                Ok(ApiResponse::Success(()))
            } else {
                failure(ErrorCode::USER_NOT_FOUND)
            }
        }

        async fn login(&self, other_app_client_id: &str) -> Result<ApiResponse<Ticket>> {
            let mut state = self.state.lock();
            state.calls.push(format!("login {other_app_client_id}"));
            match state.apps.get(other_app_client_id) {
                Some(ticket) => Ok(ApiResponse::Success(ticket.clone())),
                None => failure(ErrorCode::UNKNOWN_APP),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Address, UserDetails};
    use jiauth_core::{ErrorCode, TicketType};

    fn profile(id: i64) -> UserProfile {
        UserProfile {
            id: UserId::new(id),
            email: format!("user{id}@example.com"),
            details: UserDetails {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                phone_number: None,
            },
            address: Address {
                address: "1 Main Street".to_string(),
                address_complement: None,
                post_code: "75001".to_string(),
                region: "IDF".to_string(),
                country: "FR".to_string(),
            },
        }
    }

    fn mock() -> MockIdentityApi {
        let ticket = Ticket::new("abc123").unwrap();
        MockIdentityApi::default()
            .with_user(profile(6))
            .with_group("group")
            .with_app("first_app", ticket.clone())
            .with_ticket(
                ticket,
                AppTicketResult {
                    user_id: UserId::new(6),
                    user_email: "user6@example.com".to_string(),
                    ticket_type: TicketType::App,
                    groups: vec!["group".to_string()],
                    user: profile(6),
                },
            )
    }

    #[tokio::test]
    async fn mock_login_then_ticket_lookup() {
        let api = mock();

        let ticket = api.login("first_app").await.unwrap().into_result().unwrap();
        let result = api.get_app_ticket(&ticket).await.unwrap();
        assert_eq!(result.success().unwrap().user_id, UserId::new(6));

        let refused = api.login("wtf").await.unwrap();
        assert_eq!(refused.error_code(), Some(ErrorCode::UNKNOWN_APP));
    }

    #[tokio::test]
    async fn mock_group_membership() {
        let api = mock();
        let user = UserId::new(6);

        assert!(api.add_user_to_group("group", user).await.unwrap().is_success());
        assert_eq!(api.members("group"), vec![user]);
        assert!(api
            .remove_user_from_group("group", user)
            .await
            .unwrap()
            .is_success());
        assert!(api.members("group").is_empty());

        let missing = api.add_user_to_group("other_group", user).await.unwrap();
        assert_eq!(missing.error_code(), Some(ErrorCode::GROUP_NOT_FOUND));

        let not_member = api.remove_user_from_group("group", user).await.unwrap();
        assert_eq!(not_member.error_code(), Some(ErrorCode::USER_NOT_FOUND));
    }

    #[tokio::test]
    async fn mock_unknown_lookups() {
        let api = mock();

        let ticket = Ticket::new("ticket").unwrap();
        let result = api.get_app_ticket(&ticket).await.unwrap();
        assert_eq!(result.error_code(), Some(ErrorCode::INVALID_TICKET));

        let user = api.get_user_info(UserId::new(4)).await.unwrap();
        assert_eq!(user.error_code(), Some(ErrorCode::USER_NOT_FOUND));

        let added = api.add_user_to_group("group", UserId::new(4)).await.unwrap();
        assert_eq!(added.error_code(), Some(ErrorCode::USER_NOT_FOUND));
    }

    #[tokio::test]
    async fn mock_records_calls() {
        let api = mock();
        let _ = api.get_user_info(UserId::new(6)).await;
        let _ = api.login("first_app").await;

        assert_eq!(api.calls(), vec!["get_user_info 6", "login first_app"]);
    }

    #[tokio::test]
    async fn trait_object_dispatch() {
        let api: Box<dyn IdentityApi> = Box::new(mock());
        let profile = api.get_user_info(UserId::new(6)).await.unwrap();
        assert_eq!(profile.success().unwrap().email, "user6@example.com");
    }
}
