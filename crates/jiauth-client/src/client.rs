//! JIAuth HTTP client.
//!
//! Each operation is one request to `{base_url}/{path}`, carrying the
//! `X-Client-Id` and `X-Client-Secret` headers. The response body is decoded
//! as JSON and interpreted per endpoint; the HTTP status is not consulted,
//! since the service reports errors through `errorCode`.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde_json::Value;

use jiauth_core::{Ticket, UserId};

use crate::api::IdentityApi;
use crate::error::{ClientError, Result};
use crate::types::{ApiResponse, AppTicketResult, MembershipRequest, UserProfile};
use crate::ClientConfig;

/// Header carrying the client id.
pub const CLIENT_ID_HEADER: &str = "x-client-id";

/// Header carrying the client secret.
pub const CLIENT_SECRET_HEADER: &str = "x-client-secret";

/// The endpoints the client calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint<'a> {
    Ticket(&'a Ticket),
    User(UserId),
    GroupMembers(&'a str),
    GroupMember(&'a str, UserId),
    AppLogin(&'a str),
}

impl Endpoint<'_> {
    fn method(self) -> Method {
        match self {
            Self::Ticket(_) | Self::User(_) | Self::AppLogin(_) => Method::GET,
            Self::GroupMembers(_) => Method::POST,
            Self::GroupMember(..) => Method::DELETE,
        }
    }

    fn path(self) -> String {
        match self {
            Self::Ticket(ticket) => format!("api/ticket/{ticket}"),
            Self::User(user_id) => format!("api/user/{user_id}"),
            Self::GroupMembers(group) => format!("api/groups/{group}/members"),
            Self::GroupMember(group, user_id) => format!("api/groups/{group}/members/{user_id}"),
            Self::AppLogin(client_id) => format!("api/app_login/{client_id}"),
        }
    }
}

/// Client for the JIAuth identity service.
///
/// The configuration is fixed at construction. The client keeps no idle
/// connections, so every call opens and closes its own connection.
#[derive(Debug, Clone)]
pub struct AuthClient {
    config: ClientConfig,
    headers: HeaderMap,
    client: reqwest::Client,
}

impl AuthClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the base URL is empty, if the client id or
    /// secret cannot be sent as a header value, or if the HTTP client cannot
    /// be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .http1_title_case_headers()
            .build()
            .map_err(|e| {
                ClientError::InvalidConfig(format!("failed to create HTTP client: {e}"))
            })?;

        Self::with_client(client, config)
    }

    /// Create a new client with a custom reqwest client.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` under the same conditions as [`AuthClient::new`],
    /// except for building the HTTP client.
    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::InvalidConfig("base URL is empty".to_string()));
        }

        let client_id = HeaderValue::from_str(&config.client_id).map_err(|_| {
            ClientError::InvalidConfig("client id is not a valid header value".to_string())
        })?;
        let mut client_secret = HeaderValue::from_str(&config.client_secret).map_err(|_| {
            ClientError::InvalidConfig("client secret is not a valid header value".to_string())
        })?;
        client_secret.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(CLIENT_ID_HEADER), client_id);
        headers.insert(HeaderName::from_static(CLIENT_SECRET_HEADER), client_secret);

        Ok(Self {
            config,
            headers,
            client,
        })
    }

    /// Get the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Look up a ticket and return the decoded response as-is.
    ///
    /// # Errors
    ///
    /// Returns `Transport` or `Decode` if the request cannot be completed.
    pub async fn get_app_ticket_raw(&self, ticket: &Ticket) -> Result<Value> {
        self.request(Endpoint::Ticket(ticket), None).await
    }

    /// Fetch a user profile and return the decoded response as-is.
    ///
    /// # Errors
    ///
    /// Returns `Transport` or `Decode` if the request cannot be completed.
    pub async fn get_user_info_raw(&self, user_id: UserId) -> Result<Value> {
        self.request(Endpoint::User(user_id), None).await
    }

    /// Send one request and decode its body.
    ///
    /// An empty body decodes as `null`.
    async fn request(
        &self,
        endpoint: Endpoint<'_>,
        body: Option<MembershipRequest>,
    ) -> Result<Value> {
        let method = endpoint.method();
        let path = endpoint.path();
        let url = self.config.endpoint_url(&path);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .headers(self.headers.clone());
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        tracing::debug!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            bytes = bytes.len(),
            "JIAuth request completed"
        );

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::Decode(format!("{method} {path} (HTTP {status}): {e}")))
    }
}

#[async_trait]
impl IdentityApi for AuthClient {
    async fn get_app_ticket(&self, ticket: &Ticket) -> Result<ApiResponse<AppTicketResult>> {
        let value = self.get_app_ticket_raw(ticket).await?;
        ApiResponse::from_value(value)
    }

    async fn get_user_info(&self, user_id: UserId) -> Result<ApiResponse<UserProfile>> {
        let value = self.get_user_info_raw(user_id).await?;
        ApiResponse::from_value(value)
    }

    async fn add_user_to_group(&self, group: &str, user_id: UserId) -> Result<ApiResponse<()>> {
        let value = self
            .request(
                Endpoint::GroupMembers(group),
                Some(MembershipRequest { user_id }),
            )
            .await?;
        ApiResponse::<()>::membership_from_value(&value)
    }

    async fn remove_user_from_group(
        &self,
        group: &str,
        user_id: UserId,
    ) -> Result<ApiResponse<()>> {
        let value = self
            .request(Endpoint::GroupMember(group, user_id), None)
            .await?;
        ApiResponse::<()>::membership_from_value(&value)
    }

    async fn login(&self, other_app_client_id: &str) -> Result<ApiResponse<Ticket>> {
        let value = self
            .request(Endpoint::AppLogin(other_app_client_id), None)
            .await?;
        ApiResponse::<Ticket>::login_from_value(&value)
    }
}
