//! HTTP auth client

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use gatehouse_cookies::TokenStore;

use crate::client::AuthClient;
use crate::error::AuthError;
use crate::user::AuthResponse;
use crate::Result;

/// Path of the current-user endpoint, relative to the API base URL
pub const USER_ENDPOINT: &str = "auth/me";

/// Cookie holding the bearer token
pub const DEFAULT_TOKEN_COOKIE: &str = "accessToken";

/// Asks the backend for the current user.
///
/// The bearer token is read from the token store on every request, so a
/// token written by sign-in is picked up by the very next lookup.
#[derive(Clone)]
pub struct HttpAuthClient {
    client: Client,
    endpoint: Url,
    tokens: Arc<dyn TokenStore>,
    cookie_name: String,
}

impl HttpAuthClient {
    pub fn new(base_url: &Url, tokens: Arc<dyn TokenStore>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        // Url::join drops the last segment unless the base ends in '/'
        let mut base = base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join(USER_ENDPOINT)?;

        Ok(Self {
            client,
            endpoint,
            tokens,
            cookie_name: DEFAULT_TOKEN_COOKIE.to_string(),
        })
    }

    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    async fn get_user(&self) -> Result<AuthResponse> {
        let mut request = self
            .client
            .get(self.endpoint.clone())
            .header(header::ACCEPT, "application/json");

        if let Some(token) = self.tokens.value(&self.cookie_name)? {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(status = status.as_u16(), endpoint = %self.endpoint, "User lookup");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            // Prefer the backend's own message when it sent one
            let reply = serde_json::from_str::<AuthResponse>(&body)
                .ok()
                .filter(|r| r.error.is_some())
                .unwrap_or_else(|| {
                    AuthResponse::failure(
                        status
                            .canonical_reason()
                            .unwrap_or("Not authenticated")
                            .to_string(),
                    )
                });
            return Ok(reply);
        }

        if !status.is_success() {
            return Err(AuthError::status(status, &body));
        }

        if body.trim().is_empty() {
            return Ok(AuthResponse::ok(None));
        }

        serde_json::from_str(&body).map_err(|e| AuthError::InvalidResponse(e.to_string()))
    }
}
