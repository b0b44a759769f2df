//! HTTP client for the token endpoint
//!
//! On a successful login the returned token and expiry marker are handed to the
//! [`SessionManager`], which persists them for later validity checks.

use common::error::StoreError;
use common::store::Store;
use reqwest::{Client, Response, StatusCode};
use thiserror::Error;
use tracing::{info, warn};

use crate::routes::{LoginRequest, LoginResponse};
use crate::session::SessionManager;

/// Errors raised while talking to a remote service
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure or undecodable body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    /// Persisting or reading the session failed
    #[error("Session store error: {0}")]
    Store(#[from] StoreError),

    /// No live session is available for an authenticated call
    #[error("Not authenticated")]
    NotAuthenticated,
}

/// Type alias for client results
pub type ClientResult<T> = Result<T, ClientError>;

/// Turn a non-success response into [`ClientError::Rejected`]
///
/// The message is taken from an `{"error": ...}` body when present.
pub async fn ensure_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| value.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or(body);

    Err(ClientError::Rejected { status, message })
}

/// Client for the login endpoint
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: Client,
    base_url: String,
}

impl AuthClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Log in and persist the issued session
    pub async fn login<S: Store>(
        &self,
        sessions: &SessionManager<S>,
        username: &str,
        password: &str,
    ) -> ClientResult<LoginResponse> {
        info!("Logging in as {}", username);

        let response = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .json(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        let response = match ensure_success(response).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Login failed: {}", e);
                return Err(e);
            }
        };

        let login: LoginResponse = response.json().await?;
        sessions.begin(&login.token, &login.expiry)?;

        Ok(login)
    }

    /// Drop the persisted session
    pub fn logout<S: Store>(&self, sessions: &SessionManager<S>) -> ClientResult<()> {
        sessions.end()?;
        Ok(())
    }
}
