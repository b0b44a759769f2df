//! Mock token endpoint routes

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{SecondsFormat, Utc};
use common::config::ExpiryFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{AppState, session::ONE_HOUR_SENTINEL, validation::validate_login};

/// Request for user login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response for a successful login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// RFC 3339 timestamp or `"1hr"`
    pub expiry: String,
}

/// Create the router for the authentication service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/auth/login", post(login))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "auth-service"
    }))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthError> {
    info!("Login attempt for user: {}", payload.username);

    validate_login(&payload.username, &payload.password).map_err(AuthError::BadRequest)?;

    let credentials = &state.credentials;
    if payload.username.trim() != credentials.username || payload.password != credentials.password
    {
        warn!("Rejected credentials for user: {}", payload.username);
        return Err(AuthError::Unauthorized);
    }

    let issued = state
        .jwt_service
        .issue(payload.username.trim(), Utc::now())
        .map_err(|e| {
            error!("Failed to issue token: {}", e);
            AuthError::InternalServerError
        })?;

    let expiry = match state.expiry_format {
        ExpiryFormat::Sentinel => ONE_HOUR_SENTINEL.to_string(),
        ExpiryFormat::Timestamp => issued.expires_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    };

    let response = LoginResponse {
        token: issued.token,
        expiry,
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Custom error type for authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal server error")]
    InternalServerError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AuthError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string()),
            AuthError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(serde_json::json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
