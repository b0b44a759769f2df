//! Authentication for the alertdesk workspace
//!
//! Holds the session validity checker and session manager used by the console,
//! the mock token endpoint, and the HTTP client that talks to it.

pub mod client;
pub mod jwt;
pub mod routes;
pub mod session;
pub mod validation;

use common::config::{AuthSettings, ExpiryFormat};

use crate::jwt::{JwtConfig, JwtService};

/// Credentials accepted by the mock login endpoint
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub jwt_service: JwtService,
    pub credentials: Credentials,
    pub expiry_format: ExpiryFormat,
}

impl AppState {
    /// Build the handler state from the auth settings
    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self {
            jwt_service: JwtService::new(JwtConfig::from_settings(settings)),
            credentials: Credentials {
                username: settings.username.clone(),
                password: settings.password.clone(),
            },
            expiry_format: settings.expiry_format,
        }
    }
}
