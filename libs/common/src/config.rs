//! Layered configuration for the services and the console
//!
//! Values come from, in increasing priority: built-in defaults, an optional TOML
//! file (`alertdesk.toml`, or the path in `ALERTDESK_CONFIG`), and environment
//! variables of the form `ALERTDESK__SECTION__KEY`.

use std::path::PathBuf;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::{SettingsError, SettingsResult};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "alertdesk.toml";

/// Environment variable overriding the configuration file path
pub const CONFIG_PATH_ENV: &str = "ALERTDESK_CONFIG";

/// How the token endpoint reports session expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryFormat {
    /// The literal `"1hr"`
    Sentinel,
    /// An RFC 3339 timestamp
    Timestamp,
}

/// Token endpoint settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub listen_addr: String,
    pub base_url: String,
    pub jwt_secret: String,
    pub token_ttl_seconds: u64,
    pub expiry_format: ExpiryFormat,
    /// Mock credentials accepted by the login endpoint
    pub username: String,
    pub password: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            base_url: "http://localhost:3000".to_string(),
            jwt_secret: "change-me".to_string(),
            token_ttl_seconds: 3600,
            expiry_format: ExpiryFormat::Sentinel,
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

/// Alerts and products upstream settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub listen_addr: String,
    pub base_url: String,
    pub page_size: usize,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3001".to_string(),
            base_url: "http://localhost:3001".to_string(),
            page_size: 5,
        }
    }
}

/// Backend used for persisted session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    File,
    Redis,
}

/// Key-value store settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    /// Backing file for the `file` backend
    pub path: PathBuf,
    /// Connection URL for the `redis` backend
    pub redis_url: String,
    /// Namespace prepended to every Redis key
    pub key_prefix: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::File,
            path: PathBuf::from(".alertdesk-session.json"),
            redis_url: "redis://localhost:6379".to_string(),
            key_prefix: "alertdesk:".to_string(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Complete application settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub auth: AuthSettings,
    pub api: ApiSettings,
    pub store: StoreSettings,
    pub log: LogSettings,
}

impl Settings {
    /// Load settings from the default file location and the environment
    pub fn load() -> SettingsResult<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&path)
    }

    /// Load settings from `path` (if it exists) and the environment
    pub fn load_from(path: &str) -> SettingsResult<Self> {
        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("ALERTDESK").separator("__"));

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()
    }

    /// Parse settings from an in-memory TOML document, ignoring the environment
    pub fn from_toml(document: &str) -> SettingsResult<Self> {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(document, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        settings.validate()
    }

    fn validate(self) -> SettingsResult<Self> {
        if self.api.page_size == 0 {
            return Err(SettingsError::Invalid(
                "api.page_size must be greater than zero".to_string(),
            ));
        }

        if self.auth.jwt_secret.is_empty() {
            return Err(SettingsError::Invalid(
                "auth.jwt_secret must not be empty".to_string(),
            ));
        }

        Ok(self)
    }
}
