//! Custom error types for the common library
//!
//! This module defines the error types shared by the key-value stores and the
//! configuration loader.

use thiserror::Error;

/// Custom error type for key-value store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error occurred while reading or writing the backing file
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file does not contain a JSON object of strings
    #[error("Store encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Error returned by the Redis server or client
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// A writer panicked while holding the store lock
    #[error("Store lock poisoned")]
    Poisoned,
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum SettingsError {
    /// One of the layered sources could not be read or deserialized
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    /// A value was read but is not acceptable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Type alias for Result with SettingsError
pub type SettingsResult<T> = Result<T, SettingsError>;
