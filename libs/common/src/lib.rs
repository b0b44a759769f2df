//! Common library for the alertdesk workspace
//!
//! This crate provides shared functionality used by the services and the
//! console: persisted key-value stores, layered configuration, error types and
//! logging setup.

pub mod config;
pub mod error;
pub mod store;
pub mod telemetry;

pub use config::Settings;
pub use store::{FileStore, MemoryStore, RedisStore, Store};

