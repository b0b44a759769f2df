//! Logging setup shared by every binary

use tracing_subscriber::{EnvFilter, fmt};

/// Install the global fmt subscriber
///
/// `RUST_LOG` takes precedence over `default_level`. Calling this more than once
/// keeps the first subscriber.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if fmt().with_env_filter(filter).try_init().is_err() {
        tracing::debug!("Global subscriber already installed");
    }
}
