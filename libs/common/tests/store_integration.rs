//! Integration tests for the configured key-value stores
//!
//! These tests build stores through the same configuration path the binaries
//! use and verify that state written by one handle is visible to the next.

use common::{Settings, store::open_store};

#[test]
fn test_file_backend_from_settings() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("session.json");

    let settings = Settings::from_toml(&format!(
        "[store]\nbackend = \"file\"\npath = {:?}\n",
        path.display().to_string()
    ))?;

    let store = open_store(&settings.store)?;
    store.set("authToken", "integration_token")?;
    store.set("tokenExpiry", "2099-01-01T00:00:00Z")?;

    // A second handle over the same file sees the writes
    let reopened = open_store(&settings.store)?;
    assert_eq!(
        reopened.get("authToken")?,
        Some("integration_token".to_string())
    );

    reopened.remove("authToken")?;
    reopened.remove("tokenExpiry")?;
    assert_eq!(store.get("authToken")?, None);
    assert_eq!(store.get("tokenExpiry")?, None);

    Ok(())
}

#[test]
fn test_memory_backend_is_process_local() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_toml("[store]\nbackend = \"memory\"\n")?;

    let first = open_store(&settings.store)?;
    let second = open_store(&settings.store)?;

    first.set("authToken", "abc")?;
    assert_eq!(first.get("authToken")?, Some("abc".to_string()));
    assert_eq!(second.get("authToken")?, None);

    Ok(())
}
