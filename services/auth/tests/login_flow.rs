//! End-to-end login flow against a locally bound token endpoint

use std::sync::Arc;

use auth::{
    AppState,
    client::{AuthClient, ClientError},
    routes,
    session::SessionManager,
};
use common::{
    config::{AuthSettings, ExpiryFormat},
    store::{MemoryStore, Store},
};
use reqwest::StatusCode;
use tokio::net::TcpListener;

async fn spawn_server(expiry_format: ExpiryFormat) -> String {
    let settings = AuthSettings {
        expiry_format,
        ..AuthSettings::default()
    };
    let app = routes::create_router(AppState::from_settings(&settings));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_login_persists_session() {
    let base_url = spawn_server(ExpiryFormat::Timestamp).await;
    let store = Arc::new(MemoryStore::new());
    let sessions = SessionManager::new(Arc::clone(&store));
    let client = AuthClient::new(&base_url);

    let login = client.login(&sessions, "admin", "admin123").await.unwrap();

    assert!(sessions.is_authenticated());
    assert_eq!(store.get("authToken").unwrap(), Some(login.token.clone()));
    assert_eq!(store.get("tokenExpiry").unwrap(), Some(login.expiry));
    assert_eq!(sessions.bearer_token(), Some(login.token));

    client.logout(&sessions).unwrap();
    assert!(!sessions.is_authenticated());
    assert_eq!(store.get("authToken").unwrap(), None);
}

#[tokio::test]
async fn test_failed_login_keeps_previous_state() {
    let base_url = spawn_server(ExpiryFormat::Sentinel).await;
    let sessions = SessionManager::new(MemoryStore::new());
    let client = AuthClient::new(&base_url);

    let err = client
        .login(&sessions, "admin", "wrong")
        .await
        .expect_err("login should fail");

    match err {
        ClientError::Rejected { status, message } => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!sessions.is_authenticated());
}
