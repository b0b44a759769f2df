//! End-to-end flow: log in, fetch alerts with the stored token, page through them

use api::{
    AppState,
    alerts::AlertsView,
    client::{AlertsClient, ProductsClient},
    models::product::{CreateProductRequest, UpdateProductRequest},
    repositories::{AlertRepository, ProductRepository},
};
use auth::{
    client::{AuthClient, ClientError},
    jwt::{JwtConfig, JwtService},
    session::SessionManager,
};
use axum::Router;
use chrono::Utc;
use common::{config::AuthSettings, store::MemoryStore};
use reqwest::StatusCode;
use tokio::net::TcpListener;

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn spawn_services() -> (String, String) {
    let settings = AuthSettings::default();

    let auth_url = serve(auth::routes::create_router(auth::AppState::from_settings(
        &settings,
    )))
    .await;

    let api_url = serve(api::routes::create_router(AppState {
        jwt_service: JwtService::new(JwtConfig::from_settings(&settings)),
        alert_repository: AlertRepository::seeded(23, Utc::now()),
        product_repository: ProductRepository::seeded(),
    }))
    .await;

    (auth_url, api_url)
}

#[tokio::test]
async fn test_login_then_page_alerts() {
    let (auth_url, api_url) = spawn_services().await;
    let sessions = SessionManager::new(MemoryStore::new());

    AuthClient::new(&auth_url)
        .login(&sessions, "admin", "admin123")
        .await
        .unwrap();
    let token = sessions.bearer_token().expect("session should be live");

    let records = AlertsClient::new(&api_url).fetch_alerts(&token).await.unwrap();
    let mut view = AlertsView::new(records, 5);

    assert_eq!(view.paginator().total_pages(), 5);
    assert!(view.paginator_mut().go_to_page(3));
    assert_eq!(view.summary(), "Showing 11-15 of 23");
    assert_eq!(view.rows().len(), 5);
    assert!(!view.paginator_mut().go_to_page(99));
    assert_eq!(view.paginator().current_page(), 3);
}

#[tokio::test]
async fn test_alerts_rejected_without_valid_token() {
    let (_, api_url) = spawn_services().await;

    let err = AlertsClient::new(&api_url)
        .fetch_alerts("garbage")
        .await
        .expect_err("token should be rejected");
    assert!(matches!(
        err,
        ClientError::Rejected { status, .. } if status == StatusCode::UNAUTHORIZED
    ));
}

#[tokio::test]
async fn test_product_crud_through_client() {
    let (auth_url, api_url) = spawn_services().await;
    let sessions = SessionManager::new(MemoryStore::new());
    AuthClient::new(&auth_url)
        .login(&sessions, "admin", "admin123")
        .await
        .unwrap();
    let token = sessions.bearer_token().unwrap();

    let products = ProductsClient::new(&api_url);
    let seeded = products.list(&token).await.unwrap().len();

    let created = products
        .create(
            &token,
            &CreateProductRequest {
                name: "Siren".to_string(),
                description: Some("Outdoor siren".to_string()),
                price: 42.0,
                quantity: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(products.list(&token).await.unwrap().len(), seeded + 1);

    let updated = products
        .update(
            &token,
            created.id,
            &UpdateProductRequest {
                quantity: Some(4),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.quantity, 4);

    products.delete(&token, created.id).await.unwrap();
    let err = products.delete(&token, created.id).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Rejected { status, .. } if status == StatusCode::NOT_FOUND
    ));
}
