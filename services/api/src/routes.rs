//! Mock upstream routes

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::ApiResult,
    middleware::{AuthUser, auth_middleware},
    models::{
        AlertListResponse,
        product::{CreateProductRequest, UpdateProductRequest},
    },
    state::AppState,
};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/alerts", get(list_alerts))
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "api-service"
    }))
}

/// Get every alert record
pub async fn list_alerts(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> impl IntoResponse {
    let data = state.alert_repository.list();
    info!("Serving {} alerts to {}", data.len(), user.username);

    Json(AlertListResponse {
        total: data.len(),
        data,
    })
}

/// Get all products
pub async fn list_products(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.product_repository.list().await)
}

/// Get a product by ID
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let product = state.product_repository.get(id).await?;
    Ok(Json(product))
}

/// Create a new product
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> ApiResult<impl IntoResponse> {
    let product = state.product_repository.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> ApiResult<impl IntoResponse> {
    let product = state.product_repository.update(id, &payload).await?;
    Ok(Json(product))
}

/// Delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    state.product_repository.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::Product;
    use crate::repositories::{AlertRepository, ProductRepository};
    use auth::jwt::{JwtConfig, JwtService};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use axum::response::Response;
    use chrono::Utc;
    use tower::ServiceExt;

    fn jwt() -> JwtService {
        JwtService::new(JwtConfig {
            secret: "test-secret".to_string(),
            token_ttl_seconds: 3600,
        })
    }

    fn app() -> Router {
        create_router(AppState {
            jwt_service: jwt(),
            alert_repository: AlertRepository::seeded(23, Utc::now()),
            product_repository: ProductRepository::seeded(),
        })
    }

    fn bearer() -> String {
        let issued = jwt().issue("admin", Utc::now()).unwrap();
        format!("Bearer {}", issued.token)
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_alerts_require_token() {
        let response = app()
            .oneshot(Request::get("/alerts").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app()
            .oneshot(
                Request::get("/alerts")
                    .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_alerts_listing() {
        let response = app()
            .oneshot(
                Request::get("/alerts")
                    .header(header::AUTHORIZATION, bearer())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: AlertListResponse = read_json(response).await;
        assert_eq!(body.total, 23);
        assert_eq!(body.data.len(), 23);
    }

    #[tokio::test]
    async fn test_product_crud_over_http() {
        let app = app();

        let response = app
            .clone()
            .oneshot(
                Request::post("/products")
                    .header(header::AUTHORIZATION, bearer())
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"name":"Siren","price":15.0}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Product = read_json(response).await;

        let response = app
            .clone()
            .oneshot(
                Request::put(format!("/products/{}", created.id))
                    .header(header::AUTHORIZATION, bearer())
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"quantity":7}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated: Product = read_json(response).await;
        assert_eq!(updated.quantity, 7);

        let response = app
            .clone()
            .oneshot(
                Request::delete(format!("/products/{}", created.id))
                    .header(header::AUTHORIZATION, bearer())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(
                Request::get(format!("/products/{}", created.id))
                    .header(header::AUTHORIZATION, bearer())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_product_is_bad_request() {
        let response = app()
            .oneshot(
                Request::post("/products")
                    .header(header::AUTHORIZATION, bearer())
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"name":"","price":1.0}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = read_json(response).await;
        assert_eq!(body["error"], "Product name is required");
    }
}
