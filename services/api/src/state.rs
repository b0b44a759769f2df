//! Application state shared across handlers

use auth::jwt::JwtService;

use crate::repositories::{AlertRepository, ProductRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub jwt_service: JwtService,
    pub alert_repository: AlertRepository,
    pub product_repository: ProductRepository,
}
