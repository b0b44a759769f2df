use anyhow::Result;
use auth::jwt::{JwtConfig, JwtService};
use chrono::Utc;
use common::{Settings, telemetry};
use tokio::net::TcpListener;
use tracing::info;

use api::{
    AppState,
    repositories::{AlertRepository, ProductRepository},
    routes,
};

/// Number of sample alerts served by the mock upstream
const SEEDED_ALERTS: usize = 23;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load()?;

    // Initialize logging
    telemetry::init(&settings.log.level);

    info!("Starting API service");

    let app_state = AppState {
        jwt_service: JwtService::new(JwtConfig::from_settings(&settings.auth)),
        alert_repository: AlertRepository::seeded(SEEDED_ALERTS, Utc::now()),
        product_repository: ProductRepository::seeded(),
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(settings.api.listen_addr.as_str()).await?;
    info!("API service listening on {}", settings.api.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
