use anyhow::Result;
use common::{Settings, telemetry};
use tokio::net::TcpListener;
use tracing::info;

use auth::{AppState, routes};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load()?;

    // Initialize logging
    telemetry::init(&settings.log.level);

    info!("Starting authentication service");

    let app_state = AppState::from_settings(&settings.auth);
    info!(
        "Issuing tokens valid for {} seconds ({:?} expiry format)",
        app_state.jwt_service.token_ttl_seconds(),
        app_state.expiry_format
    );

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(settings.auth.listen_addr.as_str()).await?;
    info!("Authentication service listening on {}", settings.auth.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
