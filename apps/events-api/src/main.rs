use std::time::Duration;

use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryConfig;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

/// Upper bound on connection cleanup during shutdown.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(url = %config.mongodb.url(), "Connecting to MongoDB");
    let retry = RetryConfig::new().with_max_retries(5);
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, Some(retry)).await?;

    let state = AppState::new(config, mongo_client);
    api::events::init_indexes(&state.db).await?;

    let router = create_router::<openapi::ApiDoc>(api::routes(&state)).await?;
    let app = router.merge(health_router(state.config.app));

    info!(address = %state.config.server.address(), "Starting events API");

    let cleanup_client = state.mongo_client.clone();
    create_production_app(app, &state.config.server, SHUTDOWN_TIMEOUT, async move {
        info!("Closing MongoDB connections");
        drop(cleanup_client);
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Events API shutdown complete");
    Ok(())
}
