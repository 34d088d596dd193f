//! Events API routes
//!
//! Wires the events domain to the MongoDB-backed repository.

use crate::state::AppState;
use axum::Router;
use domain_events::{EventService, MongoEventRepository, handlers};
use tracing::info;

/// Create the events router backed by MongoDB
pub fn router(state: &AppState) -> Router {
    let repository = MongoEventRepository::new(state.db.clone());
    let service = EventService::new(repository);

    handlers::router(service)
}

/// Initialize event indexes in MongoDB
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    let repository = MongoEventRepository::new(db.clone());
    repository
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create event indexes: {}", e))?;
    info!("Event collection indexes created");
    Ok(())
}
