//! Shared state handed to request handlers.

use mongodb::{Client, Database};

use crate::config::Config;

/// State cloned into every handler via axum's `State` extractor.
///
/// Cloning is cheap: the MongoDB client shares one underlying
/// connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub mongo_client: Client,
    pub db: Database,
}

impl AppState {
    /// Build state from loaded configuration and a connected client.
    ///
    /// The database handle is derived from the configured database name.
    pub fn new(config: Config, mongo_client: Client) -> Self {
        let db = mongo_client.database(config.mongodb.database());
        Self {
            config,
            mongo_client,
            db,
        }
    }
}
