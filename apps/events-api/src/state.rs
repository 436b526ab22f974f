//! Shared application state.

use mongodb::{Client, Database};

/// Cloned into each router; clones share the MongoDB connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    /// Database named by `MONGODB_DATABASE`
    pub db: Database,
}
