//! Events API routes backed by MongoDB.

use crate::state::AppState;
use axum::Router;
use domain_events::{EventService, MongoEventRepository};
use tracing::info;

pub fn router(state: &AppState) -> Router {
    let repository = MongoEventRepository::new(&state.db);
    domain_events::router(EventService::new(repository))
}

/// Create the `events` collection indexes.
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoEventRepository::new(db)
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create event indexes: {}", e))?;
    info!("Event collection indexes created");
    Ok(())
}
