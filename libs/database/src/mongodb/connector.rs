use mongodb::{Client, options::ClientOptions};
use std::time::Duration;
use tracing::info;

use super::MongoConfig;
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry, retry_with_backoff};

/// Connect with default pool settings.
pub async fn connect(url: &str) -> DatabaseResult<Client> {
    connect_from_config(&MongoConfig::new(url)).await
}

/// Build a client from `config` and verify the server answers.
///
/// ```ignore
/// use core_config::FromEnv;
/// use database::mongodb::{MongoConfig, connect_from_config};
///
/// let config = MongoConfig::from_env()?;
/// let client = connect_from_config(&config).await?;
/// let db = client.database(config.database());
/// ```
pub async fn connect_from_config(config: &MongoConfig) -> DatabaseResult<Client> {
    info!(database = %config.database, "Connecting to MongoDB");

    let mut options = ClientOptions::parse(&config.url).await?;
    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));
    options.app_name = config.app_name.clone();

    let client = Client::with_options(options)?;

    // The driver connects lazily; force a round trip.
    client
        .list_database_names()
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Connected to MongoDB");
    Ok(client)
}

/// [`connect`] with exponential backoff; `None` uses [`RetryConfig::default`].
pub async fn connect_with_retry(
    url: &str,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<Client> {
    connect_from_config_with_retry(&MongoConfig::new(url), retry_config).await
}

/// [`connect_from_config`] with exponential backoff.
///
/// Used at startup when the database container may still be coming up.
pub async fn connect_from_config_with_retry(
    config: &MongoConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<Client> {
    match retry_config {
        Some(policy) => retry_with_backoff(|| connect_from_config(config), policy).await,
        None => retry(|| connect_from_config(config)).await,
    }
}
