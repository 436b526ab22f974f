//! Database connectors and utilities.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB client setup, retrying connects, health checks
//! - `config` - `core_config::FromEnv` support for the connection settings
//! - `all` - everything above
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{self, MongoConfig};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "events");
//! let client = mongodb::connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
