//! Event repository trait

use crate::error::EventResult;
use crate::models::{Event, EventFilter};
use async_trait::async_trait;

/// Record store for events. The service is its only caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Persist a new event and return it as stored.
    async fn insert(&self, event: Event) -> EventResult<Event>;

    async fn find_by_id(&self, id: &str) -> EventResult<Option<Event>>;

    /// Up to `limit` matches after skipping `offset`, in store order.
    async fn find(&self, filter: &EventFilter, offset: u64, limit: u64)
    -> EventResult<Vec<Event>>;

    /// Replace the stored event with the same id.
    ///
    /// Fails with `NotFound` if it was removed since it was read.
    async fn save(&self, event: &Event) -> EventResult<()>;
}
