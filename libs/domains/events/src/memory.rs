//! In-process implementation of EventRepository

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::error::{EventError, EventResult};
use crate::models::{Event, EventFilter};
use crate::repository::EventRepository;

/// Insertion-ordered event store held in memory.
///
/// Filter semantics match [`MongoEventRepository`](crate::MongoEventRepository).
#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    events: RwLock<Vec<Event>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: RwLock::new(events),
        }
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn insert(&self, event: Event) -> EventResult<Event> {
        self.events.write().await.push(event.clone());
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> EventResult<Option<Event>> {
        let events = self.events.read().await;
        Ok(events.iter().find(|e| e.id == id).cloned())
    }

    #[instrument(skip(self, filter))]
    async fn find(
        &self,
        filter: &EventFilter,
        offset: u64,
        limit: u64,
    ) -> EventResult<Vec<Event>> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .filter(|e| filter.matches(e))
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn save(&self, event: &Event) -> EventResult<()> {
        let mut events = self.events.write().await;
        let slot = events
            .iter_mut()
            .find(|e| e.id == event.id)
            .ok_or_else(|| EventError::not_found(&event.id))?;
        *slot = event.clone();
        Ok(())
    }
}
