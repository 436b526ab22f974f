//! Event lifecycle service

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use tracing::{info, instrument};
use validator::Validate;

use crate::audit::{AuditRecord, AuditSink, TracingAuditSink};
use crate::error::{EventError, EventResult};
use crate::models::{self, CreateEvent, Event, EventFilter};
use crate::repository::EventRepository;

/// Sole owner of event state transitions. Every successful operation is
/// reported to the audit sink; failures are not.
pub struct EventService<R: EventRepository> {
    repository: R,
    audit: Arc<dyn AuditSink>,
}

impl<R: EventRepository> EventService<R> {
    /// Service over `repository`, auditing through `tracing`.
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            audit: Arc::new(TracingAuditSink),
        }
    }

    pub fn with_audit_sink(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    fn audit(&self, operation: &'static str, resource: Option<String>, params: Value) {
        self.audit.record(AuditRecord {
            operation,
            resource,
            params,
        });
    }

    /// Fetch, apply `change`, refresh `dateModified`, save.
    async fn mutate<F>(&self, id: &str, change: F) -> EventResult<()>
    where
        F: FnOnce(&mut Event) + Send,
    {
        let mut event = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| EventError::not_found(id))?;

        change(&mut event);
        event.touch();
        self.repository.save(&event).await
    }

    /// Validate and store a new PLANNED event.
    #[instrument(skip(self, create), fields(author_id = %create.author_id))]
    pub async fn create(&self, create: CreateEvent) -> EventResult<Event> {
        create.validate()?;
        let params = serde_json::to_value(&create).unwrap_or(Value::Null);

        let event = self.repository.insert(Event::new(create)).await?;
        info!(event_id = %event.id, "Event created");

        self.audit("createEvent", Some(event.resource()), params);
        Ok(event)
    }

    #[instrument(skip(self))]
    pub async fn find(&self, id: &str) -> EventResult<Event> {
        let event = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| EventError::not_found(id))?;

        self.audit("findEvent", Some(event.resource()), json!({ "id": id }));
        Ok(event)
    }

    /// Page through matching events in store order.
    #[instrument(skip(self, filter))]
    pub async fn list(
        &self,
        filter: &EventFilter,
        offset: u64,
        limit: u64,
    ) -> EventResult<Vec<Event>> {
        let events = self.repository.find(filter, offset, limit).await?;

        self.audit(
            "findEvents",
            None,
            json!({ "filter": filter, "offset": offset, "limit": limit }),
        );
        Ok(events)
    }

    #[instrument(skip(self))]
    pub async fn update_title(&self, id: &str, title: &str) -> EventResult<()> {
        self.mutate(id, |event| event.title = Some(title.to_string()))
            .await?;

        self.audit(
            "updateEventTitle",
            Some(models::resource(id)),
            json!({ "id": id, "title": title }),
        );
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn add_member(&self, id: &str, member_id: &str) -> EventResult<()> {
        self.mutate(id, |event| event.add_member(member_id)).await?;

        self.audit(
            "addEventMember",
            Some(models::resource(id)),
            json!({ "id": id, "memberId": member_id }),
        );
        Ok(())
    }

    /// Remove every occurrence of `member_id`; succeeds when there is none.
    #[instrument(skip(self))]
    pub async fn drop_member(&self, id: &str, member_id: &str) -> EventResult<()> {
        self.mutate(id, |event| event.drop_member(member_id)).await?;

        self.audit(
            "dropEventMember",
            Some(models::resource(id)),
            json!({ "id": id, "memberId": member_id }),
        );
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn update_is_public(&self, id: &str, is_public: bool) -> EventResult<()> {
        self.mutate(id, |event| event.is_public = is_public).await?;

        self.audit(
            "updateEventIsPublic",
            Some(models::resource(id)),
            json!({ "id": id, "isPublic": is_public }),
        );
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn update_location(&self, id: &str, location_id: &str) -> EventResult<()> {
        self.mutate(id, |event| event.location_id = location_id.to_string())
            .await?;

        self.audit(
            "updateEventLocation",
            Some(models::resource(id)),
            json!({ "id": id, "locationId": location_id }),
        );
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn update_date_start(&self, id: &str, date_start: DateTime<Utc>) -> EventResult<()> {
        self.mutate(id, |event| event.date_start = date_start).await?;

        self.audit(
            "updateEventStart",
            Some(models::resource(id)),
            json!({ "id": id, "dateStart": date_start }),
        );
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn update_date_end(&self, id: &str, date_end: DateTime<Utc>) -> EventResult<()> {
        self.mutate(id, |event| event.date_end = date_end).await?;

        self.audit(
            "updateEventEnd",
            Some(models::resource(id)),
            json!({ "id": id, "dateEnd": date_end }),
        );
        Ok(())
    }

    /// Mark the event CANCELLED. Cancelling twice succeeds.
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: &str) -> EventResult<()> {
        self.mutate(id, Event::cancel).await?;
        info!(event_id = %id, "Event cancelled");

        self.audit(
            "cancelEvent",
            Some(models::resource(id)),
            json!({ "id": id }),
        );
        Ok(())
    }
}
