//! MongoDB implementation of EventRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::options::FindOptions;
use mongodb::{Collection, Database, IndexModel};
use tracing::instrument;

use crate::document::{EventDocument, to_bson_datetime};
use crate::error::{EventError, EventResult};
use crate::models::{Event, EventFilter};
use crate::repository::EventRepository;

pub const COLLECTION: &str = "events";

#[derive(Clone)]
pub struct MongoEventRepository {
    collection: Collection<EventDocument>,
}

impl MongoEventRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }

    /// Indexes backing the list filters. Idempotent.
    pub async fn create_indexes(&self) -> EventResult<()> {
        let indexes = ["authorId", "locationId", "memberIds", "dateStart"]
            .into_iter()
            .map(|field| IndexModel::builder().keys(doc! { field: 1 }).build());

        self.collection.create_indexes(indexes).await?;
        Ok(())
    }
}

/// Translate an [`EventFilter`] into a query document.
pub(crate) fn build_filter(filter: &EventFilter) -> Document {
    let mut query = Document::new();

    if let Some(author_id) = &filter.author_id {
        query.insert("authorId", author_id);
    }

    if !filter.member_ids.is_empty() {
        query.insert("memberIds", doc! { "$in": &filter.member_ids });
    }

    if let Some(location_id) = &filter.location_id {
        query.insert("locationId", location_id);
    }

    if let Some(is_public) = filter.is_public {
        query.insert("isPublic", is_public);
    }

    let mut date_start = Document::new();
    if let Some(from) = filter.date_from {
        date_start.insert("$gte", to_bson_datetime(from));
    }
    if let Some(until) = filter.date_until {
        date_start.insert("$lte", to_bson_datetime(until));
    }
    if !date_start.is_empty() {
        query.insert("dateStart", date_start);
    }

    query
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn insert(&self, event: Event) -> EventResult<Event> {
        self.collection
            .insert_one(EventDocument::from(&event))
            .await?;
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> EventResult<Option<Event>> {
        let document = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(document.map(Event::from))
    }

    #[instrument(skip(self, filter))]
    async fn find(
        &self,
        filter: &EventFilter,
        offset: u64,
        limit: u64,
    ) -> EventResult<Vec<Event>> {
        // The driver treats a limit of 0 as "no limit".
        if limit == 0 {
            return Ok(Vec::new());
        }

        let options = FindOptions::builder()
            .skip(offset)
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .build();

        let cursor = self
            .collection
            .find(build_filter(filter))
            .with_options(options)
            .await?;
        let documents: Vec<EventDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Event::from).collect())
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn save(&self, event: &Event) -> EventResult<()> {
        let result = self
            .collection
            .replace_one(doc! { "_id": &event.id }, EventDocument::from(event))
            .await?;

        if result.matched_count == 0 {
            return Err(EventError::not_found(&event.id));
        }
        Ok(())
    }
}
