//! BSON layout of the `events` collection.

use chrono::{DateTime, Utc};
use mongodb::bson;
use serde::{Deserialize, Serialize};

use crate::models::{Event, EventStatus};

/// Stored form of [`Event`]. Timestamps are native BSON datetimes so range
/// queries on `dateStart` compare chronologically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub title: Option<String>,
    pub author_id: String,
    #[serde(default)]
    pub member_ids: Vec<String>,
    pub location_id: String,
    #[serde(default)]
    pub is_public: bool,
    pub date_start: bson::DateTime,
    pub date_end: bson::DateTime,
    pub date_created: bson::DateTime,
    pub date_modified: bson::DateTime,
}

pub(crate) fn to_bson_datetime(dt: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(dt.timestamp_millis())
}

fn from_bson_datetime(dt: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(dt.timestamp_millis()).unwrap_or(DateTime::UNIX_EPOCH)
}

impl From<&Event> for EventDocument {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            status: event.status,
            title: event.title.clone(),
            author_id: event.author_id.clone(),
            member_ids: event.member_ids.clone(),
            location_id: event.location_id.clone(),
            is_public: event.is_public,
            date_start: to_bson_datetime(event.date_start),
            date_end: to_bson_datetime(event.date_end),
            date_created: to_bson_datetime(event.date_created),
            date_modified: to_bson_datetime(event.date_modified),
        }
    }
}

impl From<EventDocument> for Event {
    fn from(doc: EventDocument) -> Self {
        Self {
            id: doc.id,
            status: doc.status,
            title: doc.title,
            author_id: doc.author_id,
            member_ids: doc.member_ids,
            location_id: doc.location_id,
            is_public: doc.is_public,
            date_start: from_bson_datetime(doc.date_start),
            date_end: from_bson_datetime(doc.date_end),
            date_created: from_bson_datetime(doc.date_created),
            date_modified: from_bson_datetime(doc.date_modified),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateEvent;
    use chrono::TimeZone;
    use mongodb::bson::{Bson, doc};

    fn event() -> Event {
        Event::new(CreateEvent {
            title: Some("Standup".into()),
            author_id: "u1".into(),
            member_ids: vec!["u2".into()],
            location_id: "loc1".into(),
            is_public: true,
            date_start: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            date_end: Utc.with_ymd_and_hms(2024, 1, 1, 9, 15, 0).unwrap(),
        })
    }

    #[test]
    fn test_document_uses_native_datetimes() {
        let document = bson::to_document(&EventDocument::from(&event())).unwrap();

        assert!(matches!(document.get("dateStart"), Some(Bson::DateTime(_))));
        assert_eq!(document.get_str("status").unwrap(), "PLANNED");
        assert_eq!(document.get_str("authorId").unwrap(), "u1");
        assert!(document.contains_key("_id"));
    }

    #[test]
    fn test_conversion_preserves_millisecond_event() {
        let original = event();
        let restored = Event::from(EventDocument::from(&original));
        assert_eq!(restored, original);
    }

    #[test]
    fn test_missing_optional_fields_take_defaults() {
        let now = bson::DateTime::now();
        let stored = doc! {
            "_id": "e1",
            "authorId": "u1",
            "locationId": "loc1",
            "title": Bson::Null,
            "dateStart": now,
            "dateEnd": now,
            "dateCreated": now,
            "dateModified": now,
        };

        let document: EventDocument = bson::from_document(stored).unwrap();
        assert_eq!(document.status, EventStatus::Planned);
        assert!(document.member_ids.is_empty());
        assert!(!document.is_public);
        assert_eq!(document.title, None);
    }
}
