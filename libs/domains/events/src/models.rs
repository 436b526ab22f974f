//! Event domain models

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::timestamp;

/// Lifecycle status. Only `Cancelled` is ever set after creation.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    #[default]
    Planned,
    Active,
    Done,
    Cancelled,
}

/// A scheduled occurrence with members, a location and a visibility flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// UUID v4 text, assigned on creation
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub status: EventStatus,
    pub title: Option<String>,
    pub author_id: String,
    /// Insertion ordered; duplicates allowed
    pub member_ids: Vec<String>,
    pub location_id: String,
    pub is_public: bool,
    pub date_start: DateTime<Utc>,
    pub date_end: DateTime<Utc>,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

impl Event {
    /// Build a new PLANNED event from a create payload.
    pub fn new(create: CreateEvent) -> Self {
        let now = timestamp::now();
        Self {
            id: Uuid::new_v4().to_string(),
            status: EventStatus::Planned,
            title: create.title,
            author_id: create.author_id,
            member_ids: create.member_ids,
            location_id: create.location_id,
            is_public: create.is_public,
            date_start: create.date_start,
            date_end: create.date_end,
            date_created: now,
            date_modified: now,
        }
    }

    /// Refresh `date_modified`; never moves it backwards.
    pub fn touch(&mut self) {
        self.date_modified = timestamp::now().max(self.date_modified);
    }

    pub fn add_member(&mut self, member_id: impl Into<String>) {
        self.member_ids.push(member_id.into());
    }

    /// Remove every occurrence of `member_id`.
    pub fn drop_member(&mut self, member_id: &str) {
        self.member_ids.retain(|m| m != member_id);
    }

    pub fn cancel(&mut self) {
        self.status = EventStatus::Cancelled;
    }

    pub fn resource(&self) -> String {
        resource(&self.id)
    }
}

/// Audit resource name for an event id.
pub fn resource(id: &str) -> String {
    format!("event:{id}")
}

/// Payload for creating an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    #[serde(default)]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "authorId is required"))]
    pub author_id: String,

    #[serde(default)]
    pub member_ids: Vec<String>,

    #[validate(length(min = 1, message = "locationId is required"))]
    pub location_id: String,

    #[serde(default)]
    pub is_public: bool,

    /// RFC 3339 timestamp or `YYYY-MM-DD`
    #[serde(deserialize_with = "timestamp::deserialize")]
    #[schema(value_type = String, example = "2024-01-01T18:00:00Z")]
    pub date_start: DateTime<Utc>,

    /// RFC 3339 timestamp or `YYYY-MM-DD`
    #[serde(deserialize_with = "timestamp::deserialize")]
    #[schema(value_type = String, example = "2024-01-01T21:00:00Z")]
    pub date_end: DateTime<Utc>,
}

/// Search criteria; every present field must match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,

    /// Matches when the event has any of these members; empty means no constraint
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub member_ids: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,

    /// Inclusive lower bound on `dateStart`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<DateTime<Utc>>,

    /// Inclusive upper bound on `dateStart`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_until: Option<DateTime<Utc>>,
}

impl EventFilter {
    pub fn by_author(author_id: impl Into<String>) -> Self {
        Self {
            author_id: Some(author_id.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, event: &Event) -> bool {
        self.author_id.as_ref().is_none_or(|a| *a == event.author_id)
            && (self.member_ids.is_empty()
                || event.member_ids.iter().any(|m| self.member_ids.contains(m)))
            && self
                .location_id
                .as_ref()
                .is_none_or(|l| *l == event.location_id)
            && self.is_public.is_none_or(|p| p == event.is_public)
            && self.date_from.is_none_or(|from| event.date_start >= from)
            && self.date_until.is_none_or(|until| event.date_start <= until)
    }
}

pub const DEFAULT_OFFSET: u64 = 0;
pub const DEFAULT_LIMIT: u64 = 10;

/// Query string of `GET /events`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListEventsQuery {
    #[serde(default, deserialize_with = "non_blank")]
    pub author_id: Option<String>,
    /// Comma-separated member ids; matches events with any of them
    pub member_ids: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub location_id: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub is_public: Option<bool>,
    /// Inclusive lower bound on dateStart (RFC 3339 or YYYY-MM-DD)
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    #[param(value_type = Option<String>)]
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on dateStart (RFC 3339 or YYYY-MM-DD)
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    #[param(value_type = Option<String>)]
    pub date_until: Option<DateTime<Utc>>,
    /// Matches to skip (default 0)
    #[serde(default, deserialize_with = "non_blank")]
    pub offset: Option<u64>,
    /// Maximum results (default 10)
    #[serde(default, deserialize_with = "non_blank")]
    pub limit: Option<u64>,
}

impl ListEventsQuery {
    /// Split into filter, offset and limit, applying defaults.
    pub fn into_parts(self) -> (EventFilter, u64, u64) {
        let member_ids = self
            .member_ids
            .map(|csv| {
                csv.split(',')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let filter = EventFilter {
            author_id: self.author_id,
            member_ids,
            location_id: self.location_id,
            is_public: self.is_public,
            date_from: self.date_from,
            date_until: self.date_until,
        };

        (
            filter,
            self.offset.unwrap_or(DEFAULT_OFFSET),
            self.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }
}

/// Query string of `PUT /events/{id}`. Present fields are applied in
/// declaration order.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UpdateEventQuery {
    /// New title
    pub title: Option<String>,
    /// Member id to append
    pub add: Option<String>,
    /// Member id to remove (all occurrences)
    pub drop: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub is_public: Option<bool>,
    /// New location id
    pub location: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    #[param(value_type = Option<String>)]
    pub date_start: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    #[param(value_type = Option<String>)]
    pub date_end: Option<DateTime<Utc>>,
}

/// `deserialize_with` for optional query values; blank counts as absent.
fn non_blank<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    Option::<String>::deserialize(deserializer)?
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| raw.trim().parse().map_err(D::Error::custom))
        .transpose()
}

/// `{ "data": CreateEvent }` request body.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEventRequest {
    #[validate(nested)]
    pub data: CreateEvent,
}

/// `{ "data": Event }` response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    pub data: Event,
}

/// `{ "data": [Event] }` response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EventListResponse {
    pub data: Vec<Event>,
}
