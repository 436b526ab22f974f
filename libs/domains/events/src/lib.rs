//! Events Domain
//!
//! Scheduled events with members, a location and a visibility flag.
//!
//! ```text
//! HTTP (handlers) ──► EventService ──► EventRepository ──► MongoDB | memory
//!                          │
//!                          └──► AuditSink (tracing `audit` target)
//! ```

use utoipa::OpenApi;

pub mod audit;
mod document;
mod error;
pub mod handlers;
mod memory;
mod models;
mod mongo;
mod repository;
mod service;
pub mod timestamp;

pub use audit::{AuditRecord, AuditSink, MemoryAuditSink, TracingAuditSink};
pub use document::EventDocument;
pub use error::{EventError, EventResult};
pub use handlers::{EventsState, events_router, router};
pub use memory::InMemoryEventRepository;
pub use models::{
    CreateEvent, CreateEventRequest, DEFAULT_LIMIT, DEFAULT_OFFSET, Event, EventFilter,
    EventListResponse, EventResponse, EventStatus, ListEventsQuery, UpdateEventQuery,
};
pub use mongo::{COLLECTION, MongoEventRepository};
pub use repository::EventRepository;
pub use service::EventService;

/// OpenAPI documentation for the events API
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_events,
        handlers::create_event,
        handlers::get_event,
        handlers::update_event,
        handlers::cancel_event,
    ),
    components(schemas(
        Event,
        EventStatus,
        CreateEvent,
        CreateEventRequest,
        EventResponse,
        EventListResponse,
        axum_helpers::ErrorResponse,
    )),
    tags(
        (name = "events", description = "Event scheduling, membership and cancellation")
    )
)]
pub struct ApiDoc;
