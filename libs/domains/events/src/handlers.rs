//! HTTP handlers for the events API

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_helpers::errors::responses::{
    BadRequestQueryResponse, BadRequestValidationResponse, InternalServerErrorResponse,
    NotFoundResponse,
};
use axum_helpers::{QueryParams, ValidatedJson};
use tracing::instrument;

use crate::error::EventError;
use crate::models::{
    CreateEventRequest, EventListResponse, EventResponse, ListEventsQuery, UpdateEventQuery,
};
use crate::repository::EventRepository;
use crate::service::EventService;

pub type EventsState<R> = Arc<EventService<R>>;

/// Routes relative to the `/events` mount point.
pub fn events_router<R: EventRepository + 'static>() -> Router<EventsState<R>> {
    Router::new()
        .route("/", get(list_events::<R>).post(create_event::<R>))
        .route(
            "/{id}",
            get(get_event::<R>)
                .put(update_event::<R>)
                .delete(cancel_event::<R>),
        )
}

/// Stateless router over `service`.
pub fn router<R: EventRepository + 'static>(service: EventService<R>) -> Router {
    events_router().with_state(Arc::new(service))
}

/// List events matching the query
#[utoipa::path(
    get,
    path = "",
    params(ListEventsQuery),
    responses(
        (status = 200, description = "Matching events", body = EventListResponse),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state))]
pub async fn list_events<R: EventRepository>(
    State(state): State<EventsState<R>>,
    QueryParams(query): QueryParams<ListEventsQuery>,
) -> Result<Json<EventListResponse>, EventError> {
    let (filter, offset, limit) = query.into_parts();
    let data = state.list(&filter, offset, limit).await?;
    Ok(Json(EventListResponse { data }))
}

/// Create a new event
#[utoipa::path(
    post,
    path = "",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state, request), fields(author_id = %request.data.author_id))]
pub async fn create_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    ValidatedJson(request): ValidatedJson<CreateEventRequest>,
) -> Result<impl IntoResponse, EventError> {
    let data = state.create(request.data).await?;
    Ok((StatusCode::CREATED, Json(EventResponse { data })))
}

/// Get an event by id
#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = String, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event found", body = EventResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state))]
pub async fn get_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    Path(id): Path<String>,
) -> Result<Json<EventResponse>, EventError> {
    let data = state.find(&id).await?;
    Ok(Json(EventResponse { data }))
}

/// Partially update an event
///
/// Each present query parameter triggers one update, in the order
/// title, add, drop, isPublic, location, dateStart, dateEnd. Blank values
/// are ignored. Updates already applied stay applied if a later one fails.
#[utoipa::path(
    put,
    path = "/{id}",
    params(
        ("id" = String, Path, description = "Event id"),
        UpdateEventQuery
    ),
    responses(
        (status = 200, description = "Event updated"),
        (status = 400, response = BadRequestQueryResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state))]
pub async fn update_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    Path(id): Path<String>,
    QueryParams(query): QueryParams<UpdateEventQuery>,
) -> Result<StatusCode, EventError> {
    if let Some(title) = non_blank(query.title.as_deref()) {
        state.update_title(&id, title).await?;
    }
    if let Some(member_id) = non_blank(query.add.as_deref()) {
        state.add_member(&id, member_id).await?;
    }
    if let Some(member_id) = non_blank(query.drop.as_deref()) {
        state.drop_member(&id, member_id).await?;
    }
    if let Some(is_public) = query.is_public {
        state.update_is_public(&id, is_public).await?;
    }
    if let Some(location_id) = non_blank(query.location.as_deref()) {
        state.update_location(&id, location_id).await?;
    }
    if let Some(date_start) = query.date_start {
        state.update_date_start(&id, date_start).await?;
    }
    if let Some(date_end) = query.date_end {
        state.update_date_end(&id, date_end).await?;
    }
    Ok(StatusCode::OK)
}

/// Cancel an event
#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = String, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event cancelled"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state))]
pub async fn cancel_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    Path(id): Path<String>,
) -> Result<StatusCode, EventError> {
    state.cancel(&id).await?;
    Ok(StatusCode::OK)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
