//! Event CRUD handlers: create, update, list, get, delete.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{
    EventDto, EventListResponse, ListEventsParams, PaginationMeta, SaveEventRequest,
    SaveEventResponse,
};
use crate::app_state::AppState;
use crate::domain::place::Coordinate;
use crate::domain::ranking::rank;
use crate::domain::{EventId, EventKey};
use crate::error::{CityscapeError, ErrorResponse};
use crate::identity::Identity;

/// `POST /events` — Create a new event.
///
/// # Errors
///
/// Returns [`CityscapeError`] on missing identity or a failed insert.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    tag = "Events",
    summary = "Create an event",
    description = "Persists a new event and returns the backend-assigned identifier the client must carry forward for updates and photo attachments.",
    request_body = SaveEventRequest,
    responses(
        (status = 201, description = "Event created", body = SaveEventResponse),
        (status = 401, description = "Missing identity", body = ErrorResponse),
        (status = 500, description = "Insert failed", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    _identity: Identity,
    Json(req): Json<SaveEventRequest>,
) -> Result<impl IntoResponse, CityscapeError> {
    let event = req.into_draft();
    let event_id = state.event_store.save(&event).await?;

    let response = SaveEventResponse {
        event_id: event_id.as_str().to_string(),
        saved_at: Utc::now(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// `PUT /events/{id}` — Update an event in place.
///
/// The write is an upsert under the given identifier, matching the
/// document backend's `set` semantics.
///
/// # Errors
///
/// Returns [`CityscapeError`] on missing identity or a failed write.
#[utoipa::path(
    put,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Update an event",
    params(("id" = String, Path, description = "Event identifier")),
    request_body = SaveEventRequest,
    responses(
        (status = 200, description = "Event updated", body = SaveEventResponse),
        (status = 401, description = "Missing identity", body = ErrorResponse),
        (status = 500, description = "Update failed", body = ErrorResponse),
    )
)]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _identity: Identity,
    Json(req): Json<SaveEventRequest>,
) -> Result<impl IntoResponse, CityscapeError> {
    let mut event = req.into_draft();
    event.key = EventKey::Persisted(EventId::from_raw(id));
    let event_id = state.event_store.save(&event).await?;

    let response = SaveEventResponse {
        event_id: event_id.as_str().to_string(),
        saved_at: Utc::now(),
    };
    Ok(Json(response))
}

/// `GET /events` — List events, ranked and paginated.
///
/// With `near=lat,lon` events are sorted by distance from that point;
/// with `query=` only events whose name contains the text (case-
/// insensitive) are returned.
///
/// # Errors
///
/// Returns [`CityscapeError::InvalidRequest`] on a malformed `near`
/// parameter, or a persistence error on backend failure.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Events",
    summary = "List events",
    params(ListEventsParams),
    responses(
        (status = 200, description = "Ranked event page", body = EventListResponse),
        (status = 400, description = "Malformed near parameter", body = ErrorResponse),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<ListEventsParams>,
) -> Result<impl IntoResponse, CityscapeError> {
    let params = params.clamped();
    let reference = params.near.as_deref().map(parse_near).transpose()?;
    let query = params.query.as_deref().unwrap_or_default();

    let events = state.event_store.list().await?;
    let ranked = rank(&events, reference, query);

    let total = ranked.len() as u32;
    let per_page = params.per_page;
    let page = params.page;
    let total_pages = if total == 0 {
        0
    } else {
        total.div_ceil(per_page)
    };

    // Widen before multiplying: a crafted page number must yield an empty
    // page, not an overflow.
    let start = usize::try_from((u64::from(page) - 1) * u64::from(per_page))
        .unwrap_or(usize::MAX);
    let data: Vec<EventDto> = ranked
        .iter()
        .skip(start)
        .take(per_page as usize)
        .map(EventDto::from)
        .collect();

    Ok(Json(EventListResponse {
        data,
        pagination: PaginationMeta {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

/// `GET /events/{id}` — Get a single event.
///
/// # Errors
///
/// Returns [`CityscapeError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Get event details",
    params(("id" = String, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "Event details", body = EventDto),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CityscapeError> {
    let event = state.event_store.get(&EventId::from_raw(id)).await?;
    Ok(Json(EventDto::from(&event)))
}

/// `DELETE /events/{id}` — Delete an event.
///
/// # Errors
///
/// Returns [`CityscapeError::EventNotFound`] if the event does not exist,
/// or a persistence error on backend failure.
#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Delete an event",
    params(("id" = String, Path, description = "Event identifier")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 401, description = "Missing identity", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _identity: Identity,
) -> Result<impl IntoResponse, CityscapeError> {
    let event = state.event_store.get(&EventId::from_raw(id)).await?;
    state.event_store.delete(&event).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Event management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event).get(list_events))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}

/// Parses a `"lat,lon"` pair into a [`Coordinate`].
///
/// # Errors
///
/// Returns [`CityscapeError::InvalidRequest`] on a malformed pair.
fn parse_near(raw: &str) -> Result<Coordinate, CityscapeError> {
    let mut parts = raw.splitn(2, ',');
    let latitude = parts
        .next()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .ok_or_else(|| CityscapeError::InvalidRequest(format!("malformed near: {raw}")))?;
    let longitude = parts
        .next()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .ok_or_else(|| CityscapeError::InvalidRequest(format!("malformed near: {raw}")))?;
    Ok(Coordinate {
        latitude,
        longitude,
    })
}
