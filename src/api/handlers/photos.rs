//! Photo attachment handlers: upload and listing per event.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{AttachPhotoParams, PhotoDto, PhotoListResponse};
use crate::app_state::AppState;
use crate::domain::{EventId, Photo};
use crate::error::{CityscapeError, ErrorResponse};
use crate::identity::Identity;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// `POST /events/{id}/photos` — Attach a photo to an event.
///
/// The raw request body is the image payload. The blob is uploaded
/// first; metadata is only written once a download URL resolves.
///
/// # Errors
///
/// Returns [`CityscapeError`] on missing identity, an unknown event,
/// or an upload or URL-resolution failure.
#[utoipa::path(
    post,
    path = "/api/v1/events/{id}/photos",
    tag = "Photos",
    summary = "Attach a photo",
    params(
        ("id" = String, Path, description = "Event identifier"),
        AttachPhotoParams,
    ),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 201, description = "Photo attached", body = PhotoDto),
        (status = 401, description = "Missing identity", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 502, description = "Upload or URL resolution failed", body = ErrorResponse),
    )
)]
pub async fn attach_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<AttachPhotoParams>,
    identity: Identity,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, CityscapeError> {
    let event = state.event_store.get(&EventId::from_raw(id)).await?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    let mut photo = Photo::new(params.description.unwrap_or_default());
    state
        .attachments
        .attach(&event, &mut photo, &body, &content_type, &identity)
        .await?;

    Ok((StatusCode::CREATED, Json(PhotoDto::from(&photo))))
}

/// `GET /events/{id}/photos` — List an event's photos.
///
/// # Errors
///
/// Returns [`CityscapeError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/photos",
    tag = "Photos",
    summary = "List photos for an event",
    params(("id" = String, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "Photos in attachment order", body = PhotoListResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn list_photos(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CityscapeError> {
    let event_id = EventId::from_raw(id);
    state.event_store.get(&event_id).await?;

    let photos = state.event_store.list_photos(&event_id).await?;
    let data = photos.iter().map(PhotoDto::from).collect();
    Ok(Json(PhotoListResponse { data }))
}

/// Photo attachment routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/events/{id}/photos", post(attach_photo).get(list_photos))
}
