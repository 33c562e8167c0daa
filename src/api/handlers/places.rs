//! Place lookup handlers backed by the external place provider.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{PlaceSearchParams, PlaceSearchResponse};
use crate::app_state::AppState;
use crate::domain::PlaceResult;
use crate::error::{CityscapeError, ErrorResponse};

/// `GET /places/search` — Autocomplete place suggestions.
///
/// # Errors
///
/// Returns [`CityscapeError::PlaceLookup`] if the provider call fails.
#[utoipa::path(
    get,
    path = "/api/v1/places/search",
    tag = "Places",
    summary = "Search places",
    params(PlaceSearchParams),
    responses(
        (status = 200, description = "Suggestions in provider order", body = PlaceSearchResponse),
        (status = 502, description = "Provider lookup failed", body = ErrorResponse),
    )
)]
pub async fn search_places(
    State(state): State<AppState>,
    Query(params): Query<PlaceSearchParams>,
) -> Result<impl IntoResponse, CityscapeError> {
    let data = state.places.search(&params.query).await?;
    Ok(Json(PlaceSearchResponse { data }))
}

/// `GET /places/{id}` — Resolve a suggestion into a named coordinate.
///
/// # Errors
///
/// Returns [`CityscapeError::PlaceLookup`] if the provider call fails.
#[utoipa::path(
    get,
    path = "/api/v1/places/{id}",
    tag = "Places",
    summary = "Get place details",
    params(("id" = String, Path, description = "Provider place identifier")),
    responses(
        (status = 200, description = "Place details", body = PlaceResult),
        (status = 502, description = "Provider lookup failed", body = ErrorResponse),
    )
)]
pub async fn get_place(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CityscapeError> {
    let place = state.places.details(&id).await?;
    Ok(Json(place))
}

/// Place lookup routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/places/search", get(search_places))
        .route("/places/{id}", get(get_place))
}
