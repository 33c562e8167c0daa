//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All endpoints are mounted under `/api/v1`. With the `swagger-ui`
//! feature (on by default) the OpenAPI document is served at
//! `/api-docs/openapi.json` with an interactive UI at `/docs`.

pub mod dto;
pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

/// OpenAPI document covering every REST endpoint.
#[derive(Debug, utoipa::OpenApi)]
#[openapi(
    info(
        title = "cityscape-gateway",
        description = "REST API and WebSocket gateway for a city events map service"
    ),
    paths(
        handlers::events::create_event,
        handlers::events::update_event,
        handlers::events::list_events,
        handlers::events::get_event,
        handlers::events::delete_event,
        handlers::photos::attach_photo,
        handlers::photos::list_photos,
        handlers::places::search_places,
        handlers::places::get_place,
        handlers::system::health_handler,
        handlers::system::event_kinds_handler,
    ),
    tags(
        (name = "Events", description = "Event collection CRUD and ranked listing"),
        (name = "Photos", description = "Photo attachments per event"),
        (name = "Places", description = "Place autocomplete and details"),
        (name = "System", description = "Health and configuration catalogs"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/docs")
            .url("/api-docs/openapi.json", <ApiDoc as utoipa::OpenApi>::openapi()),
    );

    router
}
