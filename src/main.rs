//! cityscape-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use cityscape_gateway::api;
use cityscape_gateway::app_state::AppState;
use cityscape_gateway::blobs::{BlobStore, FsBlobStore};
use cityscape_gateway::config::CityscapeConfig;
use cityscape_gateway::documents::{DocumentBackend, MemoryDocuments, PostgresDocuments};
use cityscape_gateway::domain::ChangeFeed;
use cityscape_gateway::places::{HttpPlacesClient, PlaceSearch};
use cityscape_gateway::store::{EventStore, PhotoAttachments};
use cityscape_gateway::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = CityscapeConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting cityscape-gateway");

    // Build the document backend
    let documents: Arc<dyn DocumentBackend> = if config.persistence_enabled {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;
        let backend = PostgresDocuments::new(pool);
        backend.ensure_schema().await?;
        tracing::info!("postgres document backend ready");
        Arc::new(backend)
    } else {
        tracing::warn!("persistence disabled, documents will not survive restarts");
        Arc::new(MemoryDocuments::new())
    };

    // Build the blob store and place provider
    let blobs: Arc<dyn BlobStore> = Arc::new(FsBlobStore::new(
        config.blob_root.as_str(),
        config.blob_public_base_url.as_str(),
    ));
    let places: Arc<dyn PlaceSearch> = Arc::new(HttpPlacesClient::new(
        config.places_base_url.as_str(),
        config.places_api_key.as_str(),
    )?);

    // Build the store layer
    let change_feed = ChangeFeed::new(config.change_feed_capacity);
    let event_store = Arc::new(EventStore::new(
        Arc::clone(&documents),
        change_feed.clone(),
    ));
    let attachments = Arc::new(PhotoAttachments::new(
        documents,
        blobs,
        change_feed.clone(),
    ));

    // Build application state
    let app_state = AppState {
        event_store,
        attachments,
        places,
        change_feed,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
