//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::ChangeFeed;
use crate::places::PlaceSearch;
use crate::store::{EventStore, PhotoAttachments};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Event store for all event reads and writes.
    pub event_store: Arc<EventStore>,
    /// Photo attachment service.
    pub attachments: Arc<PhotoAttachments>,
    /// Place search provider.
    pub places: Arc<dyn PlaceSearch>,
    /// Change feed for WebSocket subscriptions.
    pub change_feed: ChangeFeed,
}
