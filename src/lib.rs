//! # cityscape-gateway
//!
//! REST API and WebSocket gateway for a city events map service.
//!
//! This crate stores events and their photo attachments in a document
//! backend, ranks events by proximity and name for list views, and
//! streams collection changes to WebSocket subscribers so clients can
//! keep a live view without polling.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── EventStore + PhotoAttachments (store/)
//!     ├── ChangeFeed (domain/)
//!     ├── Proximity/search ranking (domain/)
//!     │
//!     ├── DocumentBackend (documents/: memory or PostgreSQL)
//!     ├── BlobStore (blobs/: memory or filesystem)
//!     │
//!     └── PlaceSearch provider (places/)
//! ```

pub mod api;
pub mod app_state;
pub mod blobs;
pub mod config;
pub mod documents;
pub mod domain;
pub mod error;
pub mod identity;
pub mod places;
pub mod store;
pub mod ws;
