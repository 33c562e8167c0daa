//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` streams store changes to clients.
//! A client subscribes to specific event IDs (or the whole collection
//! with `"*"`), pulls a snapshot, and merges subsequent changes into
//! its own live view. Dropping the connection ends the subscription.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
