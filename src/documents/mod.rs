//! Document collection backend: path-addressed JSON storage.
//!
//! Collections are named by path strings (`"events"`,
//! `"events/{event_id}/photos"`), documents by string identifiers within a
//! collection. The backend assigns identifiers on insert and preserves
//! insertion order for listing. Two implementations exist: an in-memory
//! backend for tests and persistence-disabled runs, and a PostgreSQL
//! backend for durable storage.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::EventId;
use crate::error::CityscapeError;

pub use memory::MemoryDocuments;
pub use postgres::PostgresDocuments;

/// Top-level collection holding event documents.
pub const EVENTS_COLLECTION: &str = "events";

/// Returns the child collection path holding photos for an event.
#[must_use]
pub fn photos_collection(event_id: &EventId) -> String {
    format!("{EVENTS_COLLECTION}/{event_id}/photos")
}

/// Collection-scoped CRUD over JSON documents.
///
/// All operations are asynchronous, non-transactional, and atomic per
/// document. Errors surface as [`CityscapeError::PersistenceError`].
#[async_trait]
pub trait DocumentBackend: std::fmt::Debug + Send + Sync {
    /// Inserts a new document, returning the backend-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CityscapeError::PersistenceError`] if the write fails.
    async fn insert(
        &self,
        collection: &str,
        payload: serde_json::Value,
    ) -> Result<String, CityscapeError>;

    /// Writes a document at a known identifier, inserting or replacing.
    ///
    /// # Errors
    ///
    /// Returns [`CityscapeError::PersistenceError`] if the write fails.
    async fn set(
        &self,
        collection: &str,
        doc_id: &str,
        payload: serde_json::Value,
    ) -> Result<(), CityscapeError>;

    /// Reads a single document, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`CityscapeError::PersistenceError`] if the read fails.
    async fn get(
        &self,
        collection: &str,
        doc_id: &str,
    ) -> Result<Option<serde_json::Value>, CityscapeError>;

    /// Deletes a document by identifier. Deleting an absent document is
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CityscapeError::PersistenceError`] if the delete fails.
    async fn delete(&self, collection: &str, doc_id: &str) -> Result<(), CityscapeError>;

    /// Lists all documents in a collection in insertion (storage) order.
    ///
    /// # Errors
    ///
    /// Returns [`CityscapeError::PersistenceError`] if the read fails.
    async fn list(
        &self,
        collection: &str,
    ) -> Result<Vec<(String, serde_json::Value)>, CityscapeError>;
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn photos_collection_path_is_nested_under_event() {
        let id = EventId::from_raw("1");
        assert_eq!(photos_collection(&id), "events/1/photos");
    }
}
