//! Event store: single source of truth for event documents.
//!
//! Orchestrates the document backend and the change feed. Every mutation
//! follows the pattern: write document → publish change → log.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::broadcast;

use crate::documents::{DocumentBackend, EVENTS_COLLECTION, photos_collection};
use crate::domain::{ChangeFeed, Event, EventId, EventKey, Photo, PhotoId, StoreChange};
use crate::error::CityscapeError;

/// Create/update/delete/list over the `events` collection, with a live
/// change feed for subscribers.
#[derive(Debug, Clone)]
pub struct EventStore {
    documents: Arc<dyn DocumentBackend>,
    feed: ChangeFeed,
}

impl EventStore {
    /// Creates a new `EventStore`.
    #[must_use]
    pub fn new(documents: Arc<dyn DocumentBackend>, feed: ChangeFeed) -> Self {
        Self { documents, feed }
    }

    /// Subscribes to the live change feed.
    ///
    /// Dropping the returned receiver cancels the subscription.
    #[must_use]
    pub fn watch(&self) -> broadcast::Receiver<StoreChange> {
        self.feed.subscribe()
    }

    /// Persists an event.
    ///
    /// A draft is inserted and receives a backend-assigned identifier; a
    /// persisted event is updated in place under its existing identifier.
    /// Either way the returned identifier is the one the caller must carry
    /// forward (a photo attach derives its blob path from it).
    ///
    /// # Errors
    ///
    /// Returns [`CityscapeError::PersistenceError`] if the write fails,
    /// for updates and inserts alike.
    pub async fn save(&self, event: &Event) -> Result<EventId, CityscapeError> {
        let payload = serde_json::to_value(event)
            .map_err(|e| CityscapeError::Internal(e.to_string()))?;

        let event_id = match &event.key {
            EventKey::Persisted(id) => {
                self.documents
                    .set(EVENTS_COLLECTION, id.as_str(), payload)
                    .await?;
                id.clone()
            }
            EventKey::Draft => {
                let doc_id = self.documents.insert(EVENTS_COLLECTION, payload).await?;
                EventId::from_raw(doc_id)
            }
        };

        let mut saved = event.clone();
        saved.key = EventKey::Persisted(event_id.clone());

        let _ = self.feed.publish(StoreChange::EventSaved {
            event_id: event_id.clone(),
            event: saved,
            timestamp: Utc::now(),
        });

        tracing::info!(%event_id, name = %event.name, "event saved");
        Ok(event_id)
    }

    /// Deletes an event by its persisted identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CityscapeError::MissingIdentifier`] if the event was
    /// never persisted (no writes are issued), or
    /// [`CityscapeError::PersistenceError`] if the delete fails. No retry.
    pub async fn delete(&self, event: &Event) -> Result<(), CityscapeError> {
        let Some(event_id) = event.id() else {
            tracing::warn!("delete requested for an event with no identifier");
            return Err(CityscapeError::MissingIdentifier);
        };

        self.documents
            .delete(EVENTS_COLLECTION, event_id.as_str())
            .await?;

        let _ = self.feed.publish(StoreChange::EventDeleted {
            event_id: event_id.clone(),
            timestamp: Utc::now(),
        });

        tracing::info!(%event_id, "event deleted");
        Ok(())
    }

    /// Reads a single event by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CityscapeError::EventNotFound`] when no document exists,
    /// or [`CityscapeError::PersistenceError`] on backend failure.
    pub async fn get(&self, event_id: &EventId) -> Result<Event, CityscapeError> {
        let payload = self
            .documents
            .get(EVENTS_COLLECTION, event_id.as_str())
            .await?
            .ok_or_else(|| CityscapeError::EventNotFound(event_id.to_string()))?;
        rehydrate_event(event_id.clone(), payload)
    }

    /// Lists all events in storage (insertion) order.
    ///
    /// # Errors
    ///
    /// Returns [`CityscapeError::PersistenceError`] on backend failure or
    /// a malformed document.
    pub async fn list(&self) -> Result<Vec<Event>, CityscapeError> {
        let docs = self.documents.list(EVENTS_COLLECTION).await?;
        docs.into_iter()
            .map(|(doc_id, payload)| rehydrate_event(EventId::from_raw(doc_id), payload))
            .collect()
    }

    /// Lists the photo metadata records attached to an event, in
    /// attachment order.
    ///
    /// # Errors
    ///
    /// Returns [`CityscapeError::PersistenceError`] on backend failure or
    /// a malformed document.
    pub async fn list_photos(&self, event_id: &EventId) -> Result<Vec<Photo>, CityscapeError> {
        let docs = self.documents.list(&photos_collection(event_id)).await?;
        docs.into_iter()
            .map(|(doc_id, payload)| {
                let mut photo: Photo = serde_json::from_value(payload).map_err(|e| {
                    CityscapeError::PersistenceError(format!(
                        "malformed photo document {doc_id}: {e}"
                    ))
                })?;
                photo.id = Some(PhotoId::from_raw(doc_id));
                Ok(photo)
            })
            .collect()
    }
}

/// Rebuilds an [`Event`] from its document address and payload.
fn rehydrate_event(
    event_id: EventId,
    payload: serde_json::Value,
) -> Result<Event, CityscapeError> {
    let mut event: Event = serde_json::from_value(payload).map_err(|e| {
        CityscapeError::PersistenceError(format!("malformed event document {event_id}: {e}"))
    })?;
    event.key = EventKey::Persisted(event_id);
    Ok(event)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::documents::MemoryDocuments;

    fn make_store() -> (EventStore, Arc<MemoryDocuments>) {
        let documents = Arc::new(MemoryDocuments::new());
        let store = EventStore::new(
            Arc::clone(&documents) as Arc<dyn DocumentBackend>,
            ChangeFeed::new(100),
        );
        (store, documents)
    }

    fn named_event(name: &str) -> Event {
        Event {
            name: name.to_string(),
            ..Event::draft()
        }
    }

    #[tokio::test]
    async fn save_draft_assigns_identifier() {
        let (store, _) = make_store();
        let result = store.save(&named_event("Snowport")).await;
        let Ok(id) = result else {
            panic!("save failed");
        };
        assert!(!id.as_str().is_empty());
    }

    #[tokio::test]
    async fn save_persisted_returns_same_identifier() {
        let (store, _) = make_store();
        let mut event = named_event("Snowport");
        let Ok(id) = store.save(&event).await else {
            panic!("insert failed");
        };

        event.key = EventKey::Persisted(id.clone());
        event.description = "updated".to_string();
        let Ok(again) = store.save(&event).await else {
            panic!("update failed");
        };
        assert_eq!(id, again);

        let Ok(fetched) = store.get(&id).await else {
            panic!("get failed");
        };
        assert_eq!(fetched.description, "updated");
    }

    #[tokio::test]
    async fn delete_without_identifier_issues_no_writes() {
        let (store, documents) = make_store();
        let result = store.delete(&named_event("draft")).await;
        assert!(matches!(result, Err(CityscapeError::MissingIdentifier)));
        assert_eq!(documents.write_count(), 0);
    }

    #[tokio::test]
    async fn delete_removes_event() {
        let (store, _) = make_store();
        let mut event = named_event("Snowport");
        let Ok(id) = store.save(&event).await else {
            panic!("insert failed");
        };
        event.key = EventKey::Persisted(id.clone());

        let deleted = store.delete(&event).await;
        assert!(deleted.is_ok());

        let result = store.get(&id).await;
        assert!(matches!(result, Err(CityscapeError::EventNotFound(_))));
    }

    #[tokio::test]
    async fn list_preserves_storage_order() {
        let (store, _) = make_store();
        for name in ["first", "second", "third"] {
            let _ = store.save(&named_event(name)).await;
        }
        let Ok(events) = store.list().await else {
            panic!("list failed");
        };
        let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        assert!(events.iter().all(|e| e.id().is_some()));
    }

    #[tokio::test]
    async fn save_publishes_change() {
        let (store, _) = make_store();
        let mut rx = store.watch();

        let Ok(id) = store.save(&named_event("Snowport")).await else {
            panic!("save failed");
        };

        let change = rx.recv().await;
        let Ok(change) = change else {
            panic!("expected change");
        };
        assert_eq!(change.change_type_str(), "event_saved");
        assert_eq!(change.event_id(), &id);
    }

    #[tokio::test]
    async fn delete_publishes_change() {
        let (store, _) = make_store();
        let mut event = named_event("Snowport");
        let Ok(id) = store.save(&event).await else {
            panic!("save failed");
        };
        event.key = EventKey::Persisted(id);

        let mut rx = store.watch();
        let _ = store.delete(&event).await;

        let change = rx.recv().await;
        let Ok(change) = change else {
            panic!("expected change");
        };
        assert_eq!(change.change_type_str(), "event_deleted");
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let (store, _) = make_store();
        let result = store.get(&EventId::from_raw("nope")).await;
        assert!(matches!(result, Err(CityscapeError::EventNotFound(_))));
    }
}
