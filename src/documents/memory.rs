//! In-memory document backend.
//!
//! Keeps every collection as an insertion-ordered vector behind a
//! [`tokio::sync::RwLock`]. Used in tests and when persistence is
//! disabled. Tracks a write counter so tests can assert that failed
//! preconditions perform zero writes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::DocumentBackend;
use crate::error::CityscapeError;

type Collection = Vec<(String, serde_json::Value)>;

/// In-memory, insertion-ordered document backend.
#[derive(Debug, Default)]
pub struct MemoryDocuments {
    collections: RwLock<HashMap<String, Collection>>,
    writes: AtomicU64,
}

impl MemoryDocuments {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of write operations performed.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentBackend for MemoryDocuments {
    async fn insert(
        &self,
        collection: &str,
        payload: serde_json::Value,
    ) -> Result<String, CityscapeError> {
        let doc_id = uuid::Uuid::new_v4().to_string();
        let mut map = self.collections.write().await;
        map.entry(collection.to_string())
            .or_default()
            .push((doc_id.clone(), payload));
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(doc_id)
    }

    async fn set(
        &self,
        collection: &str,
        doc_id: &str,
        payload: serde_json::Value,
    ) -> Result<(), CityscapeError> {
        let mut map = self.collections.write().await;
        let docs = map.entry(collection.to_string()).or_default();
        if let Some(slot) = docs.iter_mut().find(|(id, _)| id == doc_id) {
            slot.1 = payload;
        } else {
            docs.push((doc_id.to_string(), payload));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn get(
        &self,
        collection: &str,
        doc_id: &str,
    ) -> Result<Option<serde_json::Value>, CityscapeError> {
        let map = self.collections.read().await;
        Ok(map.get(collection).and_then(|docs| {
            docs.iter()
                .find(|(id, _)| id == doc_id)
                .map(|(_, payload)| payload.clone())
        }))
    }

    async fn delete(&self, collection: &str, doc_id: &str) -> Result<(), CityscapeError> {
        let mut map = self.collections.write().await;
        if let Some(docs) = map.get_mut(collection) {
            docs.retain(|(id, _)| id != doc_id);
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list(
        &self,
        collection: &str,
    ) -> Result<Vec<(String, serde_json::Value)>, CityscapeError> {
        let map = self.collections.read().await;
        Ok(map.get(collection).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_assigns_distinct_ids() {
        let docs = MemoryDocuments::new();
        let a = docs.insert("events", json!({"name": "a"})).await;
        let b = docs.insert("events", json!({"name": "b"})).await;
        let (Ok(a), Ok(b)) = (a, b) else {
            panic!("insert failed");
        };
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let docs = MemoryDocuments::new();
        for name in ["first", "second", "third"] {
            let _ = docs.insert("events", json!({ "name": name })).await;
        }
        let Ok(listed) = docs.list("events").await else {
            panic!("list failed");
        };
        let names: Vec<&str> = listed
            .iter()
            .filter_map(|(_, v)| v.get("name").and_then(|n| n.as_str()))
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn set_replaces_in_place() {
        let docs = MemoryDocuments::new();
        let Ok(id) = docs.insert("events", json!({"name": "old"})).await else {
            panic!("insert failed");
        };
        let _ = docs.insert("events", json!({"name": "later"})).await;

        let set = docs.set("events", &id, json!({"name": "new"})).await;
        assert!(set.is_ok());

        let Ok(listed) = docs.list("events").await else {
            panic!("list failed");
        };
        // Updated document keeps its position.
        let first = listed.first().and_then(|(_, v)| v.get("name")?.as_str());
        assert_eq!(first, Some("new"));
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn set_with_unknown_id_inserts() {
        let docs = MemoryDocuments::new();
        let set = docs.set("events", "1", json!({"name": "Snowport"})).await;
        assert!(set.is_ok());
        let Ok(got) = docs.get("events", "1").await else {
            panic!("get failed");
        };
        assert!(got.is_some());
    }

    #[tokio::test]
    async fn delete_removes_document() {
        let docs = MemoryDocuments::new();
        let Ok(id) = docs.insert("events", json!({"name": "a"})).await else {
            panic!("insert failed");
        };
        let deleted = docs.delete("events", &id).await;
        assert!(deleted.is_ok());
        let Ok(got) = docs.get("events", &id).await else {
            panic!("get failed");
        };
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn write_count_tracks_mutations() {
        let docs = MemoryDocuments::new();
        assert_eq!(docs.write_count(), 0);
        let _ = docs.insert("events", json!({})).await;
        let _ = docs.set("events", "x", json!({})).await;
        let _ = docs.delete("events", "x").await;
        assert_eq!(docs.write_count(), 3);
        // Reads do not count.
        let _ = docs.list("events").await;
        assert_eq!(docs.write_count(), 3);
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let docs = MemoryDocuments::new();
        let _ = docs.set("events", "1", json!({"name": "e"})).await;
        let _ = docs
            .set("events/1/photos", "p", json!({"description": "d"}))
            .await;

        let Ok(events) = docs.list("events").await else {
            panic!("list failed");
        };
        let Ok(photos) = docs.list("events/1/photos").await else {
            panic!("list failed");
        };
        assert_eq!(events.len(), 1);
        assert_eq!(photos.len(), 1);
    }
}
