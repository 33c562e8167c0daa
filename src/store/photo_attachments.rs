//! Photo attachment service: the two-phase upload-then-patch protocol.
//!
//! A photo becomes durable in three backend calls, in this order: blob
//! upload, download-URL resolution, metadata write under the parent
//! event's photo subcollection. No step is retried and no completed step
//! is rolled back — a failure partway through leaves an orphaned blob or
//! a dangling upload, which is accepted and logged.

use std::sync::Arc;

use chrono::Utc;

use crate::blobs::BlobStore;
use crate::documents::{DocumentBackend, photos_collection};
use crate::domain::{ChangeFeed, Event, Photo, PhotoId, StoreChange};
use crate::error::CityscapeError;
use crate::identity::Identity;

/// Uploads photo binaries and writes their metadata records.
#[derive(Debug, Clone)]
pub struct PhotoAttachments {
    documents: Arc<dyn DocumentBackend>,
    blobs: Arc<dyn BlobStore>,
    feed: ChangeFeed,
}

impl PhotoAttachments {
    /// Creates a new `PhotoAttachments` service.
    #[must_use]
    pub fn new(
        documents: Arc<dyn DocumentBackend>,
        blobs: Arc<dyn BlobStore>,
        feed: ChangeFeed,
    ) -> Self {
        Self {
            documents,
            blobs,
            feed,
        }
    }

    /// Attaches a photo to a persisted event.
    ///
    /// Assigns the photo a fresh identifier when it has none, uploads the
    /// binary to the blob path `"{event_id}{photo_id}"`, resolves the
    /// download URL, patches it onto the photo together with the
    /// uploader's email, and writes the metadata document at
    /// `events/{event_id}/photos/{photo_id}`.
    ///
    /// # Errors
    ///
    /// - [`CityscapeError::MissingParent`] if the event has no persisted
    ///   identifier; nothing is written.
    /// - [`CityscapeError::UploadError`] if the blob transfer fails.
    /// - [`CityscapeError::UrlResolutionError`] if URL resolution fails;
    ///   the uploaded blob stays orphaned.
    /// - [`CityscapeError::PersistenceError`] if the metadata write fails;
    ///   the blob and URL exist but no record references them.
    pub async fn attach(
        &self,
        event: &Event,
        photo: &mut Photo,
        data: &[u8],
        content_type: &str,
        uploader: &Identity,
    ) -> Result<PhotoId, CityscapeError> {
        let Some(event_id) = event.id() else {
            tracing::warn!("photo attach requested for an unpersisted event");
            return Err(CityscapeError::MissingParent);
        };

        let photo_id = match &photo.id {
            Some(id) => id.clone(),
            None => {
                let id = PhotoId::generate();
                photo.id = Some(id.clone());
                id
            }
        };

        let blob_path = format!("{event_id}{photo_id}");
        self.blobs.put(&blob_path, data, content_type).await?;

        let url = match self.blobs.resolve_download_url(&blob_path).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(%blob_path, "blob uploaded but download url unresolved; blob orphaned");
                return Err(e);
            }
        };

        photo.image_url = url;
        photo.reviewer = uploader.email.clone();

        let payload = serde_json::to_value(&*photo)
            .map_err(|e| CityscapeError::Internal(e.to_string()))?;
        let collection = photos_collection(event_id);
        if let Err(e) = self
            .documents
            .set(&collection, photo_id.as_str(), payload)
            .await
        {
            tracing::warn!(%blob_path, "dangling upload: blob stored but metadata write failed");
            return Err(e);
        }

        let _ = self.feed.publish(StoreChange::PhotoAttached {
            event_id: event_id.clone(),
            photo_id: photo_id.clone(),
            photo: photo.clone(),
            timestamp: Utc::now(),
        });

        tracing::info!(%event_id, %photo_id, size = data.len(), "photo attached");
        Ok(photo_id)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::blobs::MemoryBlobStore;
    use crate::documents::MemoryDocuments;
    use crate::domain::{EventId, EventKey};
    use crate::store::EventStore;

    struct Fixture {
        store: EventStore,
        attachments: PhotoAttachments,
        documents: Arc<MemoryDocuments>,
        blobs: Arc<MemoryBlobStore>,
    }

    fn make_fixture() -> Fixture {
        let documents = Arc::new(MemoryDocuments::new());
        let blobs = Arc::new(MemoryBlobStore::new());
        let feed = ChangeFeed::new(100);
        let store = EventStore::new(
            Arc::clone(&documents) as Arc<dyn DocumentBackend>,
            feed.clone(),
        );
        let attachments = PhotoAttachments::new(
            Arc::clone(&documents) as Arc<dyn DocumentBackend>,
            Arc::clone(&blobs) as Arc<dyn BlobStore>,
            feed,
        );
        Fixture {
            store,
            attachments,
            documents,
            blobs,
        }
    }

    fn uploader() -> Identity {
        Identity {
            user_id: "u-1".to_string(),
            email: "jackson@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn attach_without_parent_performs_zero_writes() {
        let fixture = make_fixture();
        let event = Event::draft();
        let mut photo = Photo::new("no parent");

        let result = fixture
            .attachments
            .attach(&event, &mut photo, &[0u8; 16], "image/jpeg", &uploader())
            .await;

        assert!(matches!(result, Err(CityscapeError::MissingParent)));
        assert_eq!(fixture.documents.write_count(), 0);
        assert!(fixture.blobs.is_empty().await);
    }

    #[tokio::test]
    async fn attach_assigns_photo_id_and_patches_url() {
        let fixture = make_fixture();
        let mut event = Event {
            name: "Snowport".to_string(),
            ..Event::draft()
        };
        let Ok(event_id) = fixture.store.save(&event).await else {
            panic!("save failed");
        };
        event.key = EventKey::Persisted(event_id.clone());

        let mut photo = Photo::new("stalls at dusk");
        let result = fixture
            .attachments
            .attach(&event, &mut photo, &[0u8; 64], "image/jpeg", &uploader())
            .await;
        let Ok(photo_id) = result else {
            panic!("attach failed");
        };

        assert_eq!(photo.id.as_ref(), Some(&photo_id));
        assert!(!photo.image_url.is_empty());
        assert_eq!(photo.reviewer, "jackson@example.com");

        let Ok(photos) = fixture.store.list_photos(&event_id).await else {
            panic!("list_photos failed");
        };
        assert_eq!(photos.len(), 1);
    }

    #[tokio::test]
    async fn attach_keeps_preexisting_photo_id() {
        let fixture = make_fixture();
        let event = Event {
            key: EventKey::Persisted(EventId::from_raw("1")),
            ..Event::draft()
        };
        let mut photo = Photo {
            id: Some(PhotoId::from_raw("p-9")),
            ..Photo::new("x")
        };

        let result = fixture
            .attachments
            .attach(&event, &mut photo, &[1u8; 8], "image/png", &uploader())
            .await;
        let Ok(photo_id) = result else {
            panic!("attach failed");
        };
        assert_eq!(photo_id.as_str(), "p-9");

        // Blob path is the plain concatenation of both identifiers.
        let url = fixture.blobs.resolve_download_url("1p-9").await;
        assert!(url.is_ok());
    }

    #[tokio::test]
    async fn attach_publishes_change() {
        let fixture = make_fixture();
        let event = Event {
            key: EventKey::Persisted(EventId::from_raw("1")),
            ..Event::draft()
        };
        let mut rx = fixture.store.watch();

        let mut photo = Photo::new("x");
        let _ = fixture
            .attachments
            .attach(&event, &mut photo, &[1u8; 8], "image/jpeg", &uploader())
            .await;

        let change = rx.recv().await;
        let Ok(change) = change else {
            panic!("expected change");
        };
        assert_eq!(change.change_type_str(), "photo_attached");
        assert_eq!(change.event_id().as_str(), "1");
    }

    #[tokio::test]
    async fn end_to_end_snowport_scenario() {
        let fixture = make_fixture();

        // Save a fully populated event, then re-save under its identifier.
        let mut event = Event {
            name: "Snowport".to_string(),
            latitude: 42.3518,
            longitude: -71.0442,
            kind: Some(crate::domain::EventKind::Popup),
            ..Event::draft()
        };
        event.end_date = event.start_date + chrono::Duration::seconds(35_000);

        let Ok(event_id) = fixture.store.save(&event).await else {
            panic!("save failed");
        };
        event.key = EventKey::Persisted(event_id.clone());
        let Ok(same) = fixture.store.save(&event).await else {
            panic!("update failed");
        };
        assert_eq!(same, event_id);

        // Attach a 1 KiB photo.
        let mut photo = Photo::new("winter market");
        let data = vec![0u8; 1024];
        let Ok(photo_id) = fixture
            .attachments
            .attach(&event, &mut photo, &data, "image/jpeg", &uploader())
            .await
        else {
            panic!("attach failed");
        };

        // Blob lands at the concatenated path.
        let blob_path = format!("{event_id}{photo_id}");
        assert!(fixture.blobs.resolve_download_url(&blob_path).await.is_ok());

        // Metadata document is discoverable under the event with a URL.
        let Ok(photos) = fixture.store.list_photos(&event_id).await else {
            panic!("list_photos failed");
        };
        let Some(stored) = photos.first() else {
            panic!("expected one photo");
        };
        assert_eq!(stored.id.as_ref(), Some(&photo_id));
        assert!(!stored.image_url.is_empty());
    }
}
