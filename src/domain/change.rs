//! Store changes reflecting event-collection mutations.
//!
//! Every successful save, delete, and photo attach emits a [`StoreChange`]
//! through the [`super::ChangeFeed`]. Changes carry immutable copies of the
//! written records, so subscribers can merge them into their own view of
//! the collection without reading the backend again. This is the
//! re-architected form of a live collection query: a channel of snapshots
//! instead of a framework-bound listener.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Event, EventId, Photo, PhotoId};

/// A single mutation of the event collection or a photo subcollection.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "change_type", rename_all = "snake_case")]
pub enum StoreChange {
    /// Emitted after an event document is inserted or updated.
    EventSaved {
        /// Identifier of the saved event.
        event_id: EventId,
        /// The event as written, with its persisted key rehydrated.
        event: Event,
        /// When the write completed.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after an event document is deleted.
    EventDeleted {
        /// Identifier of the deleted event.
        event_id: EventId,
        /// When the delete completed.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a photo's blob upload and metadata write both succeed.
    PhotoAttached {
        /// Parent event identifier.
        event_id: EventId,
        /// Identifier of the attached photo.
        photo_id: PhotoId,
        /// The photo metadata as written, URL populated.
        photo: Photo,
        /// When the metadata write completed.
        timestamp: DateTime<Utc>,
    },
}

impl StoreChange {
    /// Returns the event ID this change concerns.
    #[must_use]
    pub const fn event_id(&self) -> &EventId {
        match self {
            Self::EventSaved { event_id, .. }
            | Self::EventDeleted { event_id, .. }
            | Self::PhotoAttached { event_id, .. } => event_id,
        }
    }

    /// Returns the change type as a static string slice.
    #[must_use]
    pub const fn change_type_str(&self) -> &'static str {
        match self {
            Self::EventSaved { .. } => "event_saved",
            Self::EventDeleted { .. } => "event_deleted",
            Self::PhotoAttached { .. } => "photo_attached",
        }
    }
}
