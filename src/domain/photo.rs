//! Photo metadata record, stored as a child document of its parent event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PhotoId;

/// Metadata for a photo attached to an event.
///
/// A photo is meaningless without a persisted parent event: its metadata
/// document lives at `events/{event_id}/photos/{photo_id}` and its blob
/// path is derived from both identifiers. The record becomes durable only
/// after the blob upload succeeds and the metadata write completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    /// Client-assigned identifier; generated during attach when absent.
    /// Not part of the document payload (it is the document key).
    #[serde(skip)]
    pub id: Option<PhotoId>,
    /// Publicly retrievable blob URL; empty until the upload resolves.
    #[serde(default)]
    pub image_url: String,
    /// Free-text caption.
    #[serde(default)]
    pub description: String,
    /// Email of the authenticated uploader.
    #[serde(default)]
    pub reviewer: String,
    /// When the photo was posted.
    pub posted_on: DateTime<Utc>,
}

impl Photo {
    /// Creates a fresh photo record with no identifier and an empty URL.
    ///
    /// The reviewer is stamped later by the attach protocol from the
    /// caller-provided identity, never from ambient state.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: None,
            image_url: String::new(),
            description: description.into(),
            reviewer: String::new(),
            posted_on: Utc::now(),
        }
    }
}
