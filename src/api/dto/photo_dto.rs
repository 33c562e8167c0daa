//! Photo-related DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Photo;

/// A photo metadata record as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PhotoDto {
    /// Photo identifier within its event's subcollection.
    pub photo_id: String,
    /// Publicly retrievable blob URL.
    pub image_url: String,
    /// Free-text caption.
    pub description: String,
    /// Email of the uploader.
    pub reviewer: String,
    /// When the photo was posted.
    pub posted_on: DateTime<Utc>,
}

impl From<&Photo> for PhotoDto {
    fn from(photo: &Photo) -> Self {
        Self {
            photo_id: photo
                .id
                .as_ref()
                .map(|id| id.as_str().to_string())
                .unwrap_or_default(),
            image_url: photo.image_url.clone(),
            description: photo.description.clone(),
            reviewer: photo.reviewer.clone(),
            posted_on: photo.posted_on,
        }
    }
}

/// Query parameters for `POST /events/{id}/photos`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AttachPhotoParams {
    /// Optional caption stored with the photo metadata.
    #[serde(default)]
    pub description: Option<String>,
}

/// List response for `GET /events/{id}/photos`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PhotoListResponse {
    /// Photos in attachment order.
    pub data: Vec<PhotoDto>,
}
