//! Event-related DTOs for save, get, and list operations.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::PaginationMeta;
use crate::domain::{Event, EventKind};

/// Request body for `POST /events` and `PUT /events/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveEventRequest {
    /// Event name.
    #[serde(default)]
    pub name: String,
    /// First day; defaults to now.
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// Last day; defaults to one day after the start date.
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    /// Optional daily start time.
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    /// Optional daily end time.
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Optional category tag.
    #[serde(default)]
    pub kind: Option<EventKind>,
    /// Longitude; `0.0` with latitude `0.0` means no location.
    #[serde(default)]
    pub longitude: f64,
    /// Latitude; `0.0` with longitude `0.0` means no location.
    #[serde(default)]
    pub latitude: f64,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}

impl SaveEventRequest {
    /// Builds a draft [`Event`] from the request, applying form defaults
    /// for omitted dates.
    #[must_use]
    pub fn into_draft(self) -> Event {
        let start_date = self.start_date.unwrap_or_else(Utc::now);
        let end_date = self.end_date.unwrap_or(start_date + Duration::days(1));
        Event {
            name: self.name,
            start_date,
            end_date,
            start_time: self.start_time,
            end_time: self.end_time,
            kind: self.kind,
            longitude: self.longitude,
            latitude: self.latitude,
            description: self.description,
            ..Event::draft()
        }
    }
}

/// A persisted event as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventDto {
    /// Persisted event identifier.
    pub event_id: String,
    /// Event name.
    pub name: String,
    /// First day.
    pub start_date: DateTime<Utc>,
    /// Last day.
    pub end_date: DateTime<Utc>,
    /// Optional daily start time.
    pub start_time: Option<DateTime<Utc>>,
    /// Optional daily end time.
    pub end_time: Option<DateTime<Utc>>,
    /// Optional category tag.
    pub kind: Option<EventKind>,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Free-text description.
    pub description: String,
    /// Whether the event carries a real coordinate.
    pub has_location: bool,
}

impl From<&Event> for EventDto {
    fn from(event: &Event) -> Self {
        Self {
            event_id: event
                .id()
                .map(|id| id.as_str().to_string())
                .unwrap_or_default(),
            name: event.name.clone(),
            start_date: event.start_date,
            end_date: event.end_date,
            start_time: event.start_time,
            end_time: event.end_time,
            kind: event.kind,
            longitude: event.longitude,
            latitude: event.latitude,
            description: event.description.clone(),
            has_location: event.has_location(),
        }
    }
}

/// Response body for event save operations.
#[derive(Debug, Serialize, ToSchema)]
pub struct SaveEventResponse {
    /// The persisted identifier the client must carry forward.
    pub event_id: String,
    /// When the write completed.
    pub saved_at: DateTime<Utc>,
}

/// Query parameters for `GET /events`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListEventsParams {
    /// Reference point as `"lat,lon"`; events are sorted by distance
    /// from it when present.
    #[serde(default)]
    pub near: Option<String>,
    /// Case-insensitive substring filter on event names.
    #[serde(default)]
    pub query: Option<String>,
    /// Page number (1-indexed). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page (max 100). Defaults to 20.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl ListEventsParams {
    /// Clamps `page` and `per_page` to their allowed ranges.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, 100),
            ..self.clone()
        }
    }
}

/// Paginated list response for `GET /events`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventListResponse {
    /// Ranked event page.
    pub data: Vec<EventDto>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn into_draft_defaults_end_date() {
        let request = SaveEventRequest {
            name: "Snowport".to_string(),
            start_date: None,
            end_date: None,
            start_time: None,
            end_time: None,
            kind: None,
            longitude: 0.0,
            latitude: 0.0,
            description: String::new(),
        };
        let event = request.into_draft();
        assert_eq!(event.end_date - event.start_date, Duration::days(1));
        assert!(event.id().is_none());
    }

    #[test]
    fn clamped_bounds_parameters() {
        let params = ListEventsParams {
            near: None,
            query: None,
            page: 0,
            per_page: 1000,
        };
        let clamped = params.clamped();
        assert_eq!(clamped.page, 1);
        assert_eq!(clamped.per_page, 100);
    }
}
