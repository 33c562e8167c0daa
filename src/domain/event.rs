//! Event aggregate: the central record of the Cityscape domain.
//!
//! An [`Event`] is a user-created happening with a name, a date window, an
//! optional coordinate, and an optional [`EventKind`] tag. Identity follows
//! a two-state model: [`EventKey::Draft`] for an event that has never been
//! written, [`EventKey::Persisted`] once the document backend has assigned
//! an identifier. The key is deliberately excluded from the serialized
//! document payload — it lives in the document address, and is rehydrated
//! from it on read.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::EventId;
use super::place::Coordinate;

/// Closed set of event category tags.
///
/// Serialized with their display labels (`"Market"`, `"Popup"`, ...), which
/// is also how they are stored in event documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum EventKind {
    /// Open-air or indoor market.
    Market,
    /// Gallery or museum exhibit.
    Exhibit,
    /// Guided tour.
    Tour,
    /// Popup shop or installation.
    Popup,
    /// Live music.
    Concert,
    /// Stage theatre.
    Theatre,
    /// Stand-up or improv comedy.
    Comedy,
    /// Spectator sports.
    Sports,
    /// Participatory athletics (runs, races).
    Athletics,
    /// Food festival or tasting.
    Food,
    /// Cultural celebration.
    Cultural,
    /// Parade.
    Parade,
    /// Professional networking.
    Networking,
    /// Anything else.
    Other,
}

impl EventKind {
    /// All kinds in declaration order, for catalog endpoints.
    pub const ALL: [Self; 14] = [
        Self::Market,
        Self::Exhibit,
        Self::Tour,
        Self::Popup,
        Self::Concert,
        Self::Theatre,
        Self::Comedy,
        Self::Sports,
        Self::Athletics,
        Self::Food,
        Self::Cultural,
        Self::Parade,
        Self::Networking,
        Self::Other,
    ];

    /// Returns the display label (identical to the serialized form).
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Market => "Market",
            Self::Exhibit => "Exhibit",
            Self::Tour => "Tour",
            Self::Popup => "Popup",
            Self::Concert => "Concert",
            Self::Theatre => "Theatre",
            Self::Comedy => "Comedy",
            Self::Sports => "Sports",
            Self::Athletics => "Athletics",
            Self::Food => "Food",
            Self::Cultural => "Cultural",
            Self::Parade => "Parade",
            Self::Networking => "Networking",
            Self::Other => "Other",
        }
    }
}

/// Two-state identity of an event.
///
/// A draft has never touched the backend and carries no identifier; a
/// persisted event carries the backend-assigned [`EventId`], immutable for
/// the rest of its life.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKey {
    /// Not yet persisted; no identifier exists.
    Draft,
    /// Persisted under the given identifier.
    Persisted(EventId),
}

impl EventKey {
    /// Returns the identifier if this key is persisted.
    #[must_use]
    pub const fn id(&self) -> Option<&EventId> {
        match self {
            Self::Draft => None,
            Self::Persisted(id) => Some(id),
        }
    }
}

/// A local event as stored in the `events` collection.
///
/// Longitude/latitude both `0.0` means "no location set"; such an event is
/// never treated as having a real coordinate (see [`Event::coordinate`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Draft/persisted identity. Not part of the document payload.
    #[serde(skip, default = "default_key")]
    pub key: EventKey,
    /// Event name shown on the map and in search.
    #[serde(default)]
    pub name: String,
    /// First day of the event.
    pub start_date: DateTime<Utc>,
    /// Last day of the event.
    pub end_date: DateTime<Utc>,
    /// Optional daily start time.
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    /// Optional daily end time.
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Optional category tag.
    #[serde(default)]
    pub kind: Option<EventKind>,
    /// Longitude in degrees; `0.0` together with latitude `0.0` means unset.
    #[serde(default)]
    pub longitude: f64,
    /// Latitude in degrees; `0.0` together with longitude `0.0` means unset.
    #[serde(default)]
    pub latitude: f64,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}

const fn default_key() -> EventKey {
    EventKey::Draft
}

impl Event {
    /// Creates an empty draft with form defaults: dates start now, the end
    /// date one day later, everything else unset.
    #[must_use]
    pub fn draft() -> Self {
        let now = Utc::now();
        Self {
            key: EventKey::Draft,
            name: String::new(),
            start_date: now,
            end_date: now + Duration::days(1),
            start_time: None,
            end_time: None,
            kind: None,
            longitude: 0.0,
            latitude: 0.0,
            description: String::new(),
        }
    }

    /// Returns the persisted identifier, if any.
    #[must_use]
    pub const fn id(&self) -> Option<&EventId> {
        self.key.id()
    }

    /// Returns `true` if the event carries a real coordinate.
    ///
    /// The `(0.0, 0.0)` pair is the "unset" sentinel and never counts as a
    /// location.
    #[must_use]
    pub fn has_location(&self) -> bool {
        !(self.longitude == 0.0 && self.latitude == 0.0)
    }

    /// Returns the event coordinate, or `None` when no location is set.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.has_location().then(|| Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        })
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::draft()
    }
}
