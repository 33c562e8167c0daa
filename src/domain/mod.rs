//! Domain layer: core types, ranking, and the change feed.
//!
//! This module contains the Cityscape domain model: event and photo
//! identity, the event aggregate with its draft/persisted key, place
//! types, the change feed broadcasting store mutations, and the pure
//! proximity/search ranking function.

pub mod change;
pub mod change_feed;
pub mod event;
pub mod event_id;
pub mod photo;
pub mod photo_id;
pub mod place;
pub mod ranking;

pub use change::StoreChange;
pub use change_feed::ChangeFeed;
pub use event::{Event, EventKey, EventKind};
pub use event_id::EventId;
pub use photo::Photo;
pub use photo_id::PhotoId;
pub use place::{Coordinate, PlaceResult, PlaceSuggestion};
