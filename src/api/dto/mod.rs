//! Data transfer objects for the REST API.

pub mod common_dto;
pub mod event_dto;
pub mod photo_dto;
pub mod place_dto;

pub use common_dto::PaginationMeta;
pub use event_dto::{
    EventDto, EventListResponse, ListEventsParams, SaveEventRequest, SaveEventResponse,
};
pub use photo_dto::{AttachPhotoParams, PhotoDto, PhotoListResponse};
pub use place_dto::{PlaceSearchParams, PlaceSearchResponse};
