//! Store layer: event persistence and photo attachment orchestration.

pub mod event_store;
pub mod photo_attachments;

pub use event_store::EventStore;
pub use photo_attachments::PhotoAttachments;
