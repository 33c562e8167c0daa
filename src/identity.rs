//! Authenticated identity, passed explicitly to every write path.
//!
//! The gateway sits behind an authenticating proxy that forwards the
//! signed-in user's identifier and email as request headers. [`Identity`]
//! is an axum extractor over those headers; core services receive it as an
//! explicit argument and never read ambient global state.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::CityscapeError;

/// Header carrying the authenticated user identifier.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the authenticated user email.
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// The current signed-in user, as asserted by the upstream auth layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Stable user identifier.
    pub user_id: String,
    /// Email used to stamp the `reviewer` field on photos.
    pub email: String,
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = CityscapeError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        match (header(USER_ID_HEADER), header(USER_EMAIL_HEADER)) {
            (Some(user_id), Some(email)) => Ok(Self { user_id, email }),
            _ => Err(CityscapeError::Unauthorized),
        }
    }
}
