//! HTTP handlers for fyyur-web

pub mod artists;
pub mod health;
pub mod shows;
pub mod ui;
pub mod venues;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use fyyur_common::Error;
use serde::Deserialize;

use crate::error::ApiError;
use ui::Notice;

pub use artists::artist_routes;
pub use health::health_routes;
pub use shows::show_routes;
pub use ui::ui_routes;
pub use venues::venue_routes;

/// Search box submission shared by venues and artists
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// Numeric `:id` path segment
///
/// A segment that is not an integer cannot name any record, so it is
/// reported as `NotFound` and rendered as the 404 page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RecordId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| Error::Internal(format!("Unreadable record id: {}", e)))?;

        raw.parse()
            .map(RecordId)
            .map_err(|_| Error::NotFound(format!("No record has id {:?}", raw)).into())
    }
}

/// Error notice for a failed write: the headline plus what went wrong
pub(crate) fn failure_notice(err: &ApiError, headline: &str) -> Notice {
    Notice::Error(format!("An error occurred. {} {}", headline, err.user_message()))
}
