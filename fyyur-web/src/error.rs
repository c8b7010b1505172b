//! Error types for fyyur-web
//!
//! Every fault reaching a handler boundary becomes an HTML error page. None of
//! them terminate the process.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use fyyur_common::Error;
use thiserror::Error;
use tracing::{error, warn};

use crate::api::ui;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Fault raised by the listing core or the store
    #[error(transparent)]
    Common(#[from] Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Common(Error::Database(err))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Common(Error::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Common(err) if err.is_user_fault() => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Common(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text safe to show to the person who submitted the request
    ///
    /// Store and plumbing details stay in the log.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Common(Error::NotFound(msg))
            | ApiError::Common(Error::Validation(msg))
            | ApiError::Common(Error::Referential(msg)) => msg.clone(),
            ApiError::Common(Error::Integrity(_)) => {
                "Stored show data is inconsistent. The problem has been logged.".to_string()
            }
            ApiError::Common(_) => "The request could not be completed.".to_string(),
        }
    }

    /// Log at a level matching who caused the fault
    pub fn log(&self, context: &str) {
        if self.status().is_server_error() {
            error!("{}: {}", context, self);
        } else {
            warn!("{}: {}", context, self);
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        self.log("Request failed");
        (status, Html(ui::error_page(status, &self.user_message()))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
