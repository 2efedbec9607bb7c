//! Request-level failures of the user endpoints.
//!
//! Every domain failure answers 404 with the `{status, message}` envelope; the
//! message is the only thing telling them apart. Store failures fall through to
//! `AppError` and surface as 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use service_core::error::{AppError, ErrorBody};
use thiserror::Error;

use crate::models::InvalidUserId;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Invalid ObjectId format")]
    InvalidId(#[from] InvalidUserId),

    #[error("User not found")]
    UserNotFound,

    #[error("Not Found: {url}")]
    MissingFields { url: String },

    #[error("Not Found: {url}")]
    MalformedBody { url: String, reason: String },

    #[error("No change made to user")]
    NoChange,

    #[error(transparent)]
    Store(#[from] AppError),
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        match self {
            UserError::Store(err) => err.into_response(),
            other => {
                if let UserError::MalformedBody { reason, .. } = &other {
                    tracing::debug!(reason = %reason, "Rejected request body");
                }
                ErrorBody::new(StatusCode::NOT_FOUND, other.to_string())
                    .into_response_with(StatusCode::NOT_FOUND)
            }
        }
    }
}
