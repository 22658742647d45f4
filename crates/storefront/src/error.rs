//! Unified error handling with Sentry integration.
//!
//! Cart operations themselves never fail towards the user (storage problems
//! are absorbed by `CartStore`). What remains is rejecting bad input at the
//! HTTP boundary and reporting rendering failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use weilglass_core::AddToCartError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// An add-to-cart request carried unusable attributes.
    #[error("Invalid item: {0}")]
    InvalidItem(#[from] AddToCartError),

    /// A template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Template(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let (status, message) = match &self {
            Self::InvalidItem(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::Template(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
