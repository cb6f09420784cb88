//! Unified error handling for the public site.
//!
//! All route handlers return `Result<T, AppError>`. Every variant resolves
//! to a fixed generic message; the underlying collaborator error is logged
//! through `tracing` and never reaches a response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::supabase::SupabaseError;

/// Application-level error type for the site.
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading from the hosted backend failed.
    #[error("load failed: {0}")]
    LoadFailed(SupabaseError),

    /// Writing to the hosted backend failed.
    #[error("save failed: {0}")]
    SaveFailed(SupabaseError),

    /// Requested content does not exist (or is not published).
    #[error("not found")]
    NotFound,

    /// Submitted form data was rejected before any network call.
    #[error("validation failed: {0}")]
    Validation(String),
}

impl AppError {
    /// The fixed user-facing message for this error.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::LoadFailed(_) => "Unable to load data. Please refresh the page.",
            Self::SaveFailed(_) => "Unable to save changes. Please try again.",
            Self::NotFound => "The requested content could not be found.",
            Self::Validation(message) => message,
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::LoadFailed(_) | Self::SaveFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::LoadFailed(cause) | Self::SaveFailed(cause) => {
                tracing::error!(error = %cause, "backend request failed");
            }
            Self::NotFound => {}
            Self::Validation(reason) => {
                tracing::debug!(reason, "form validation failed");
            }
        }

        (self.status(), self.user_message().to_string()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Validation("name required".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::LoadFailed(SupabaseError::NotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_are_generic() {
        // Collaborator detail must never leak into the user-facing message.
        let err = AppError::LoadFailed(SupabaseError::Api {
            status: 500,
            message: "secret internal detail".into(),
        });
        assert_eq!(err.user_message(), "Unable to load data. Please refresh the page.");
        assert!(!err.user_message().contains("secret"));
    }
}
