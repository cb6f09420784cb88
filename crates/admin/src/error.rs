//! Unified error handling for the admin.
//!
//! Every variant maps to a fixed generic message that is safe to show an
//! operator. Underlying collaborator errors are logged through `tracing`
//! and never reach a response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::supabase::SupabaseError;

/// Application-level error type for the admin.
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading from the hosted backend failed.
    #[error("load failed: {0}")]
    LoadFailed(SupabaseError),

    /// Creating or updating a record failed.
    #[error("save failed: {0}")]
    SaveFailed(SupabaseError),

    /// Deleting a record failed, including deletes that matched no row.
    #[error("delete failed: {0}")]
    DeleteFailed(SupabaseError),

    /// Requested record does not exist.
    #[error("not found")]
    NotFound,

    /// The signed-in user does not hold the admin role.
    #[error("access denied")]
    AccessDenied,

    /// Sign-in credentials were rejected.
    #[error("authentication failed")]
    AuthFailed,

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
            Self::DeleteFailed(_) => "Unable to delete. Please try again.",
            Self::NotFound => "The requested content could not be found.",
            Self::AccessDenied => "You don't have permission to access this resource.",
            Self::AuthFailed => "Invalid email or password. Please try again.",
            Self::Validation(message) => message,
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::LoadFailed(_) | Self::SaveFailed(_) | Self::DeleteFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::AccessDenied => StatusCode::FORBIDDEN,
            Self::AuthFailed => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::LoadFailed(cause) | Self::SaveFailed(cause) | Self::DeleteFailed(cause) => {
                tracing::error!(error = %cause, "backend request failed");
            }
            Self::AccessDenied => {
                tracing::warn!("blocked request from non-admin user");
            }
            Self::NotFound | Self::AuthFailed => {}
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
        assert_eq!(AppError::AccessDenied.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::AuthFailed.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::DeleteFailed(SupabaseError::NotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_are_generic() {
        // Collaborator detail must never leak into the user-facing message.
        let err = AppError::SaveFailed(SupabaseError::Api {
            status: 409,
            message: "duplicate key value violates unique constraint".into(),
        });
        assert_eq!(err.user_message(), "Unable to save changes. Please try again.");
        assert!(!err.user_message().contains("constraint"));
    }

    #[test]
    fn test_each_failure_kind_has_distinct_message() {
        let save = AppError::SaveFailed(SupabaseError::NotFound);
        let load = AppError::LoadFailed(SupabaseError::NotFound);
        let delete = AppError::DeleteFailed(SupabaseError::NotFound);
        assert_ne!(save.user_message(), load.user_message());
        assert_ne!(save.user_message(), delete.user_message());
        assert_ne!(load.user_message(), delete.user_message());
    }
}
