//! Session-related types for admin authentication.

use serde::{Deserialize, Serialize};

use ctrl_alt_crew_core::{Email, UserId};

/// Session-stored identity of the signed-in user.
///
/// Holding a session only proves sign-in; the admin role is verified
/// against the backend on every protected request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// The user's backend ID.
    pub user_id: UserId,
    /// The user's email address.
    pub email: Email,
    /// Access token from sign-in, kept so it can be revoked on sign-out.
    pub access_token: String,
}

/// Session keys for admin authentication data.
pub mod session_keys {
    /// Key for storing the current signed-in user.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
