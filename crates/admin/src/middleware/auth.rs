//! Authentication middleware and extractors for the admin.
//!
//! A session only proves that sign-in once succeeded. Whether the user
//! actually holds the admin role is decided fresh on every protected
//! request, and the decision fails closed: a missing role row and a
//! failed lookup are both denials. Until a check completes, nothing
//! protected is served.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use ctrl_alt_crew_core::UserId;

use crate::models::{CurrentAdmin, session_keys};
use crate::state::AppState;
use crate::supabase::{AdminClient, SupabaseError};

/// Outcome of an admission check. There is no in-between state visible
/// to callers: a request is either admitted or it is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The user holds the admin role.
    Admitted,
    /// The user lacks the role, or the lookup could not complete.
    Denied,
}

/// Source of role membership, abstracted so the admission logic can be
/// tested without a network.
pub trait RoleStore {
    /// Whether the given user holds the admin role.
    fn has_admin_role(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<bool, SupabaseError>> + Send;
}

impl RoleStore for AdminClient {
    async fn has_admin_role(&self, user_id: UserId) -> Result<bool, SupabaseError> {
        Self::has_admin_role(self, user_id).await
    }
}

/// Decide admission for a signed-in user.
///
/// Fail-closed: a lookup error is logged and treated exactly like a
/// missing role row.
pub async fn check_admin<R: RoleStore>(roles: &R, user_id: UserId) -> Admission {
    match roles.has_admin_role(user_id).await {
        Ok(true) => Admission::Admitted,
        Ok(false) => {
            tracing::warn!(%user_id, "signed-in user has no admin role");
            Admission::Denied
        }
        Err(error) => {
            tracing::warn!(%user_id, %error, "role lookup failed, denying access");
            Admission::Denied
        }
    }
}

/// Extractor that requires a signed-in user with a verified admin role.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.email)
/// }
/// ```
pub struct RequireAdmin(pub CurrentAdmin);

/// Rejection for [`RequireAdmin`].
pub enum AdminRejection {
    /// Not signed in: redirect to the login page.
    RedirectToLogin,
    /// Signed in but denied: session has been cleared, redirect with a
    /// denial notice.
    Denied,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Denied => Redirect::to("/login?denied=true").into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer.
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AdminRejection::RedirectToLogin)?;

        let admin: CurrentAdmin = session
            .get(session_keys::CURRENT_ADMIN)
            .await
            .ok()
            .flatten()
            .ok_or(AdminRejection::RedirectToLogin)?;

        match check_admin(state.backend(), admin.user_id).await {
            Admission::Admitted => Ok(Self(admin)),
            Admission::Denied => {
                // Best-effort revocation; denial does not depend on it.
                if let Err(error) = state.backend().sign_out(&admin.access_token).await {
                    tracing::debug!(%error, "token revocation failed during denial");
                }
                if let Err(error) = session.flush().await {
                    tracing::debug!(%error, "session clear failed during denial");
                }
                Err(AdminRejection::Denied)
            }
        }
    }
}

/// Store the signed-in user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}
