//! Sign-in and sign-out.
//!
//! Sign-in verifies credentials against the auth API and then checks the
//! admin role before storing anything in the session, so a valid password
//! without the role never produces a usable session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use ctrl_alt_crew_core::Email;

use crate::error::AppError;
use crate::middleware::auth::{Admission, check_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;
use crate::supabase::SupabaseError;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    /// Sign-in failure or access-denial notice.
    pub error: Option<String>,
}

/// Query parameters for the login page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    denied: bool,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Display the login form.
#[instrument(skip(query))]
pub async fn login_page(Query(query): Query<LoginQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query
            .denied
            .then(|| AppError::AccessDenied.user_message().to_string()),
    }
}

/// Sign in with email and password.
///
/// POST /login
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let Ok(email) = Email::parse(&form.email) else {
        return login_failed();
    };

    let sign_in = match state.backend().sign_in(email.as_str(), &form.password).await {
        Ok(sign_in) => sign_in,
        Err(SupabaseError::InvalidCredentials) => return login_failed(),
        Err(err) => {
            tracing::error!(error = %err, "sign-in request failed");
            return login_failed();
        }
    };

    // The role gate applies at the door too, not just on later requests.
    if check_admin(state.backend(), sign_in.user.id).await == Admission::Denied {
        if let Err(error) = state.backend().sign_out(&sign_in.access_token).await {
            tracing::debug!(%error, "token revocation failed after denied sign-in");
        }
        return Redirect::to("/login?denied=true").into_response();
    }

    let admin = CurrentAdmin {
        user_id: sign_in.user.id,
        email,
        access_token: sign_in.access_token,
    };

    if let Err(error) = set_current_admin(&session, &admin).await {
        tracing::error!(%error, "failed to store session");
        return login_failed();
    }

    tracing::info!(user_id = %admin.user_id, "admin signed in");
    Redirect::to("/").into_response()
}

/// Sign out and clear the session.
///
/// POST /logout
#[instrument(skip(state, session))]
pub async fn logout(State(state): State<AppState>, session: Session) -> Response {
    if let Ok(Some(admin)) = session
        .get::<CurrentAdmin>(crate::models::session_keys::CURRENT_ADMIN)
        .await
    {
        if let Err(error) = state.backend().sign_out(&admin.access_token).await {
            tracing::debug!(%error, "token revocation failed on logout");
        }
    }

    if let Err(error) = session.flush().await {
        tracing::debug!(%error, "session clear failed on logout");
    }

    Redirect::to("/login").into_response()
}

fn login_failed() -> Response {
    LoginTemplate {
        error: Some(AppError::AuthFailed.user_message().to_string()),
    }
    .into_response()
}
