//! Dashboard: the post listing with save/delete notices.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::auth::RequireAdmin;
use crate::models::CurrentAdmin;
use crate::state::AppState;
use crate::supabase::PostSummary;

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin_email: String,
    pub posts: Vec<PostSummary>,
    /// Success notice after a redirect.
    pub notice: Option<&'static str>,
    /// Failure notice, e.g. from a failed delete.
    pub error: Option<String>,
}

/// Query parameters for the dashboard.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    saved: bool,
    #[serde(default)]
    deleted: bool,
}

/// Display the dashboard.
///
/// GET /
#[instrument(skip(state, admin, query))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, AppError> {
    let notice = if query.saved {
        Some("Post saved.")
    } else if query.deleted {
        Some("Post deleted.")
    } else {
        None
    };

    Ok(render(&state, &admin, notice, None).await?.into_response())
}

/// Render the dashboard with the given notices. Shared with the delete
/// handler, which re-renders in place on failure.
pub async fn render(
    state: &AppState,
    admin: &CurrentAdmin,
    notice: Option<&'static str>,
    error: Option<String>,
) -> Result<DashboardTemplate, AppError> {
    let posts = state
        .backend()
        .list_posts()
        .await
        .map_err(AppError::LoadFailed)?;

    Ok(DashboardTemplate {
        admin_email: admin.email.to_string(),
        posts,
        notice,
        error,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Uri;

    use super::*;

    #[test]
    fn test_redirect_targets_deserialize() {
        // The post workflows redirect here with these exact query strings;
        // they must parse rather than 400.
        let Query(query) =
            Query::<DashboardQuery>::try_from_uri(&Uri::from_static("/?saved=true")).unwrap();
        assert!(query.saved);
        assert!(!query.deleted);

        let Query(query) =
            Query::<DashboardQuery>::try_from_uri(&Uri::from_static("/?deleted=true")).unwrap();
        assert!(query.deleted);
    }

    #[test]
    fn test_bare_url_has_no_notices() {
        let Query(query) = Query::<DashboardQuery>::try_from_uri(&Uri::from_static("/")).unwrap();
        assert!(!query.saved);
        assert!(!query.deleted);
    }
}
