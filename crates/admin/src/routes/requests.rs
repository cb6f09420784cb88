//! Service request inbox and status updates.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use ctrl_alt_crew_core::{RequestId, RequestStatus};

use crate::error::AppError;
use crate::filters;
use crate::middleware::auth::RequireAdmin;
use crate::state::AppState;
use crate::supabase::{ServiceRequest, SupabaseError};

/// Request inbox template.
#[derive(Template, WebTemplate)]
#[template(path = "requests.html")]
pub struct RequestsTemplate {
    pub requests: Vec<ServiceRequest>,
    /// All statuses, for the per-row select.
    pub statuses: &'static [RequestStatus],
    pub updated: bool,
    pub error: Option<String>,
}

/// Query parameters for the inbox.
#[derive(Debug, Deserialize)]
pub struct RequestsQuery {
    #[serde(default)]
    updated: bool,
}

/// Status update form data.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

/// Display the service request inbox.
///
/// GET /requests
#[instrument(skip(state, _admin, query))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<RequestsQuery>,
) -> Result<Response, AppError> {
    Ok(render(&state, query.updated, None).await?.into_response())
}

/// Update a request's status.
///
/// POST /requests/{id}/status
///
/// The submitted value is parsed into a [`RequestStatus`] before any
/// network call; anything outside the four defined values is rejected.
#[instrument(skip(state, _admin, form))]
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<RequestId>,
    Form(form): Form<StatusForm>,
) -> Result<Response, AppError> {
    let Ok(status) = form.status.parse::<RequestStatus>() else {
        let err = AppError::Validation("Unknown request status.".to_string());
        tracing::debug!(submitted = %form.status, "status update rejected");
        let page = render(&state, false, Some(err.user_message().to_string())).await?;
        return Ok(page.into_response());
    };

    match state.backend().update_request_status(id, status).await {
        Ok(()) => Ok(Redirect::to("/requests?updated=true").into_response()),
        Err(SupabaseError::NotFound) => Err(AppError::NotFound),
        Err(err) => {
            let err = AppError::SaveFailed(err);
            tracing::error!(error = %err, %id, "status update failed");
            let page = render(&state, false, Some(err.user_message().to_string())).await?;
            Ok(page.into_response())
        }
    }
}

async fn render(
    state: &AppState,
    updated: bool,
    error: Option<String>,
) -> Result<RequestsTemplate, AppError> {
    let requests = state
        .backend()
        .list_service_requests()
        .await
        .map_err(AppError::LoadFailed)?;

    Ok(RequestsTemplate {
        requests,
        statuses: &RequestStatus::ALL,
        updated,
        error,
    })
}
