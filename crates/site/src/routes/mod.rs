//! HTTP route handlers for the public site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Home page
//! GET  /health           - Health check
//! GET  /about            - About page
//! GET  /services         - Services overview + request form
//! POST /services/request - Submit a service request
//! GET  /portfolio        - Portfolio page
//! GET  /contact          - Contact page
//! GET  /blog             - Blog index (published posts only)
//! GET  /blog/{slug}      - Blog post detail
//! ```

pub mod blog;
pub mod home;
pub mod pages;
pub mod services;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::filters;
use crate::state::AppState;

/// 404 page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate;

/// Render the generic 404 page.
///
/// Used both as the router fallback and for unknown blog slugs, so a
/// missing post is indistinguishable from any other missing URL.
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, NotFoundTemplate).into_response()
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/about", get(pages::about))
        .route("/services", get(services::index))
        .route("/services/request", post(services::submit_request))
        .route("/portfolio", get(pages::portfolio))
        .route("/contact", get(pages::contact))
        .nest("/blog", blog::router())
        .fallback(not_found)
}
