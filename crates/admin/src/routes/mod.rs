//! HTTP route handlers for the admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health               - Health check
//! GET  /login                - Login form
//! POST /login                - Sign in
//! POST /logout               - Sign out
//! GET  /                     - Dashboard (post listing)
//! GET  /posts/new            - New-post form
//! POST /posts                - Create a post
//! GET  /posts/{id}/edit      - Edit-post form
//! POST /posts/{id}           - Update a post
//! POST /posts/{id}/delete    - Delete a post
//! GET  /requests             - Service request inbox
//! POST /requests/{id}/status - Update a request's status
//! ```
//!
//! Everything except `/health` and `/login` goes through the `RequireAdmin`
//! extractor, which re-verifies the admin role on each request.

pub mod auth;
pub mod dashboard;
pub mod posts;
pub mod requests;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the admin.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/posts/new", get(posts::new_post))
        .route("/posts", post(posts::create))
        .route("/posts/{id}/edit", get(posts::edit))
        .route("/posts/{id}", post(posts::update))
        .route("/posts/{id}/delete", post(posts::delete))
        .route("/requests", get(requests::index))
        .route("/requests/{id}/status", post(requests::update_status))
}
