//! Ctrl Alt Crew Admin - Content management panel.
//!
//! This binary serves the admin panel on port 3001.
//!
//! # Architecture
//!
//! - Axum web framework with Askama server-side templates
//! - Cookie sessions (SameSite=Strict, 24h inactivity expiry)
//! - Hosted backend-as-a-service reached with the service-role key
//!
//! # Security
//!
//! The service-role key bypasses row-level policies, so this binary is the
//! trust boundary: every protected route re-verifies the admin role against
//! the backend, and the check fails closed.

#![cfg_attr(not(test), forbid(unsafe_code))]

mod config;
mod error;
mod filters;
mod middleware;
mod models;
mod routes;
mod state;
mod supabase;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use config::AdminConfig;
use state::AppState;
use supabase::AdminClient;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = AdminConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter; defaults to info if RUST_LOG is unset
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ctrl_alt_crew_admin=info,tower_http=debug".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Build the backend client and application state
    let backend = AdminClient::new(&config.supabase).expect("Failed to initialize backend client");
    let state = AppState::new(config.clone(), backend);

    let session_layer = middleware::session::create_session_layer(state.config());

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .with_state(state.clone())
        .layer(session_layer)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = state.config().socket_addr();
    tracing::info!("admin listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
