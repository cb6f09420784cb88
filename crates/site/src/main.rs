//! Ctrl Alt Crew Site - Public marketing site and blog.
//!
//! This binary serves the public-facing pages on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework with Askama server-side templates
//! - Hosted backend-as-a-service for posts and service requests,
//!   reached over its REST data API with the public anon key
//!
//! # Security
//!
//! This binary holds only the anon key. It can read published posts and
//! insert service requests; post CRUD and request triage live in the
//! separate admin binary with the service-role key.

#![cfg_attr(not(test), forbid(unsafe_code))]

mod config;
mod error;
mod filters;
mod routes;
mod state;
mod supabase;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use config::SiteConfig;
use state::AppState;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = SiteConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter; defaults to info if RUST_LOG is unset
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ctrl_alt_crew_site=info,tower_http=debug".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Build application state (backend client)
    let state = AppState::new(config.clone()).expect("Failed to initialize application state");

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.socket_addr();
    tracing::info!("site listening on {}", addr);

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
