//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::supabase::{ContentClient, SupabaseError};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration and the backend
/// data-API client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    content: ContentClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend client cannot be constructed from
    /// the configuration.
    pub fn new(config: SiteConfig) -> Result<Self, SupabaseError> {
        let content = ContentClient::new(&config.supabase)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, content }),
        })
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the backend data-API client.
    #[must_use]
    pub fn content(&self) -> &ContentClient {
        &self.inner.content
    }
}
