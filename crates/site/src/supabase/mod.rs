//! Hosted backend data-API client for the public site.
//!
//! Speaks PostgREST-style REST over `reqwest`:
//! - filters are query parameters (`published=eq.true`, `slug=neq.{slug}`)
//! - ordering via `order=<column>.desc`, row caps via `limit=N`
//! - single-row reads via `Accept: application/vnd.pgrst.object+json`
//!
//! This client holds only the public anon key. Backend row-level policies
//! restrict it to reading published posts and inserting service requests;
//! everything else lives behind the admin binary's service-role client.

mod types;

pub use types::*;

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use thiserror::Error;

use ctrl_alt_crew_core::Slug;

use crate::config::SupabaseConfig;

/// Single-object response media type; the backend answers 406 when the
/// filter matches no row.
const PGRST_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Number of related posts shown beneath a blog post.
const RELATED_POSTS_LIMIT: u32 = 3;

/// Errors that can occur when talking to the hosted backend.
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// No row matched the query.
    #[error("not found")]
    NotFound,

    /// Failed to build the client or parse a response.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Data-API client scoped to the public site's anon key.
#[derive(Clone)]
pub struct ContentClient {
    inner: Arc<ContentClientInner>,
}

struct ContentClientInner {
    client: reqwest::Client,
    rest_url: String,
}

impl ContentClient {
    /// Create a new client for the configured backend project.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &SupabaseConfig) -> Result<Self, SupabaseError> {
        let mut headers = HeaderMap::new();

        let key_value = HeaderValue::from_str(&config.anon_key)
            .map_err(|e| SupabaseError::Parse(format!("invalid API key: {e}")))?;
        headers.insert("apikey", key_value);

        let bearer = format!("Bearer {}", config.anon_key);
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&bearer)
                .map_err(|e| SupabaseError::Parse(format!("invalid API key: {e}")))?,
        );

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            inner: Arc::new(ContentClientInner {
                client,
                rest_url: format!("{}/rest/v1", config.url),
            }),
        })
    }

    /// List every published post, newest first.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError` if the request or decoding fails.
    pub async fn list_published_posts(&self) -> Result<Vec<Post>, SupabaseError> {
        let response = self
            .inner
            .client
            .get(format!("{}/posts", self.inner.rest_url))
            .query(&published_posts_query(None, None))
            .send()
            .await?;

        check_status(response).await?.json().await.map_err(Into::into)
    }

    /// Fetch a single published post by slug.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::NotFound`] if no published post has this
    /// slug; drafts are invisible here by construction of the query.
    pub async fn get_published_post(&self, slug: &Slug) -> Result<Post, SupabaseError> {
        let response = self
            .inner
            .client
            .get(format!("{}/posts", self.inner.rest_url))
            .header(ACCEPT, PGRST_OBJECT)
            .query(&[
                ("select", "*".to_string()),
                ("published", "eq.true".to_string()),
                ("slug", format!("eq.{slug}")),
            ])
            .send()
            .await?;

        check_status(response).await?.json().await.map_err(Into::into)
    }

    /// Up to three other published posts, newest first, excluding `current`.
    ///
    /// Purely a display affordance: callers degrade to an empty list on error.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError` if the request or decoding fails.
    pub async fn related_posts(&self, current: &Slug) -> Result<Vec<Post>, SupabaseError> {
        let response = self
            .inner
            .client
            .get(format!("{}/posts", self.inner.rest_url))
            .query(&published_posts_query(
                Some(current.as_str()),
                Some(RELATED_POSTS_LIMIT),
            ))
            .send()
            .await?;

        check_status(response).await?.json().await.map_err(Into::into)
    }

    /// Insert a new service request. The backend stamps id, `created_at`,
    /// and the default `pending` status.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError` if the insert is refused or the request fails.
    pub async fn submit_service_request(
        &self,
        request: &NewServiceRequest,
    ) -> Result<(), SupabaseError> {
        let response = self
            .inner
            .client
            .post(format!("{}/service_requests", self.inner.rest_url))
            .header("Prefer", "return=minimal")
            .json(request)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}

/// Query parameters selecting published posts, newest first.
///
/// Every public read goes through here, so `published=eq.true` cannot be
/// forgotten on an individual call site.
fn published_posts_query(
    exclude_slug: Option<&str>,
    limit: Option<u32>,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("select", "*".to_string()),
        ("published", "eq.true".to_string()),
        ("order", "created_at.desc".to_string()),
    ];
    if let Some(slug) = exclude_slug {
        params.push(("slug", format!("neq.{slug}")));
    }
    if let Some(n) = limit {
        params.push(("limit", n.to_string()));
    }
    params
}

/// Map an error response to a `SupabaseError`, passing successes through.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SupabaseError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND || status == StatusCode::NOT_ACCEPTABLE {
        return Err(SupabaseError::NotFound);
    }

    let message = response.text().await.unwrap_or_default();
    Err(SupabaseError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_published_filter_always_present() {
        for params in [
            published_posts_query(None, None),
            published_posts_query(Some("hello-world"), Some(3)),
        ] {
            assert!(
                params.iter().any(|(k, v)| *k == "published" && v == "eq.true"),
                "missing published filter in {params:?}"
            );
            assert!(params.iter().any(|(k, v)| *k == "order" && v == "created_at.desc"));
        }
    }

    #[test]
    fn test_related_query_excludes_current_and_limits() {
        let params = published_posts_query(Some("hello-world"), Some(3));
        assert!(params.contains(&("slug", "neq.hello-world".to_string())));
        assert!(params.contains(&("limit", "3".to_string())));
    }

    #[test]
    fn test_list_query_has_no_limit() {
        let params = published_posts_query(None, None);
        assert!(!params.iter().any(|(k, _)| *k == "limit"));
        assert!(!params.iter().any(|(k, _)| *k == "slug"));
    }
}
