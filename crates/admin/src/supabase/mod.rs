//! Hosted backend client for the admin: data API plus auth API.
//!
//! Same PostgREST-style wire conventions as the public site, but scoped to
//! the service-role key, which bypasses row-level policies. Writes send
//! `Prefer: return=representation` together with the single-object media
//! type, so a mutation that matched no row comes back as 406 and maps to
//! [`SupabaseError::NotFound`] - that is how deleting a nonexistent post is
//! detected instead of silently succeeding.

mod types;

pub use types::*;

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use thiserror::Error;

use ctrl_alt_crew_core::{PostId, RequestId, RequestStatus, UserId};

use crate::config::SupabaseConfig;

/// Single-object response media type; the backend answers 406 when the
/// filter matches no row.
const PGRST_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Errors that can occur when talking to the hosted backend.
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Credentials were rejected by the auth API.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No row matched the query.
    #[error("not found")]
    NotFound,

    /// Failed to build the client or parse a response.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Data + auth API client holding the service-role key.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    rest_url: String,
    auth_url: String,
}

impl AdminClient {
    /// Create a new client for the configured backend project.
    ///
    /// # Errors
    ///
    /// Returns an error if the service-role key is not a valid header value
    /// or the HTTP client fails to build.
    pub fn new(config: &SupabaseConfig) -> Result<Self, SupabaseError> {
        let key = config.service_role_key.expose_secret();

        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(key)
                .map_err(|e| SupabaseError::Parse(format!("invalid service-role key: {e}")))?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| SupabaseError::Parse(format!("invalid service-role key: {e}")))?,
        );

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            inner: Arc::new(AdminClientInner {
                client,
                rest_url: format!("{}/rest/v1", config.url),
                auth_url: format!("{}/auth/v1", config.url),
            }),
        })
    }

    // =========================================================================
    // Auth API
    // =========================================================================

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::InvalidCredentials`] on a 400/401 response;
    /// other failures map to their usual variants.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignIn, SupabaseError> {
        #[derive(Serialize)]
        struct Credentials<'a> {
            email: &'a str,
            password: &'a str,
        }

        let response = self
            .inner
            .client
            .post(format!("{}/token", self.inner.auth_url))
            .query(&[("grant_type", "password")])
            .json(&Credentials { email, password })
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            return Err(SupabaseError::InvalidCredentials);
        }

        check_status(response).await?.json().await.map_err(Into::into)
    }

    /// Revoke a user's access token. Best-effort: callers on the denial
    /// path ignore the result.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError` if the request fails or is refused.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), SupabaseError> {
        let response = self
            .inner
            .client
            .post(format!("{}/logout", self.inner.auth_url))
            // Revocation acts on the user's own token, not the service key.
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    /// Check whether `(user_id, "admin")` exists in the `user_roles`
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError` if the lookup request fails; the access
    /// guard treats any error as a denial.
    pub async fn has_admin_role(&self, user_id: UserId) -> Result<bool, SupabaseError> {
        let response = self
            .inner
            .client
            .get(format!("{}/user_roles", self.inner.rest_url))
            .query(&[
                ("select", "role".to_string()),
                ("user_id", format!("eq.{user_id}")),
                ("role", "eq.admin".to_string()),
                ("limit", "1".to_string()),
            ])
            .send()
            .await?;

        let rows: Vec<RoleRow> = check_status(response).await?.json().await?;
        Ok(!rows.is_empty())
    }

    // =========================================================================
    // Posts
    // =========================================================================

    /// List all posts (drafts included), newest first.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError` if the request or decoding fails.
    pub async fn list_posts(&self) -> Result<Vec<PostSummary>, SupabaseError> {
        let response = self
            .inner
            .client
            .get(format!("{}/posts", self.inner.rest_url))
            .query(&[
                ("select", "id,title,slug,author,published,created_at"),
                ("order", "created_at.desc"),
            ])
            .send()
            .await?;

        check_status(response).await?.json().await.map_err(Into::into)
    }

    /// Fetch a single post by id.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::NotFound`] if the id does not exist.
    pub async fn get_post(&self, id: PostId) -> Result<Post, SupabaseError> {
        let response = self
            .inner
            .client
            .get(format!("{}/posts", self.inner.rest_url))
            .header(ACCEPT, PGRST_OBJECT)
            .query(&[("select", "*".to_string()), ("id", format!("eq.{id}"))])
            .send()
            .await?;

        check_status(response).await?.json().await.map_err(Into::into)
    }

    /// Insert a new post and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError` if the insert is refused (e.g. duplicate
    /// slug) or the request fails.
    pub async fn create_post(&self, data: &PostData) -> Result<Post, SupabaseError> {
        let response = self
            .inner
            .client
            .post(format!("{}/posts", self.inner.rest_url))
            .header(ACCEPT, PGRST_OBJECT)
            .header("Prefer", "return=representation")
            .json(data)
            .send()
            .await?;

        check_status(response).await?.json().await.map_err(Into::into)
    }

    /// Update an existing post and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::NotFound`] if the id does not exist.
    pub async fn update_post(&self, id: PostId, data: &PostData) -> Result<Post, SupabaseError> {
        let response = self
            .inner
            .client
            .patch(format!("{}/posts", self.inner.rest_url))
            .header(ACCEPT, PGRST_OBJECT)
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{id}"))])
            .json(data)
            .send()
            .await?;

        check_status(response).await?.json().await.map_err(Into::into)
    }

    /// Delete a post.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::NotFound`] if the id does not exist - the
    /// caller reports that as a delete failure, never a silent success.
    pub async fn delete_post(&self, id: PostId) -> Result<(), SupabaseError> {
        let response = self
            .inner
            .client
            .delete(format!("{}/posts", self.inner.rest_url))
            .header(ACCEPT, PGRST_OBJECT)
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    // =========================================================================
    // Service requests
    // =========================================================================

    /// List all service requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError` if the request or decoding fails.
    pub async fn list_service_requests(&self) -> Result<Vec<ServiceRequest>, SupabaseError> {
        let response = self
            .inner
            .client
            .get(format!("{}/service_requests", self.inner.rest_url))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;

        check_status(response).await?.json().await.map_err(Into::into)
    }

    /// Set the status of a service request.
    ///
    /// The status is already a [`RequestStatus`], so only the four defined
    /// values can reach the wire.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::NotFound`] if the id does not exist.
    pub async fn update_request_status(
        &self,
        id: RequestId,
        status: RequestStatus,
    ) -> Result<(), SupabaseError> {
        let response = self
            .inner
            .client
            .patch(format!("{}/service_requests", self.inner.rest_url))
            .header(ACCEPT, PGRST_OBJECT)
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{id}"))])
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
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
    use axum::Router;
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::{delete, get};
    use secrecy::SecretString;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_status_serializes_to_wire_form() {
        // The PATCH body for a status update must carry the kebab-case value.
        let body = serde_json::json!({ "status": RequestStatus::InProgress });
        assert_eq!(body["status"], "in-progress");
    }

    #[test]
    fn test_error_display_does_not_panic_on_empty_message() {
        let err = SupabaseError::Api {
            status: 500,
            message: String::new(),
        };
        assert!(err.to_string().contains("500"));
    }

    /// Serve `router` on an ephemeral local port and return a client
    /// configured against it.
    async fn client_against(router: Router) -> AdminClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let config = crate::config::SupabaseConfig {
            url: format!("http://{addr}"),
            service_role_key: SecretString::from("test-key"),
        };
        AdminClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_delete_of_missing_row_maps_to_not_found() {
        // With return=representation and the single-object media type, a
        // DELETE matching no row answers 406; it must surface as NotFound,
        // never as a silent success.
        let router = Router::new().route(
            "/rest/v1/posts",
            delete(|| async { AxumStatus::NOT_ACCEPTABLE }),
        );
        let client = client_against(router).await;

        let err = client
            .delete_post(PostId::new(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, SupabaseError::NotFound), "got {err:?}");
    }

    #[tokio::test]
    async fn test_missing_post_maps_to_not_found() {
        let router = Router::new().route("/rest/v1/posts", get(|| async { AxumStatus::NOT_FOUND }));
        let client = client_against(router).await;

        let err = client
            .get_post(PostId::new(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, SupabaseError::NotFound), "got {err:?}");
    }

    #[tokio::test]
    async fn test_empty_role_rows_mean_no_admin() {
        let router = Router::new().route("/rest/v1/user_roles", get(|| async { "[]" }));
        let client = client_against(router).await;

        let has_role = client
            .has_admin_role(UserId::new(Uuid::new_v4()))
            .await
            .unwrap();
        assert!(!has_role);
    }
}
