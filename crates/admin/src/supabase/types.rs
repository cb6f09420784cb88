//! Row and payload types exchanged with the hosted backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ctrl_alt_crew_core::{PostId, RequestId, RequestStatus, Slug, UserId};

/// A full blog post row.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub slug: Slug,
    pub content: String,
    pub cover_image: Option<String>,
    pub author: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

/// A post row without content, for the dashboard listing.
#[derive(Debug, Clone, Deserialize)]
pub struct PostSummary {
    pub id: PostId,
    pub title: String,
    pub slug: Slug,
    pub author: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

/// Insert/update payload for a post.
///
/// `content` is expected to have passed the sanitization policy already;
/// the workflow layer enforces that before constructing this type.
#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub title: String,
    pub slug: Slug,
    pub content: String,
    pub cover_image: Option<String>,
    pub author: String,
    pub published: bool,
}

/// A service request row.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceRequest {
    pub id: RequestId,
    pub service_type: String,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub project_description: String,
    pub budget_range: Option<String>,
    pub timeline: Option<String>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// A row in the `user_roles` collection.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleRow {
    pub role: String,
}

/// Successful password sign-in response from the auth API.
#[derive(Debug, Clone, Deserialize)]
pub struct SignIn {
    pub access_token: String,
    pub user: AuthUser,
}

/// The authenticated user inside a sign-in response.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_deserializes_token_and_user() {
        let json = serde_json::json!({
            "access_token": "jwt-token",
            "token_type": "bearer",
            "expires_in": 3600,
            "user": { "id": "7e6f0a46-0a9c-4b6e-9a3e-3a55d9a6a001", "email": "a@b.co" }
        });

        let sign_in: SignIn = serde_json::from_value(json).unwrap();
        assert_eq!(sign_in.access_token, "jwt-token");
        assert_eq!(
            sign_in.user.id.to_string(),
            "7e6f0a46-0a9c-4b6e-9a3e-3a55d9a6a001"
        );
    }

    #[test]
    fn test_service_request_row_deserializes_status() {
        let json = serde_json::json!({
            "id": "7e6f0a46-0a9c-4b6e-9a3e-3a55d9a6a002",
            "service_type": "Web Development",
            "name": "Jo",
            "email": "jo@example.com",
            "company": null,
            "phone": null,
            "project_description": "A site",
            "budget_range": "10k-25k",
            "timeline": null,
            "status": "in-progress",
            "created_at": "2026-08-01T09:30:00+00:00"
        });

        let row: ServiceRequest = serde_json::from_value(json).unwrap();
        assert_eq!(row.status, RequestStatus::InProgress);
    }

    #[test]
    fn test_post_data_serializes_slug_as_string() {
        let data = PostData {
            title: "Hello".to_string(),
            slug: Slug::parse("hello").unwrap(),
            content: "<p>hi</p>".to_string(),
            cover_image: None,
            author: "A".to_string(),
            published: true,
        };

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["slug"], "hello");
        assert_eq!(json["cover_image"], serde_json::Value::Null);
    }
}
