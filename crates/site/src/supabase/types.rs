//! Row types exchanged with the hosted backend's data API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ctrl_alt_crew_core::{PostId, Slug};

/// A blog post row from the `posts` collection.
///
/// The site only ever queries with `published=eq.true`, so every row that
/// reaches a template is public. Content is still sanitized again at render
/// time; see [`ctrl_alt_crew_core::sanitize`].
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub slug: Slug,
    /// Raw HTML as stored; sanitize before injecting into markup.
    pub content: String,
    pub cover_image: Option<String>,
    pub author: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

/// A new service request submitted from the public site.
///
/// Status is deliberately absent: the backend defaults it to `pending`, and
/// only the admin binary may change it afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct NewServiceRequest {
    pub service_type: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub project_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_post_row_deserializes() {
        let json = serde_json::json!({
            "id": "7e6f0a46-0a9c-4b6e-9a3e-3a55d9a6a001",
            "title": "Hello World",
            "slug": "hello-world",
            "content": "<p>hi</p>",
            "cover_image": null,
            "author": "A",
            "published": true,
            "created_at": "2026-08-01T09:30:00+00:00"
        });

        let post: Post = serde_json::from_value(json).unwrap();
        assert_eq!(post.slug.as_str(), "hello-world");
        assert!(post.published);
        assert!(post.cover_image.is_none());
    }

    #[test]
    fn test_new_request_omits_empty_optionals() {
        let request = NewServiceRequest {
            service_type: "Web Development".to_string(),
            name: "Jo".to_string(),
            email: "jo@example.com".to_string(),
            company: None,
            phone: None,
            project_description: "A site".to_string(),
            budget_range: Some("10k-25k".to_string()),
            timeline: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("company"));
        assert!(!obj.contains_key("status"));
        assert_eq!(obj["budget_range"], "10k-25k");
    }
}
