//! Post create/edit/delete workflows.
//!
//! Submitted content passes through the sanitization policy before it is
//! stored; the public site sanitizes again at render time, so even rows
//! written by other clients stay within the allow-list.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use ctrl_alt_crew_core::{PostId, Slug, sanitize};

use crate::error::AppError;
use crate::middleware::auth::RequireAdmin;
use crate::routes::dashboard;
use crate::state::AppState;
use crate::supabase::{Post, PostData, SupabaseError};

/// Post form template, shared by the create and edit pages.
#[derive(Template, WebTemplate)]
#[template(path = "post_form.html")]
pub struct PostFormTemplate {
    pub heading: &'static str,
    /// Where the form posts back to.
    pub action: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub cover_image: String,
    pub author: String,
    pub published: bool,
    pub error: Option<String>,
}

/// Post form data.
#[derive(Debug, Deserialize)]
pub struct PostForm {
    pub title: String,
    #[serde(default)]
    pub slug: String,
    pub content: String,
    #[serde(default)]
    pub cover_image: String,
    pub author: String,
    /// Checkbox: present when checked, absent otherwise.
    #[serde(default)]
    pub published: Option<String>,
}

/// Display the new-post form.
///
/// GET /posts/new
#[instrument(skip_all)]
pub async fn new_post(RequireAdmin(_admin): RequireAdmin) -> impl IntoResponse {
    blank_form(None)
}

/// Create a post.
///
/// POST /posts
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<PostForm>,
) -> Response {
    let data = match validate_post_form(&form) {
        Ok(data) => data,
        Err(err) => return form_with_error(&form, None, err.user_message().to_string()),
    };

    match state.backend().create_post(&data).await {
        Ok(_) => Redirect::to("/?saved=true").into_response(),
        Err(err) => {
            let err = AppError::SaveFailed(err);
            tracing::error!(error = %err, "post creation failed");
            form_with_error(&form, None, err.user_message().to_string())
        }
    }
}

/// Display the edit form for an existing post.
///
/// GET /posts/{id}/edit
#[instrument(skip(state, _admin))]
pub async fn edit(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<PostId>,
) -> Result<Response, AppError> {
    let post = fetch_post(&state, id).await?;
    Ok(edit_form(&post, None).into_response())
}

/// Update a post.
///
/// POST /posts/{id}
#[instrument(skip(state, _admin, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<PostId>,
    Form(form): Form<PostForm>,
) -> Response {
    let data = match validate_post_form(&form) {
        Ok(data) => data,
        Err(err) => return form_with_error(&form, Some(id), err.user_message().to_string()),
    };

    match state.backend().update_post(id, &data).await {
        Ok(_) => Redirect::to("/?saved=true").into_response(),
        Err(SupabaseError::NotFound) => AppError::NotFound.into_response(),
        Err(err) => {
            let err = AppError::SaveFailed(err);
            tracing::error!(error = %err, %id, "post update failed");
            form_with_error(&form, Some(id), err.user_message().to_string())
        }
    }
}

/// Delete a post.
///
/// POST /posts/{id}/delete
///
/// A delete that matched no row is a failure, not a silent success; the
/// dashboard re-renders with a delete-failure notice.
#[instrument(skip(state, admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<PostId>,
) -> Result<Response, AppError> {
    match state.backend().delete_post(id).await {
        Ok(()) => Ok(Redirect::to("/?deleted=true").into_response()),
        Err(err) => {
            let err = AppError::DeleteFailed(err);
            tracing::error!(error = %err, %id, "post delete failed");
            let page =
                dashboard::render(&state, &admin, None, Some(err.user_message().to_string()))
                    .await?;
            Ok(page.into_response())
        }
    }
}

async fn fetch_post(state: &AppState, id: PostId) -> Result<Post, AppError> {
    state.backend().get_post(id).await.map_err(|err| match err {
        SupabaseError::NotFound => AppError::NotFound,
        other => AppError::LoadFailed(other),
    })
}

/// Validate the submitted form into an insert/update payload.
///
/// Content is sanitized here, before it can reach the wire. An explicit
/// slug must be canonical; a blank one is generated from the title.
fn validate_post_form(form: &PostForm) -> Result<PostData, AppError> {
    let title = form.title.trim();
    let author = form.author.trim();

    if title.is_empty() || author.is_empty() {
        return Err(AppError::Validation(
            "Title and author are required.".to_string(),
        ));
    }

    let slug = form.slug.trim();
    let slug = if slug.is_empty() {
        Slug::generate(title)
    } else {
        Slug::parse(slug)
    }
    .map_err(|_| {
        AppError::Validation(
            "Slug must contain only lowercase letters, digits, and hyphens.".to_string(),
        )
    })?;

    let content = sanitize(form.content.trim());
    if content.trim().is_empty() {
        return Err(AppError::Validation(
            "Post content is required.".to_string(),
        ));
    }

    let cover_image = form.cover_image.trim();

    Ok(PostData {
        title: title.to_string(),
        slug,
        content,
        cover_image: (!cover_image.is_empty()).then(|| cover_image.to_string()),
        author: author.to_string(),
        published: form.published.is_some(),
    })
}

fn blank_form(error: Option<String>) -> PostFormTemplate {
    PostFormTemplate {
        heading: "New post",
        action: "/posts".to_string(),
        title: String::new(),
        slug: String::new(),
        content: String::new(),
        cover_image: String::new(),
        author: String::new(),
        published: false,
        error,
    }
}

fn edit_form(post: &Post, error: Option<String>) -> PostFormTemplate {
    PostFormTemplate {
        heading: "Edit post",
        action: format!("/posts/{}", post.id),
        title: post.title.clone(),
        slug: post.slug.to_string(),
        content: post.content.clone(),
        cover_image: post.cover_image.clone().unwrap_or_default(),
        author: post.author.clone(),
        published: post.published,
        error,
    }
}

/// Re-render the form with the user's input preserved.
fn form_with_error(form: &PostForm, id: Option<PostId>, error: String) -> Response {
    let (heading, action) = match id {
        Some(id) => ("Edit post", format!("/posts/{id}")),
        None => ("New post", "/posts".to_string()),
    };

    PostFormTemplate {
        heading,
        action,
        title: form.title.clone(),
        slug: form.slug.clone(),
        content: form.content.clone(),
        cover_image: form.cover_image.clone(),
        author: form.author.clone(),
        published: form.published.is_some(),
        error: Some(error),
    }
    .into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_form() -> PostForm {
        PostForm {
            title: "Shipping Fast".to_string(),
            slug: String::new(),
            content: "<p>We shipped.</p>".to_string(),
            cover_image: String::new(),
            author: "Crew".to_string(),
            published: Some("on".to_string()),
        }
    }

    #[test]
    fn test_valid_form_generates_slug_from_title() {
        let data = validate_post_form(&valid_form()).unwrap();
        assert_eq!(data.slug.as_str(), "shipping-fast");
        assert!(data.published);
        assert!(data.cover_image.is_none());
    }

    #[test]
    fn test_explicit_slug_must_be_canonical() {
        let mut form = valid_form();
        form.slug = "Shipping Fast".to_string();
        assert!(matches!(
            validate_post_form(&form),
            Err(AppError::Validation(_))
        ));

        form.slug = "shipping-fast".to_string();
        let data = validate_post_form(&form).unwrap();
        assert_eq!(data.slug.as_str(), "shipping-fast");
    }

    #[test]
    fn test_content_is_sanitized_before_storage() {
        let mut form = valid_form();
        form.content = "<p>hi</p><script>steal()</script>".to_string();
        let data = validate_post_form(&form).unwrap();
        assert_eq!(data.content, "<p>hi</p>");
    }

    #[test]
    fn test_content_that_sanitizes_to_nothing_is_rejected() {
        let mut form = valid_form();
        form.content = "<script>only()</script>".to_string();
        assert!(matches!(
            validate_post_form(&form),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_title_or_author_rejected() {
        let mut form = valid_form();
        form.title = "  ".to_string();
        assert!(matches!(
            validate_post_form(&form),
            Err(AppError::Validation(_))
        ));

        let mut form = valid_form();
        form.author = String::new();
        assert!(matches!(
            validate_post_form(&form),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_unchecked_box_means_draft() {
        let mut form = valid_form();
        form.published = None;
        let data = validate_post_form(&form).unwrap();
        assert!(!data.published);
    }
}
