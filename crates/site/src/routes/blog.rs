//! Blog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use tracing::instrument;

use ctrl_alt_crew_core::{Slug, sanitize};

use crate::error::AppError;
use crate::filters;
use crate::routes::not_found;
use crate::state::AppState;
use crate::supabase::Post;

/// Post view for templates.
///
/// `content_html` has passed through the sanitization policy immediately
/// before construction; templates may inject it with escaping disabled.
#[derive(Clone)]
pub struct PostView {
    pub slug: String,
    pub title: String,
    pub author: String,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub content_html: String,
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        Self {
            slug: post.slug.to_string(),
            title: post.title.clone(),
            author: post.author.clone(),
            cover_image: post.cover_image.clone(),
            created_at: post.created_at,
            // Defensive re-sanitization: stored rows may predate the
            // current policy.
            content_html: sanitize(&post.content),
        }
    }
}

/// Blog index page template.
#[derive(Template, WebTemplate)]
#[template(path = "blog/index.html")]
pub struct BlogIndexTemplate {
    pub posts: Vec<PostView>,
}

/// Blog post detail template.
#[derive(Template, WebTemplate)]
#[template(path = "blog/show.html")]
pub struct BlogShowTemplate {
    pub post: PostView,
    pub related_posts: Vec<PostView>,
}

/// Display the blog index with all published posts, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let posts: Vec<PostView> = state
        .content()
        .list_published_posts()
        .await
        .map_err(AppError::LoadFailed)?
        .iter()
        .map(PostView::from)
        .collect();

    Ok(BlogIndexTemplate { posts })
}

/// Display a single published post by slug.
///
/// Unknown or unpublished slugs render the generic 404 page rather than an
/// error message.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let Ok(slug) = Slug::parse(&slug) else {
        return Ok(not_found().await);
    };

    let post = match state.content().get_published_post(&slug).await {
        Ok(post) => post,
        Err(crate::supabase::SupabaseError::NotFound) => return Ok(not_found().await),
        Err(err) => return Err(AppError::LoadFailed(err)),
    };

    // Related posts are a display affordance; degrade to none on failure.
    let related_posts: Vec<PostView> = match state.content().related_posts(&slug).await {
        Ok(posts) => posts.iter().map(PostView::from).collect(),
        Err(err) => {
            tracing::debug!(error = %err, "related posts lookup failed");
            Vec::new()
        }
    };

    Ok(BlogShowTemplate {
        post: PostView::from(&post),
        related_posts,
    }
    .into_response())
}

/// Create the blog routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/{slug}", get(show))
}
