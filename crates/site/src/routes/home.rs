//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::filters;

/// A headline statistic shown in the hero section.
#[derive(Clone)]
pub struct Stat {
    pub value: &'static str,
    pub label: &'static str,
}

/// A service teaser card on the home page.
#[derive(Clone)]
pub struct ServiceTeaser {
    pub title: &'static str,
    pub description: &'static str,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub stats: Vec<Stat>,
    pub teasers: Vec<ServiceTeaser>,
}

/// Display the home page.
#[instrument]
pub async fn home() -> impl IntoResponse {
    HomeTemplate {
        stats: vec![
            Stat { value: "50+", label: "Projects Shipped" },
            Stat { value: "30+", label: "Happy Clients" },
            Stat { value: "5", label: "Years Building" },
        ],
        teasers: vec![
            ServiceTeaser {
                title: "AI & Data Science Solutions",
                description: "Machine learning models that actually learn (unlike some interns we've met)",
            },
            ServiceTeaser {
                title: "RAG Pipelines & Chatbots",
                description: "Conversational AI so smart, they'll probably ask for vacation days",
            },
            ServiceTeaser {
                title: "Web Development",
                description: "Websites that work on everything except Internet Explorer (we have standards)",
            },
        ],
    }
}
