//! Static page route handlers: about, portfolio, contact.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::filters;

/// A portfolio project card.
#[derive(Clone)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub tech_stack: &'static [&'static str],
}

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate;

/// Portfolio page template.
#[derive(Template, WebTemplate)]
#[template(path = "portfolio.html")]
pub struct PortfolioTemplate {
    pub projects: Vec<Project>,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate;

/// Display the about page.
#[instrument]
pub async fn about() -> impl IntoResponse {
    AboutTemplate
}

/// Display the portfolio page.
#[instrument]
pub async fn portfolio() -> impl IntoResponse {
    PortfolioTemplate {
        projects: vec![
            Project {
                title: "SmartChat AI Assistant",
                description: "RAG-powered chatbot that actually understands context (shocking, we know)",
                tech_stack: &["OpenAI", "LangChain", "Pinecone", "FastAPI"],
            },
            Project {
                title: "PredictaFlow Analytics",
                description: "ML pipeline that predicts user behavior better than a fortune teller",
                tech_stack: &["Python", "TensorFlow", "Airflow", "PostgreSQL"],
            },
            Project {
                title: "EcoTrack Mobile App",
                description: "Carbon footprint tracker that makes saving the planet addictive",
                tech_stack: &["React Native", "Node.js", "MongoDB"],
            },
            Project {
                title: "AutoCode Generator",
                description: "AI that writes code while you drink coffee (the dream is real)",
                tech_stack: &["OpenAI", "TypeScript", "AST parsing"],
            },
        ],
    }
}

/// Display the contact page.
#[instrument]
pub async fn contact() -> impl IntoResponse {
    ContactTemplate
}
