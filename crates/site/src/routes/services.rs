//! Services page and service-request submission.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use ctrl_alt_crew_core::Email;

use crate::error::AppError;
use crate::filters;
use crate::state::AppState;
use crate::supabase::NewServiceRequest;

/// A service offering shown on the services page.
#[derive(Clone)]
pub struct Service {
    pub title: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub tech_stack: &'static [&'static str],
}

/// Services page template.
#[derive(Template, WebTemplate)]
#[template(path = "services.html")]
pub struct ServicesTemplate {
    pub services: Vec<Service>,
    /// Set after a successful submission redirect.
    pub submitted: bool,
    /// Validation or save-failure notice for the request form.
    pub error: Option<String>,
}

/// Query parameters for the services page.
#[derive(Debug, Deserialize)]
pub struct ServicesQuery {
    #[serde(default)]
    submitted: bool,
}

/// Service request form data.
#[derive(Debug, Deserialize)]
pub struct ServiceRequestForm {
    pub service_type: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub phone: String,
    pub project_description: String,
    #[serde(default)]
    pub budget_range: String,
    #[serde(default)]
    pub timeline: String,
}

/// Display the services page.
#[instrument(skip(query))]
pub async fn index(Query(query): Query<ServicesQuery>) -> impl IntoResponse {
    services_page(query.submitted, None)
}

/// Submit a service request.
///
/// POST /services/request
///
/// Malformed input is rejected before any network call; a backend failure
/// re-renders the page with a generic save-failure notice.
#[instrument(skip(state, form), fields(service_type = %form.service_type))]
pub async fn submit_request(
    State(state): State<AppState>,
    Form(form): Form<ServiceRequestForm>,
) -> Response {
    let request = match validate_request(&form) {
        Ok(request) => request,
        Err(err) => {
            tracing::debug!(error = %err, "service request rejected");
            return services_page(false, Some(err.user_message().to_string())).into_response();
        }
    };

    match state.content().submit_service_request(&request).await {
        Ok(()) => Redirect::to("/services?submitted=true").into_response(),
        Err(err) => {
            let err = AppError::SaveFailed(err);
            tracing::error!(error = %err, "service request submission failed");
            services_page(false, Some(err.user_message().to_string())).into_response()
        }
    }
}

/// Validate the submitted form into an insertable request.
fn validate_request(form: &ServiceRequestForm) -> Result<NewServiceRequest, AppError> {
    let name = form.name.trim();
    let description = form.project_description.trim();
    let service_type = form.service_type.trim();

    if service_type.is_empty() || name.is_empty() || description.is_empty() {
        return Err(AppError::Validation(
            "Name, email, and project description are required.".to_string(),
        ));
    }

    let email = Email::parse(&form.email)
        .map_err(|_| AppError::Validation("Please enter a valid email address.".to_string()))?;

    Ok(NewServiceRequest {
        service_type: service_type.to_string(),
        name: name.to_string(),
        email: email.into_inner(),
        company: non_empty(&form.company),
        phone: non_empty(&form.phone),
        project_description: description.to_string(),
        budget_range: non_empty(&form.budget_range),
        timeline: non_empty(&form.timeline),
    })
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn services_page(submitted: bool, error: Option<String>) -> ServicesTemplate {
    ServicesTemplate {
        services: service_catalog(),
        submitted,
        error,
    }
}

fn service_catalog() -> Vec<Service> {
    vec![
        Service {
            title: "AI & Data Science Solutions",
            description: "Machine learning models that actually learn (unlike some interns we've met)",
            features: &[
                "Custom ML Model Development",
                "Data Pipeline Architecture",
                "Predictive Analytics",
                "Neural Network Training",
                "Model Optimization & Deployment",
            ],
            tech_stack: &["Python", "TensorFlow", "PyTorch", "Scikit-learn", "Pandas"],
        },
        Service {
            title: "RAG Pipelines & Chatbots",
            description: "Conversational AI so smart, they'll probably ask for vacation days",
            features: &[
                "Retrieval-Augmented Generation",
                "Custom Chatbot Development",
                "Knowledge Base Integration",
                "Multi-channel Deployment",
                "Continuous Learning Systems",
            ],
            tech_stack: &["OpenAI", "LangChain", "Vector DBs", "FastAPI", "React"],
        },
        Service {
            title: "Web Development",
            description: "Websites that work on everything except Internet Explorer (we have standards)",
            features: &[
                "Full-Stack Applications",
                "Responsive Design",
                "Performance Optimization",
                "API Development",
                "Cloud Deployment",
            ],
            tech_stack: &["React", "Node.js", "TypeScript", "Tailwind", "PostgreSQL"],
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_form() -> ServiceRequestForm {
        ServiceRequestForm {
            service_type: "Web Development".to_string(),
            name: "Jo".to_string(),
            email: "jo@example.com".to_string(),
            company: String::new(),
            phone: "  ".to_string(),
            project_description: "A marketing site".to_string(),
            budget_range: "10k-25k".to_string(),
            timeline: String::new(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let request = validate_request(&valid_form()).unwrap();
        assert_eq!(request.email, "jo@example.com");
        assert!(request.company.is_none());
        assert!(request.phone.is_none());
        assert_eq!(request.budget_range.as_deref(), Some("10k-25k"));
    }

    #[test]
    fn test_missing_required_fields_rejected() {
        let mut form = valid_form();
        form.name = "   ".to_string();
        assert!(matches!(validate_request(&form), Err(AppError::Validation(_))));

        let mut form = valid_form();
        form.project_description = String::new();
        assert!(matches!(validate_request(&form), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut form = valid_form();
        form.email = "not-an-email".to_string();
        assert!(matches!(validate_request(&form), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_submission_redirect_target_deserializes() {
        use axum::http::Uri;

        let Query(query) =
            Query::<ServicesQuery>::try_from_uri(&Uri::from_static("/services?submitted=true"))
                .unwrap();
        assert!(query.submitted);
    }
}
