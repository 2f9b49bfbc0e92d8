//! Contact form route handlers.
//!
//! Stateless validation over three fields, re-run in full on every submit.
//! Invalid submissions re-render the form with per-field messages and the
//! entered values retained; a valid submission confirms and resets.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, response::IntoResponse};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use gondola_core::Email;

use crate::filters;
use crate::routes::{PageChrome, page_chrome};

const MIN_NAME_LENGTH: usize = 2;
const MIN_MESSAGE_LENGTH: usize = 10;

/// Contact form data.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Contact form display data: entered values plus per-field errors.
#[derive(Clone, Default)]
pub struct ContactFormView {
    pub name: String,
    pub email: String,
    pub message: String,
    pub name_error: Option<String>,
    pub email_error: Option<String>,
    pub message_error: Option<String>,
}

impl ContactFormView {
    /// Validate a submission, keeping the entered values for re-display.
    fn validate(form: &ContactForm) -> Self {
        Self {
            name: form.name.clone(),
            email: form.email.clone(),
            message: form.message.clone(),
            name_error: validate_name(&form.name),
            email_error: validate_email(&form.email),
            message_error: validate_message(&form.message),
        }
    }

    fn is_valid(&self) -> bool {
        self.name_error.is_none() && self.email_error.is_none() && self.message_error.is_none()
    }
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact/show.html")]
pub struct ContactTemplate {
    pub chrome: PageChrome,
    pub form: ContactFormView,
    pub submitted: bool,
}

/// Display the contact form.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    ContactTemplate {
        chrome: page_chrome(&session).await,
        form: ContactFormView::default(),
        submitted: false,
    }
}

/// Validate a submission.
///
/// All three fields are re-validated on every attempt. A fully valid form
/// confirms and resets; any invalid field blocks submission and keeps the
/// entered values.
#[instrument(skip(session, form), fields(email = %form.email))]
pub async fn submit(session: Session, Form(form): Form<ContactForm>) -> impl IntoResponse {
    let chrome = page_chrome(&session).await;
    let view = ContactFormView::validate(&form);

    if view.is_valid() {
        tracing::info!(email = %form.email.trim(), "contact form submitted");
        return ContactTemplate {
            chrome,
            form: ContactFormView::default(),
            submitted: true,
        };
    }

    ContactTemplate {
        chrome,
        form: view,
        submitted: false,
    }
}

fn validate_name(name: &str) -> Option<String> {
    if name.trim().chars().count() < MIN_NAME_LENGTH {
        return Some(format!(
            "Name must be at least {MIN_NAME_LENGTH} characters."
        ));
    }
    None
}

fn validate_email(email: &str) -> Option<String> {
    if Email::parse(email.trim()).is_err() {
        return Some("Enter a valid email address (e.g. name@domain.com).".to_string());
    }
    None
}

fn validate_message(message: &str) -> Option<String> {
    if message.trim().chars().count() < MIN_MESSAGE_LENGTH {
        return Some(format!(
            "Message must be at least {MIN_MESSAGE_LENGTH} characters."
        ));
    }
    None
}
