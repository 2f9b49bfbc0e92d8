//! Preference route handlers.
//!
//! Two independent session slots: the display name (applied on explicit
//! save) and the dark-mode flag (also flips on immediate toggle). Neither
//! interacts with the cart.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{AppendHeaders, IntoResponse},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::models::session_keys;
use crate::routes::{PageChrome, page_chrome};

/// Preference form data.
///
/// The checkbox is only present in the body when checked.
#[derive(Debug, Deserialize)]
pub struct PreferencesForm {
    pub display_name: String,
    #[serde(default)]
    pub dark_mode: Option<String>,
}

/// Preferences page template.
#[derive(Template, WebTemplate)]
#[template(path = "preferences/show.html")]
pub struct PreferencesTemplate {
    pub chrome: PageChrome,
    pub saved: bool,
}

/// Display the preference form, primed with the stored values.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    PreferencesTemplate {
        chrome: page_chrome(&session).await,
        saved: false,
    }
}

/// Save both preference slots and confirm.
#[instrument(skip(session, form))]
pub async fn save(
    session: Session,
    Form(form): Form<PreferencesForm>,
) -> Result<PreferencesTemplate> {
    session
        .insert(session_keys::DISPLAY_NAME, form.display_name.trim())
        .await?;
    session
        .insert(session_keys::DARK_MODE, form.dark_mode.is_some())
        .await?;

    tracing::info!("preferences saved");

    // Reload the chrome after the write so the new name and mode render.
    Ok(PreferencesTemplate {
        chrome: page_chrome(&session).await,
        saved: true,
    })
}

/// Flip the dark-mode flag immediately (HTMX).
///
/// Responds with `HX-Refresh` so the page re-renders with the new body
/// class; the display name is untouched.
#[instrument(skip(session))]
pub async fn toggle_dark_mode(session: Session) -> Result<impl IntoResponse> {
    let current = session
        .get::<bool>(session_keys::DARK_MODE)
        .await
        .ok()
        .flatten()
        .unwrap_or(false);
    session.insert(session_keys::DARK_MODE, !current).await?;

    Ok((
        StatusCode::NO_CONTENT,
        AppendHeaders([("HX-Refresh", "true")]),
    ))
}
