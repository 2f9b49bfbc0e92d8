//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (featured products, greeting)
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /catalog                        - Product grid
//! GET  /catalog/{id}/description       - Expanded description panel (HTMX)
//! GET  /catalog/{id}/description/hide  - Collapsed panel control (HTMX)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add one unit (returns confirmation, triggers cart-updated)
//! POST /cart/update            - Set quantity; zero removes (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! POST /cart/clear             - Empty the cart (returns cart_items fragment)
//! POST /cart/checkout          - Simulated checkout (returns result fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Contact
//! GET  /contact                - Contact form
//! POST /contact                - Validate and confirm
//!
//! # Preferences
//! GET  /preferences            - Preference form
//! POST /preferences            - Save display name and dark mode
//! POST /preferences/dark-mode  - Immediate dark-mode toggle (HTMX)
//! ```

pub mod cart;
pub mod catalog;
pub mod contact;
pub mod home;
pub mod preferences;

use axum::{
    Router,
    routing::{get, post},
};
use tower_sessions::Session;

use crate::models::Preferences;
use crate::state::AppState;

/// Shared template state for the base layout: the cart badge plus the
/// preferences the layout renders (dark-mode class, greeting).
///
/// Reloaded from the session on every page render so views never hold an
/// authoritative copy of cart or preference state.
#[derive(Debug, Clone)]
pub struct PageChrome {
    pub dark_mode: bool,
    pub display_name: Option<String>,
    pub cart_count: u32,
}

/// Assemble the page chrome for the current session.
pub async fn page_chrome(session: &Session) -> PageChrome {
    let preferences = Preferences::load(session).await;
    let cart = cart::read_cart(session).await;

    PageChrome {
        dark_mode: preferences.dark_mode,
        display_name: preferences.display_name,
        cart_count: cart.item_count(),
    }
}

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .route("/{id}/description", get(catalog::description))
        .route("/{id}/description/hide", get(catalog::description_hide))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/checkout", post(cart::checkout))
        .route("/count", get(cart::count))
}

/// Create the preference routes router.
pub fn preference_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(preferences::show).post(preferences::save))
        .route("/dark-mode", post(preferences::toggle_dark_mode))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog routes
        .nest("/catalog", catalog_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Contact form
        .route("/contact", get(contact::show).post(contact::submit))
        // Preference routes
        .nest("/preferences", preference_routes())
}
