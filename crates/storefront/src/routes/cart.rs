//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself is stored in the session: each handler reloads it,
//! applies one pure state transition from `gondola_core::Cart`, and writes
//! it back wholesale before responding. A persisted value that fails to
//! deserialize reloads silently as an empty cart.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use gondola_core::{Cart, CartLine, ProductId};

use crate::error::add_breadcrumb;
use crate::filters;
use crate::models::session_keys;
use crate::routes::{PageChrome, page_chrome};
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: i32,
    pub name: String,
    pub image_url: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub shipping: String,
    pub free_shipping: bool,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// Project the cart into display data, recomputing totals.
    #[must_use]
    pub fn from_cart(cart: &Cart, image_base: &str) -> Self {
        let totals = cart.totals();

        Self {
            items: cart
                .lines()
                .iter()
                .map(|line| CartItemView::from_line(line, image_base))
                .collect(),
            subtotal: totals.subtotal.to_string(),
            shipping: if totals.free_shipping() {
                "FREE".to_string()
            } else {
                totals.shipping.to_string()
            },
            free_shipping: totals.free_shipping(),
            total: totals.total.to_string(),
            item_count: cart.item_count(),
        }
    }
}

impl CartItemView {
    fn from_line(line: &CartLine, image_base: &str) -> Self {
        Self {
            product_id: line.product_id.as_i32(),
            name: line.name.clone(),
            image_url: image_url(image_base, &line.image),
            quantity: line.quantity,
            price: line.price.to_string(),
            line_total: line.line_total().to_string(),
        }
    }
}

/// Build an image URL from the configured base and a catalog file name.
pub(crate) fn image_url(image_base: &str, file_name: &str) -> String {
    format!("{}/{}", image_base.trim_end_matches('/'), file_name)
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Read the cart from the session.
///
/// Missing or malformed persisted carts reload as empty.
pub(crate) async fn read_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Write the cart to the session, overwriting the previous value.
async fn write_cart(
    session: &Session,
    cart: &Cart,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
}

/// Update cart form data.
///
/// Quantity is signed so that client-supplied negatives land in the same
/// remove path as zero instead of failing to parse.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i32,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i32,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub chrome: PageChrome,
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Added-to-cart confirmation fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_added.html")]
pub struct CartAddedTemplate {
    pub name: String,
    pub count: u32,
}

/// Checkout result fragment template (for HTMX).
///
/// Replaces the cart items block, so it carries the post-checkout view.
#[derive(Template, WebTemplate)]
#[template(path = "partials/checkout_result.html")]
pub struct CheckoutResultTemplate {
    pub success: bool,
    pub cart: CartView,
}

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let chrome = page_chrome(&session).await;
    let cart = read_cart(&session).await;

    CartShowTemplate {
        chrome,
        cart: CartView::from_cart(&cart, &state.config().image_base),
    }
}

/// Add one unit of a product to the cart (HTMX).
///
/// Resolves the product against the catalog, loading it first when the
/// cache is cold. An id missing from the catalog is a silent no-op (stale
/// UI); a catalog that cannot load degrades the same way. Returns a
/// confirmation fragment and an HTMX trigger to refresh cart views.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Response {
    let id = ProductId::new(form.product_id);
    let mut cart = read_cart(&session).await;

    let product = match state.catalog().find(id).await {
        Ok(Some(product)) => product,
        Ok(None) => {
            // Stale UI: the id is not in the loaded catalog
            tracing::debug!(product_id = %id, "add-to-cart for unknown product ignored");
            return ().into_response();
        }
        Err(e) => {
            tracing::warn!(product_id = %id, error = %e, "catalog unavailable, add-to-cart ignored");
            return ().into_response();
        }
    };

    cart.add(&product);
    if let Err(e) = write_cart(&session, &cart).await {
        tracing::error!("Failed to save cart to session: {e}");
    }

    add_breadcrumb(
        "cart",
        "Added product",
        Some(&[("product_id", &id.to_string())]),
    );

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartAddedTemplate {
            name: product.name,
            count: cart.item_count(),
        },
    )
        .into_response()
}

/// Update cart item quantity (HTMX).
///
/// A quantity of zero or below removes the line.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    let id = ProductId::new(form.product_id);
    let quantity = u32::try_from(form.quantity).unwrap_or(0);

    let mut cart = read_cart(&session).await;
    cart.set_quantity(id, quantity);
    if let Err(e) = write_cart(&session, &cart).await {
        tracing::error!("Failed to save cart to session: {e}");
    }

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from_cart(&cart, &state.config().image_base),
        },
    )
        .into_response()
}

/// Remove item from cart (HTMX).
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let mut cart = read_cart(&session).await;
    cart.remove(ProductId::new(form.product_id));
    if let Err(e) = write_cart(&session, &cart).await {
        tracing::error!("Failed to save cart to session: {e}");
    }

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from_cart(&cart, &state.config().image_base),
        },
    )
        .into_response()
}

/// Empty the cart (HTMX).
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Response {
    let mut cart = read_cart(&session).await;
    cart.clear();
    if let Err(e) = write_cart(&session, &cart).await {
        tracing::error!("Failed to save cart to session: {e}");
    }

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from_cart(&cart, &state.config().image_base),
        },
    )
        .into_response()
}

/// Simulated checkout (HTMX).
///
/// A non-empty cart is cleared and confirmed; checking out an empty cart
/// reports a message and performs no mutation.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Response {
    let mut cart = read_cart(&session).await;

    if cart.is_empty() {
        return CheckoutResultTemplate {
            success: false,
            cart: CartView::from_cart(&cart, &state.config().image_base),
        }
        .into_response();
    }

    cart.clear();
    if let Err(e) = write_cart(&session, &cart).await {
        tracing::error!("Failed to save cart to session: {e}");
    }

    add_breadcrumb("cart", "Checkout completed", None);

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CheckoutResultTemplate {
            success: true,
            cart: CartView::from_cart(&cart, &state.config().image_base),
        },
    )
        .into_response()
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = read_cart(&session).await;

    CartCountTemplate {
        count: cart.item_count(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use gondola_core::{Price, Product};
    use tower_sessions::{MemoryStore, Session};

    use super::*;

    fn product(id: i32, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Wine {id}"),
            price: Price::from_pesos(price),
            image: format!("wine-{id}.jpg"),
            description: "A test wine.".to_string(),
        }
    }

    fn memory_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[test]
    fn test_cart_view_projects_lines_and_totals() {
        let mut cart = Cart::new();
        cart.add(&product(1, 5000));
        cart.add(&product(1, 5000));

        let view = CartView::from_cart(&cart, "/static/img");

        assert_eq!(view.items.len(), 1);
        let item = view.items.first().unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.price, "$5.000");
        assert_eq!(item.line_total, "$10.000");
        assert_eq!(item.image_url, "/static/img/wine-1.jpg");

        assert_eq!(view.subtotal, "$10.000");
        assert_eq!(view.shipping, "$1.500");
        assert!(!view.free_shipping);
        assert_eq!(view.total, "$11.500");
        assert_eq!(view.item_count, 2);
    }

    #[test]
    fn test_cart_view_free_shipping_renders_free() {
        let mut cart = Cart::new();
        cart.add(&product(1, 15_000));

        let view = CartView::from_cart(&cart, "/static/img");

        assert_eq!(view.shipping, "FREE");
        assert!(view.free_shipping);
        assert_eq!(view.total, "$15.000");
    }

    #[test]
    fn test_image_url_joins_without_double_slash() {
        assert_eq!(image_url("/static/img", "a.jpg"), "/static/img/a.jpg");
        assert_eq!(image_url("/static/img/", "a.jpg"), "/static/img/a.jpg");
    }

    #[tokio::test]
    async fn test_read_cart_defaults_to_empty() {
        let session = memory_session();
        let cart = read_cart(&session).await;
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_read_cart_roundtrips_through_session() {
        let session = memory_session();

        let mut cart = Cart::new();
        cart.add(&product(1, 5000));
        cart.add(&product(2, 3000));
        write_cart(&session, &cart).await.unwrap();

        let reloaded = read_cart(&session).await;
        assert_eq!(reloaded, cart);
    }

    #[tokio::test]
    async fn test_read_cart_recovers_from_malformed_value() {
        let session = memory_session();
        session
            .insert(session_keys::CART, serde_json::json!({"bogus": true}))
            .await
            .unwrap();

        let cart = read_cart(&session).await;
        assert!(cart.is_empty());
    }
}
