//! End-to-end cart flow over HTTP with one session cookie.

use axum::http::StatusCode;

use gondola_integration_tests::TestContext;

#[tokio::test]
async fn empty_cart_page_shows_empty_message() {
    let mut ctx = TestContext::new().await;

    let response = ctx.get("/cart").await;

    assert_eq!(response.status, StatusCode::OK);
    response.assert_contains("Your cart is empty");
    response.assert_contains("id=\"cart-subtotal\">$0<");
}

#[tokio::test]
async fn add_to_cart_confirms_and_updates_badge() {
    let mut ctx = TestContext::new().await;

    let response = ctx.post_form("/cart/add", "product_id=1").await;
    assert_eq!(response.status, StatusCode::OK);
    response.assert_contains("Malbec Reserva");
    response.assert_contains("Items in cart: 1");
    assert_eq!(
        response.headers.get("HX-Trigger").map(|v| v.to_str().unwrap()),
        Some("cart-updated")
    );

    let badge = ctx.get("/cart/count").await;
    badge.assert_contains("class=\"cart-badge\">1<");
}

#[tokio::test]
async fn cart_page_shows_line_and_totals() {
    let mut ctx = TestContext::new().await;
    ctx.post_form("/cart/add", "product_id=1").await;

    let response = ctx.get("/cart").await;

    response.assert_contains("Malbec Reserva");
    response.assert_contains("id=\"cart-subtotal\">$5.000<");
    response.assert_contains("id=\"cart-shipping\">$1.500<");
    response.assert_contains("id=\"cart-total\">$6.500<");
}

#[tokio::test]
async fn adding_same_product_increments_single_line() {
    let mut ctx = TestContext::new().await;
    ctx.post_form("/cart/add", "product_id=1").await;
    ctx.post_form("/cart/add", "product_id=1").await;
    ctx.post_form("/cart/add", "product_id=1").await;

    let badge = ctx.get("/cart/count").await;
    badge.assert_contains("class=\"cart-badge\">3<");

    let page = ctx.get("/cart").await;
    // One line, subtotal over the threshold ships free
    assert_eq!(page.body.matches("id=\"cart-line-1\"").count(), 1);
    page.assert_contains("id=\"cart-subtotal\">$15.000<");
    page.assert_contains("id=\"cart-shipping\">FREE<");
    page.assert_contains("id=\"cart-total\">$15.000<");
}

#[tokio::test]
async fn add_unknown_product_is_a_silent_noop() {
    let mut ctx = TestContext::new().await;

    let response = ctx.post_form("/cart/add", "product_id=99").await;

    assert_eq!(response.status, StatusCode::OK);
    let badge = ctx.get("/cart/count").await;
    badge.assert_contains("class=\"cart-badge\">0<");
}

#[tokio::test]
async fn update_sets_quantity_and_recomputes_totals() {
    let mut ctx = TestContext::new().await;
    ctx.post_form("/cart/add", "product_id=1").await;

    let response = ctx
        .post_form("/cart/update", "product_id=1&quantity=4")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    response.assert_contains("value=\"4\"");
    response.assert_contains("id=\"cart-subtotal\">$20.000<");
    response.assert_contains("id=\"cart-shipping\">FREE<");
}

#[tokio::test]
async fn update_to_zero_removes_the_line() {
    let mut ctx = TestContext::new().await;
    ctx.post_form("/cart/add", "product_id=1").await;

    let response = ctx
        .post_form("/cart/update", "product_id=1&quantity=0")
        .await;

    response.assert_contains("Your cart is empty");

    let badge = ctx.get("/cart/count").await;
    badge.assert_contains("class=\"cart-badge\">0<");
}

#[tokio::test]
async fn update_to_negative_removes_the_line() {
    let mut ctx = TestContext::new().await;
    ctx.post_form("/cart/add", "product_id=2").await;

    let response = ctx
        .post_form("/cart/update", "product_id=2&quantity=-1")
        .await;

    response.assert_contains("Your cart is empty");
}

#[tokio::test]
async fn remove_drops_only_the_matching_line() {
    let mut ctx = TestContext::new().await;
    ctx.post_form("/cart/add", "product_id=1").await;
    ctx.post_form("/cart/add", "product_id=2").await;

    let response = ctx.post_form("/cart/remove", "product_id=1").await;

    response.assert_not_contains("Malbec Reserva");
    response.assert_contains("Torrontés Salta");
}

#[tokio::test]
async fn remove_unknown_product_changes_nothing() {
    let mut ctx = TestContext::new().await;
    ctx.post_form("/cart/add", "product_id=2").await;

    let response = ctx.post_form("/cart/remove", "product_id=99").await;

    assert_eq!(response.status, StatusCode::OK);
    response.assert_contains("Torrontés Salta");

    let badge = ctx.get("/cart/count").await;
    badge.assert_contains("class=\"cart-badge\">1<");
}

#[tokio::test]
async fn clear_empties_the_cart() {
    let mut ctx = TestContext::new().await;
    ctx.post_form("/cart/add", "product_id=1").await;
    ctx.post_form("/cart/add", "product_id=2").await;

    let response = ctx.post_form("/cart/clear", "").await;

    response.assert_contains("Your cart is empty");

    let badge = ctx.get("/cart/count").await;
    badge.assert_contains("class=\"cart-badge\">0<");
}

#[tokio::test]
async fn checkout_clears_a_non_empty_cart() {
    let mut ctx = TestContext::new().await;
    ctx.post_form("/cart/add", "product_id=3").await;

    let response = ctx.post_form("/cart/checkout", "").await;

    response.assert_contains("Purchase simulated successfully");
    response.assert_contains("Your cart is empty");

    let badge = ctx.get("/cart/count").await;
    badge.assert_contains("class=\"cart-badge\">0<");
}

#[tokio::test]
async fn checkout_on_empty_cart_reports_and_mutates_nothing() {
    let mut ctx = TestContext::new().await;

    let response = ctx.post_form("/cart/checkout", "").await;

    assert_eq!(response.status, StatusCode::OK);
    response.assert_contains("Your cart is empty.");
    response.assert_not_contains("Purchase simulated successfully");
}

#[tokio::test]
async fn cart_survives_across_requests_in_one_session() {
    let mut ctx = TestContext::new().await;
    ctx.post_form("/cart/add", "product_id=1").await;
    ctx.post_form("/cart/add", "product_id=2").await;

    // A fresh page load reads the persisted cart, same ids and order
    let page = ctx.get("/cart").await;
    let malbec = page.body.find("Malbec Reserva").unwrap();
    let torrontes = page.body.find("Torrontés Salta").unwrap();
    assert!(malbec < torrontes);
}

#[tokio::test]
async fn separate_sessions_have_separate_carts() {
    let mut first = TestContext::new().await;
    first.post_form("/cart/add", "product_id=1").await;

    let mut second = TestContext::new().await;
    let badge = second.get("/cart/count").await;
    badge.assert_contains("class=\"cart-badge\">0<");
}
