//! Catalog rendering and load-failure behavior.

use axum::http::StatusCode;

use gondola_integration_tests::TestContext;

#[tokio::test]
async fn catalog_page_renders_all_products() {
    let mut ctx = TestContext::new().await;

    let response = ctx.get("/catalog").await;

    assert_eq!(response.status, StatusCode::OK);
    response.assert_contains("Malbec Reserva");
    response.assert_contains("Torrontés Salta");
    response.assert_contains("Blend de Finca");
    response.assert_contains("$5.000");
    response.assert_contains("/static/img/malbec-reserva.jpg");
    response.assert_not_contains("Could not load the catalog");
}

#[tokio::test]
async fn home_page_features_first_three_products() {
    let mut ctx = TestContext::new().await;

    let response = ctx.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    response.assert_contains("id=\"featured-grid\"");
    response.assert_contains("Malbec Reserva");
    response.assert_contains("Blend de Finca");
}

#[tokio::test]
async fn description_fragment_round_trip() {
    let mut ctx = TestContext::new().await;

    let open = ctx.get("/catalog/1/description").await;
    assert_eq!(open.status, StatusCode::OK);
    open.assert_contains("Twelve months in French oak.");
    open.assert_contains("Hide description");

    let closed = ctx.get("/catalog/1/description/hide").await;
    assert_eq!(closed.status, StatusCode::OK);
    closed.assert_contains("View description");
}

#[tokio::test]
async fn description_for_unknown_product_is_not_found() {
    let mut ctx = TestContext::new().await;

    let response = ctx.get("/catalog/99/description").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn failed_catalog_load_renders_error_block() {
    let mut ctx = TestContext::with_catalog(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;

    let response = ctx.get("/catalog").await;

    assert_eq!(response.status, StatusCode::OK);
    response.assert_contains("Could not load the catalog");
    response.assert_not_contains("product-card__title");
}

#[tokio::test]
async fn malformed_catalog_renders_error_block() {
    let mut ctx = TestContext::with_catalog(StatusCode::OK, "not json at all").await;

    let response = ctx.get("/catalog").await;

    assert_eq!(response.status, StatusCode::OK);
    response.assert_contains("Could not load the catalog");
}

#[tokio::test]
async fn add_to_cart_degrades_when_catalog_is_down() {
    let mut ctx = TestContext::with_catalog(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;

    let response = ctx.post_form("/cart/add", "product_id=1").await;

    assert_eq!(response.status, StatusCode::OK);
    let badge = ctx.get("/cart/count").await;
    badge.assert_contains("class=\"cart-badge\">0<");
}
