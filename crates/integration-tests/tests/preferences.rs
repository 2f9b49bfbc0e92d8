//! Preference slots and dark-mode toggle.

use axum::http::StatusCode;

use gondola_integration_tests::TestContext;

#[tokio::test]
async fn preferences_page_renders_the_form() {
    let mut ctx = TestContext::new().await;

    let response = ctx.get("/preferences").await;

    assert_eq!(response.status, StatusCode::OK);
    response.assert_contains("<form class=\"preferences-form\"");
    response.assert_not_contains("Preferences saved.");
}

#[tokio::test]
async fn saving_preferences_applies_name_and_dark_mode() {
    let mut ctx = TestContext::new().await;

    let response = ctx
        .post_form("/preferences", "display_name=Carla&dark_mode=on")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    response.assert_contains("Preferences saved.");
    response.assert_contains("class=\"dark-mode\"");
    response.assert_contains("value=\"Carla\"");

    // The greeting appears on the home page
    let home = ctx.get("/").await;
    home.assert_contains("Welcome back, Carla!");
}

#[tokio::test]
async fn saving_without_checkbox_disables_dark_mode() {
    let mut ctx = TestContext::new().await;
    ctx.post_form("/preferences", "display_name=Carla&dark_mode=on")
        .await;

    let response = ctx.post_form("/preferences", "display_name=Carla").await;

    response.assert_not_contains("class=\"dark-mode\"");
}

#[tokio::test]
async fn dark_mode_toggle_applies_immediately() {
    let mut ctx = TestContext::new().await;

    let response = ctx.post_form("/preferences/dark-mode", "").await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers.get("HX-Refresh").map(|v| v.to_str().unwrap()),
        Some("true")
    );

    let home = ctx.get("/").await;
    home.assert_contains("class=\"dark-mode\"");

    // Toggling again flips it back
    ctx.post_form("/preferences/dark-mode", "").await;
    let home = ctx.get("/").await;
    home.assert_not_contains("class=\"dark-mode\"");
}

#[tokio::test]
async fn empty_display_name_means_no_greeting() {
    let mut ctx = TestContext::new().await;
    ctx.post_form("/preferences", "display_name=").await;

    let home = ctx.get("/").await;
    home.assert_not_contains("Welcome back");
}

#[tokio::test]
async fn preferences_do_not_touch_the_cart() {
    let mut ctx = TestContext::new().await;
    ctx.post_form("/cart/add", "product_id=1").await;

    ctx.post_form("/preferences", "display_name=Carla&dark_mode=on")
        .await;

    let badge = ctx.get("/cart/count").await;
    badge.assert_contains("class=\"cart-badge\">1<");
}
