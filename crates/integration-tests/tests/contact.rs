//! Contact form validation round trips.

use axum::http::StatusCode;

use gondola_integration_tests::TestContext;

#[tokio::test]
async fn contact_page_renders_the_form() {
    let mut ctx = TestContext::new().await;

    let response = ctx.get("/contact").await;

    assert_eq!(response.status, StatusCode::OK);
    response.assert_contains("<form class=\"contact-form\"");
    response.assert_not_contains("field-error");
}

#[tokio::test]
async fn invalid_submission_reports_every_field_and_keeps_values() {
    let mut ctx = TestContext::new().await;

    let response = ctx
        .post_form("/contact", "name=A&email=bad&message=short")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    response.assert_contains("Name must be at least 2 characters.");
    response.assert_contains("Enter a valid email address");
    response.assert_contains("Message must be at least 10 characters.");

    // Entered values are retained, nothing is submitted
    response.assert_contains("value=\"A\"");
    response.assert_contains("value=\"bad\"");
    response.assert_contains(">short</textarea>");
    response.assert_not_contains("Form validated and sent");
}

#[tokio::test]
async fn single_invalid_field_blocks_submission() {
    let mut ctx = TestContext::new().await;

    let response = ctx
        .post_form(
            "/contact",
            "name=Ana&email=ana@example.com&message=too+short",
        )
        .await;

    response.assert_contains("Message must be at least 10 characters.");
    response.assert_not_contains("name-error");
    response.assert_not_contains("email-error");
    response.assert_not_contains("Form validated and sent");
}

#[tokio::test]
async fn valid_submission_confirms_and_resets() {
    let mut ctx = TestContext::new().await;

    let response = ctx
        .post_form(
            "/contact",
            "name=Ana&email=ana@example.com&message=I+would+like+to+order+a+case+of+Malbec.",
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    response.assert_contains("Form validated and sent");
    response.assert_not_contains("field-error");
    // The form resets: the entered name is gone
    response.assert_not_contains("value=\"Ana\"");
}

#[tokio::test]
async fn email_without_tld_is_rejected() {
    let mut ctx = TestContext::new().await;

    let response = ctx
        .post_form(
            "/contact",
            "name=Ana&email=ana@localhost&message=A+long+enough+message.",
        )
        .await;

    response.assert_contains("Enter a valid email address");
}
