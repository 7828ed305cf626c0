use crate::helpers::{TestApp, error_body};

#[tokio::test]
async fn resend_delivers_a_fresh_verification_email() {
    let app = TestApp::spawn().await;
    app.signup_test_user().await;

    let response = app
        .post_resend_verification(&serde_json::json!({ "email": "test@example.com" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Verification email resent successfully");

    let sent = app.mailer.sent().await;
    assert_eq!(sent.len(), 2);

    // The reissued link still works.
    let token = app.last_verification_token().await;
    let verify = app.get_verify_email(&token).await;
    assert_eq!(verify.status().as_u16(), 200);
}

#[tokio::test]
async fn resend_for_an_unknown_email_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app
        .post_resend_verification(&serde_json::json!({ "email": "nobody@example.com" }))
        .await;
    assert_eq!(response.status().as_u16(), 404);

    let error = error_body(response).await;
    assert_eq!(error["code"], "ERR_NOT_FOUND");
}

#[tokio::test]
async fn resend_after_verification_is_rejected() {
    let app = TestApp::spawn().await;
    app.signup_test_user().await;
    let token = app.last_verification_token().await;
    app.get_verify_email(&token).await;

    let response = app
        .post_resend_verification(&serde_json::json!({ "email": "test@example.com" }))
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let error = error_body(response).await;
    assert_eq!(error["code"], "ERR_EMAIL_ALREADY_VERIFIED");
}

#[tokio::test]
async fn resend_surfaces_delivery_failures_unlike_signup() {
    let app = TestApp::spawn().await;
    app.signup_test_user().await;

    app.mailer.set_failing(true);
    let response = app
        .post_resend_verification(&serde_json::json!({ "email": "test@example.com" }))
        .await;
    assert_eq!(response.status().as_u16(), 500);
}

#[tokio::test]
async fn resend_rejects_a_malformed_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post_resend_verification(&serde_json::json!({ "email": "not-an-email" }))
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let error = error_body(response).await;
    assert_eq!(error["code"], "ERR_VALIDATION");
}
