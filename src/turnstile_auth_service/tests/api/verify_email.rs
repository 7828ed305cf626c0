use crate::helpers::{TestApp, error_body};

#[tokio::test]
async fn the_emailed_link_verifies_the_account() {
    let app = TestApp::spawn().await;
    app.signup_test_user().await;
    let token = app.last_verification_token().await;

    let response = app.get_verify_email(&token).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Email verified successfully");
}

#[tokio::test]
async fn repeating_the_verification_is_rejected_and_the_flag_stays_set() {
    let app = TestApp::spawn().await;
    app.signup_test_user().await;
    let token = app.last_verification_token().await;

    let first = app.get_verify_email(&token).await;
    assert_eq!(first.status().as_u16(), 200);

    let second = app.get_verify_email(&token).await;
    assert_eq!(second.status().as_u16(), 400);

    let error = error_body(second).await;
    assert_eq!(error["code"], "ERR_EMAIL_ALREADY_VERIFIED");
    assert_eq!(error["message"], "Email already verified");

    // Still verified: signin goes through.
    let signin = app
        .post_signin(&serde_json::json!({
            "email": "test@example.com",
            "password": "Password123!",
        }))
        .await;
    assert_eq!(signin.status().as_u16(), 200);
}

#[tokio::test]
async fn a_missing_token_is_reported_as_required() {
    let app = TestApp::spawn().await;

    let response = app.get_verify_email("").await;
    assert_eq!(response.status().as_u16(), 400);

    let error = error_body(response).await;
    assert_eq!(error["code"], "ERR_TOKEN_REQUIRED");
    assert_eq!(error["message"], "Token is required");
}

#[tokio::test]
async fn a_garbage_token_is_reported_as_malformed() {
    let app = TestApp::spawn().await;

    let response = app.get_verify_email("not-a-real-token").await;
    assert_eq!(response.status().as_u16(), 400);

    let error = error_body(response).await;
    assert_eq!(error["code"], "ERR_INVALID_TOKEN");
}

#[tokio::test]
async fn a_well_signed_token_for_an_unknown_user_is_not_found() {
    // Both apps sign with the same test secret, so a token minted by one
    // carries a valid signature for the other. The empty app has no user
    // behind the claimed id.
    let issuing_app = TestApp::spawn().await;
    issuing_app.signup_test_user().await;
    let token = issuing_app.last_verification_token().await;

    let empty_app = TestApp::spawn().await;
    let response = empty_app.get_verify_email(&token).await;
    assert_eq!(response.status().as_u16(), 404);

    let error = error_body(response).await;
    assert_eq!(error["code"], "ERR_NOT_FOUND");
    assert_eq!(error["message"], "User not found");
}
