use crate::helpers::{TestApp, error_body};

#[tokio::test]
async fn signin_succeeds_after_verification() {
    let app = TestApp::spawn().await;
    app.signup_test_user().await;
    let token = app.last_verification_token().await;
    app.get_verify_email(&token).await;

    let response = app
        .post_signin(&serde_json::json!({
            "email": "test@example.com",
            "password": "Password123!",
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    let user = body["user"].as_object().unwrap();
    assert_eq!(user["email"], "test@example.com");
    assert!(!user.contains_key("password"));
}

#[tokio::test]
async fn signin_is_gated_until_the_email_is_verified() {
    let app = TestApp::spawn().await;
    app.signup_test_user().await;

    let response = app
        .post_signin(&serde_json::json!({
            "email": "test@example.com",
            "password": "Password123!",
        }))
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let error = error_body(response).await;
    assert_eq!(error["message"], "Email not verified");
    assert_eq!(error["code"], "ERR_AUTH");
}

#[tokio::test]
async fn unknown_email_and_wrong_password_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.signup_test_user().await;
    let token = app.last_verification_token().await;
    app.get_verify_email(&token).await;

    let unknown = app
        .post_signin(&serde_json::json!({
            "email": "nobody@example.com",
            "password": "Password123!",
        }))
        .await;
    let wrong = app
        .post_signin(&serde_json::json!({
            "email": "test@example.com",
            "password": "WrongPassword1!",
        }))
        .await;

    assert_eq!(unknown.status().as_u16(), 401);
    assert_eq!(wrong.status().as_u16(), 401);

    let unknown = error_body(unknown).await;
    let wrong = error_body(wrong).await;
    assert_eq!(unknown["message"], "Invalid credentials");
    assert_eq!(unknown, wrong);
}
