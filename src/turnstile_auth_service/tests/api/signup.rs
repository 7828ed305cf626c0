use crate::helpers::{TestApp, default_signup_body, error_body};

#[tokio::test]
async fn signup_returns_201_with_a_sanitized_user() {
    let app = TestApp::spawn().await;

    let response = app.signup_test_user().await;
    assert_eq!(response.status().as_u16(), 201);

    let body: serde_json::Value = response.json().await.unwrap();
    let user = body["user"].as_object().expect("body carries a user object");

    assert_eq!(user["name"], "Test User");
    assert_eq!(user["email"], "test@example.com");
    assert_eq!(user["phone"], "0591234567");
    assert_eq!(user["address"], "123 Test St");
    assert!(!user.contains_key("password"));
    assert!(!user.contains_key("passwordHash"));
    assert!(!user.contains_key("isEmailVerified"));
}

#[tokio::test]
async fn signup_sends_a_verification_email() {
    let app = TestApp::spawn().await;

    app.signup_test_user().await;

    let sent = app.mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "test@example.com");
    assert_eq!(sent[0].subject, "Verify Your Email Address");
    assert!(sent[0].text.contains("/api/auth/verify-email?token="));
}

#[tokio::test]
async fn signup_succeeds_even_when_delivery_fails() {
    let app = TestApp::spawn().await;
    app.mailer.set_failing(true);

    let response = app.signup_test_user().await;
    assert_eq!(response.status().as_u16(), 201);
    assert_eq!(app.repository.user_count().await, 1);
}

#[tokio::test]
async fn signup_rejects_an_invalid_payload_with_field_messages() {
    let app = TestApp::spawn().await;

    let response = app
        .post_signup(&serde_json::json!({
            "name": "T",
            "email": "not-an-email",
            "password": "weak",
            "phone": "",
            "address": "",
        }))
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let error = error_body(response).await;
    assert_eq!(error["code"], "ERR_VALIDATION");
    assert_eq!(error["message"], "Validation Error");
    let messages: Vec<&str> = error["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["message"].as_str().unwrap())
        .collect();
    assert!(messages.contains(&"Name must be at least 2 characters"));
    assert!(messages.contains(&"Invalid email format"));
    assert!(messages.contains(&"Phone is required"));
    assert!(messages.contains(&"Address is required"));
}

#[tokio::test]
async fn signup_rejects_an_email_that_is_already_taken() {
    let app = TestApp::spawn().await;
    app.signup_test_user().await;

    let response = app.post_signup(&default_signup_body()).await;
    assert_eq!(response.status().as_u16(), 400);

    let error = error_body(response).await;
    assert_eq!(error["code"], "ERR_VALIDATION");
    assert_eq!(error["errors"][0]["message"], "Email already in use");
    assert_eq!(app.repository.user_count().await, 1);
}
