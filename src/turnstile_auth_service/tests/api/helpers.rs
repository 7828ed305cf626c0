use secrecy::Secret;
use turnstile_adapters::{GoogleProfileClient, InMemoryUserRepository, MockMailer};
use turnstile_application::HashParams;
use turnstile_auth_service::{AuthService, AuthServiceConfig};

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub repository: InMemoryUserRepository,
    pub mailer: MockMailer,
}

impl TestApp {
    pub async fn spawn() -> Self {
        // Nothing listens here; tests that exercise the Google callback
        // spawn with a wiremock-backed URL instead.
        Self::spawn_with_userinfo_url("http://127.0.0.1:9/userinfo".to_string()).await
    }

    pub async fn spawn_with_userinfo_url(userinfo_url: String) -> Self {
        let repository = InMemoryUserRepository::new();
        let mailer = MockMailer::new();
        let profiles = GoogleProfileClient::new(reqwest::Client::new(), userinfo_url);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind an ephemeral port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{port}");

        let config = AuthServiceConfig {
            token_secret: Secret::from("test-secret".to_string()),
            token_validity_seconds: 600,
            hash: HashParams {
                m_cost: 1024,
                t_cost: 1,
                p_cost: 1,
            },
            base_url: address.clone(),
            allowed_origins: None,
        };

        let service = AuthService::new(repository.clone(), mailer.clone(), profiles, config)
            .expect("Failed to build the auth service");

        tokio::spawn(service.run_standalone(listener));

        Self {
            address,
            http_client: reqwest::Client::new(),
            repository,
            mailer,
        }
    }

    pub async fn post_signup(&self, body: &serde_json::Value) -> reqwest::Response {
        self.http_client
            .post(format!("{}/api/auth/signup", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_signin(&self, body: &serde_json::Value) -> reqwest::Response {
        self.http_client
            .post(format!("{}/api/auth/signin", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_verify_email(&self, token: &str) -> reqwest::Response {
        self.http_client
            .get(format!(
                "{}/api/auth/verify-email?token={token}",
                self.address
            ))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_resend_verification(&self, body: &serde_json::Value) -> reqwest::Response {
        self.http_client
            .post(format!("{}/api/auth/resend-verification", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_google_callback(&self, body: &serde_json::Value) -> reqwest::Response {
        self.http_client
            .post(format!("{}/api/auth/oauth2/google", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Signs up the canonical test user and returns the response.
    pub async fn signup_test_user(&self) -> reqwest::Response {
        self.post_signup(&default_signup_body()).await
    }

    /// Pulls the verification token out of the most recent email.
    pub async fn last_verification_token(&self) -> String {
        let sent = self.mailer.sent().await;
        let notification = sent.last().expect("no verification email was sent");
        let (_, token) = notification
            .text
            .split_once("token=")
            .expect("verification email carries no token link");
        token.trim().to_string()
    }
}

pub fn default_signup_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Test User",
        "email": "test@example.com",
        "password": "Password123!",
        "phone": "0591234567",
        "address": "123 Test St",
    })
}

pub async fn error_body(response: reqwest::Response) -> serde_json::Value {
    response
        .json::<serde_json::Value>()
        .await
        .expect("error response was not JSON")["error"]
        .clone()
}
