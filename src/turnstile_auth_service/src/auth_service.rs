use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{get, post},
};
use secrecy::Secret;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use turnstile_adapters::{
    config::AllowedOrigins,
    http::routes::{google_callback, resend_verification, signin, signup, verify_email},
    oauth::GoogleProfileClient,
};
use turnstile_application::{
    CredentialError, HashParams, PasswordHasher, TokenService, VerificationEmails,
};
use turnstile_core::{Mailer, UserRepository};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Process-wide authentication settings the service is composed from.
#[derive(Clone)]
pub struct AuthServiceConfig {
    pub token_secret: Secret<String>,
    pub token_validity_seconds: i64,
    pub hash: HashParams,
    /// Public origin embedded in verification links.
    pub base_url: String,
    pub allowed_origins: Option<AllowedOrigins>,
}

/// Main authentication service that provides all auth-related routes.
pub struct AuthService {
    router: Router,
    allowed_origins: Option<AllowedOrigins>,
}

impl AuthService {
    /// Create a new AuthService over the provided repository, mailer and
    /// profile client.
    ///
    /// # Note on Architecture
    /// Stores implement Clone via an internal handle (connection pool or
    /// `Arc`) for thread-safe sharing. Each route is given exactly the state
    /// it needs, nothing more.
    pub fn new<R, M>(
        repository: R,
        mailer: M,
        profiles: GoogleProfileClient,
        config: AuthServiceConfig,
    ) -> Result<Self, CredentialError>
    where
        R: UserRepository + Clone + 'static,
        M: Mailer + Clone + 'static,
    {
        let hasher = PasswordHasher::new(config.hash)?;
        let tokens = TokenService::new(config.token_secret, config.token_validity_seconds);
        let emails = VerificationEmails::new(config.base_url);

        let router = Router::new()
            // Signup needs everything: credentials, token issuance, email
            .route("/signup", post(signup::<R, M>))
            .with_state((
                repository.clone(),
                mailer.clone(),
                hasher.clone(),
                tokens.clone(),
                emails.clone(),
            ))
            // Signin needs the repository and the credential service
            .route("/signin", post(signin::<R>))
            .with_state((repository.clone(), hasher))
            // Verify-email needs the repository and the token service
            .route("/verify-email", get(verify_email::<R>))
            .with_state((repository.clone(), tokens.clone()))
            // Resend needs a fresh token and the mailer
            .route("/resend-verification", post(resend_verification::<R, M>))
            .with_state((repository.clone(), mailer, tokens, emails))
            // The Google callback resolves the profile before the use case
            .route("/oauth2/google", post(google_callback::<R>))
            .with_state((repository, profiles));

        Ok(Self {
            router,
            allowed_origins: config.allowed_origins,
        })
    }

    /// Convert the AuthService into a router, nested under `/api/auth`, with
    /// the request-id trace layer and the optional CORS policy applied.
    pub fn as_router(mut self) -> Router {
        if let Some(allowed_origins) = self.allowed_origins.take() {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }

        Router::new().nest("/api/auth", self.router).layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        )
    }

    /// Run the auth service as a standalone server.
    pub async fn run_standalone(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let router = self.as_router();

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
