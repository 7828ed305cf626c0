use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use turnstile_application::{TokenService, VerifyEmailCommand, VerifyEmailUseCase};
use turnstile_core::UserRepository;

use crate::http::routes::{MessageResponse, error::ApiError};

#[derive(Deserialize)]
pub struct VerifyEmailParams {
    #[serde(default)]
    pub token: Option<String>,
}

#[tracing::instrument(name = "Verify email", skip_all)]
pub async fn verify_email<R>(
    State((repository, tokens)): State<(R, TokenService)>,
    Query(params): Query<VerifyEmailParams>,
) -> Result<impl IntoResponse, ApiError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    // A missing or blank token is the token service's call to classify.
    let token = params.token.unwrap_or_default();

    let use_case = VerifyEmailUseCase::new(&repository, &tokens);
    use_case.execute(VerifyEmailCommand { token }).await?;

    Ok(Json(MessageResponse {
        message: "Email verified successfully".to_string(),
    }))
}
