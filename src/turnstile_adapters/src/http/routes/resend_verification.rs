use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use turnstile_application::{
    ResendVerificationCommand, ResendVerificationUseCase, TokenService, VerificationEmails,
};
use turnstile_core::{Mailer, UserRepository};

use crate::http::{
    routes::{MessageResponse, error::ApiError},
    validation,
};

#[derive(Deserialize)]
pub struct ResendVerificationRequest {
    pub email: String,
}

#[tracing::instrument(name = "Resend verification", skip_all)]
pub async fn resend_verification<R, M>(
    State((repository, mailer, tokens, emails)): State<(
        R,
        M,
        TokenService,
        VerificationEmails,
    )>,
    Json(request): Json<ResendVerificationRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let errors = validation::validate_email(&request.email);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let use_case = ResendVerificationUseCase::new(&repository, &mailer, &tokens, &emails);
    use_case
        .execute(ResendVerificationCommand {
            email: request.email,
        })
        .await?;

    Ok(Json(MessageResponse {
        message: "Verification email resent successfully".to_string(),
    }))
}
