use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;
use turnstile_application::{
    PasswordHasher, SignupCommand, SignupUseCase, TokenService, VerificationEmails,
};
use turnstile_core::{Mailer, UserRepository};

use crate::http::{
    routes::{UserResponse, error::ApiError},
    validation,
};

#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: Secret<String>,
    pub phone: String,
    pub address: String,
}

#[tracing::instrument(name = "Signup", skip_all)]
pub async fn signup<R, M>(
    State((repository, mailer, hasher, tokens, emails)): State<(
        R,
        M,
        PasswordHasher,
        TokenService,
        VerificationEmails,
    )>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let errors = validation::validate_signup(
        &request.name,
        &request.email,
        &request.password,
        &request.phone,
        &request.address,
    );
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    if repository.find_by_email(&request.email).await?.is_some() {
        return Err(ApiError::Validation(vec![
            "Email already in use".to_string(),
        ]));
    }

    let use_case = SignupUseCase::new(&repository, &mailer, &hasher, &tokens, &emails);
    let user = use_case
        .execute(SignupCommand {
            name: request.name,
            email: request.email,
            password: request.password,
            phone: request.phone,
            address: request.address,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse { user })))
}
