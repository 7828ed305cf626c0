use axum::{Json, extract::State, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;
use turnstile_application::{PasswordHasher, SigninCommand, SigninUseCase};
use turnstile_core::UserRepository;

use crate::http::routes::{UserResponse, error::ApiError};

#[derive(Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: Secret<String>,
}

/// Authenticates local credentials as a plain function call into the use
/// case; there is no strategy or middleware indirection.
#[tracing::instrument(name = "Signin", skip_all)]
pub async fn signin<R>(
    State((repository, hasher)): State<(R, PasswordHasher)>,
    Json(request): Json<SigninRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = SigninUseCase::new(&repository, &hasher);
    let user = use_case
        .execute(SigninCommand {
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok(Json(UserResponse { user }))
}
