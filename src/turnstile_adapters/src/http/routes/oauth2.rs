use axum::{Json, extract::State, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;
use turnstile_application::{OAuth2Command, OAuth2UseCase};
use turnstile_core::UserRepository;

use crate::{
    http::routes::{UserResponse, error::ApiError},
    oauth::GoogleProfileClient,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuth2CallbackRequest {
    pub access_token: Secret<String>,
}

/// Completes a Google sign-on: resolves the caller's access token to a
/// profile, then hands the identity claim to the OAuth2 use case.
#[tracing::instrument(name = "Google OAuth2 callback", skip_all)]
pub async fn google_callback<R>(
    State((repository, profiles)): State<(R, GoogleProfileClient)>,
    Json(request): Json<OAuth2CallbackRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let profile = profiles
        .fetch_profile(&request.access_token)
        .await
        .map_err(|error| {
            tracing::warn!(%error, "failed to resolve provider profile");
            ApiError::AuthenticationFailed
        })?;

    let use_case = OAuth2UseCase::new(&repository);
    let user = use_case
        .execute(OAuth2Command {
            provider: profile.provider,
            provider_user_id: profile.provider_user_id,
            display_name: profile.name,
            email: profile.email,
            image_url: profile.image_url,
        })
        .await?;

    Ok(Json(UserResponse { user }))
}
