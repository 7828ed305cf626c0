use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use thiserror::Error;
use turnstile_core::SocialProfile;

pub const GOOGLE_PROVIDER: &str = "google";

#[derive(Debug, Error)]
pub enum ProfileFetchError {
    #[error("provider request failed: {0}")]
    Transport(String),
    #[error("provider returned status {0}")]
    UpstreamStatus(reqwest::StatusCode),
    #[error("provider returned an unreadable profile: {0}")]
    InvalidProfile(String),
}

/// Resolves a Google access token to the identity claim the OAuth2 use case
/// consumes. The token exchange itself happens on the client side; this only
/// performs the userinfo lookup.
#[derive(Clone)]
pub struct GoogleProfileClient {
    http_client: Client,
    userinfo_url: String,
}

impl GoogleProfileClient {
    pub fn new(http_client: Client, userinfo_url: String) -> Self {
        Self {
            http_client,
            userinfo_url,
        }
    }

    #[tracing::instrument(name = "Fetching Google profile", skip_all)]
    pub async fn fetch_profile(
        &self,
        access_token: &Secret<String>,
    ) -> Result<SocialProfile, ProfileFetchError> {
        let response = self
            .http_client
            .get(&self.userinfo_url)
            .bearer_auth(access_token.expose_secret())
            .send()
            .await
            .map_err(|e| ProfileFetchError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProfileFetchError::UpstreamStatus(response.status()));
        }

        let info: GoogleUserInfo = response
            .json()
            .await
            .map_err(|e| ProfileFetchError::InvalidProfile(e.to_string()))?;

        Ok(SocialProfile {
            provider: GOOGLE_PROVIDER.to_string(),
            provider_user_id: info.id,
            name: info.name,
            email: info.email,
            image_url: info.picture,
        })
    }
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    id: String,
    name: String,
    email: Option<String>,
    picture: Option<String>,
}
