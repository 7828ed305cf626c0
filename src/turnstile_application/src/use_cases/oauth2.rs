use thiserror::Error;
use turnstile_core::{RepositoryError, SocialProfile, UserDto, UserRepository};

#[derive(Debug, Clone)]
pub struct OAuth2Command {
    pub provider: String,
    pub provider_user_id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum OAuth2Error {
    #[error("User store error: {0}")]
    Repository(#[from] RepositoryError),
}

/// OAuth2 use case - resolves a third-party identity claim to a local
/// account, linking or creating as needed.
///
/// All linking rules live in the repository's atomic
/// `find_or_create_from_social`; there is no password and no verification
/// logic here because social accounts are created pre-verified.
pub struct OAuth2UseCase<'a, R>
where
    R: UserRepository,
{
    repository: &'a R,
}

impl<'a, R> OAuth2UseCase<'a, R>
where
    R: UserRepository,
{
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    #[tracing::instrument(name = "OAuth2UseCase::execute", skip(self, command), fields(provider = %command.provider))]
    pub async fn execute(&self, command: OAuth2Command) -> Result<UserDto, OAuth2Error> {
        let profile = SocialProfile {
            provider: command.provider,
            provider_user_id: command.provider_user_id,
            name: command.display_name,
            email: command.email,
            image_url: command.image_url,
        };

        let user = self.repository.find_or_create_from_social(&profile).await?;
        Ok(user.into_dto())
    }
}
