use secrecy::Secret;
use thiserror::Error;
use turnstile_core::{RepositoryError, UserDto, UserRepository};

use crate::credentials::{CredentialError, PasswordHasher};

#[derive(Clone)]
pub struct SigninCommand {
    pub email: String,
    pub password: Secret<String>,
}

#[derive(Debug, Error)]
pub enum SigninError {
    /// Covers both an unknown email and a wrong password so a caller cannot
    /// probe which addresses have accounts.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Email not verified")]
    EmailNotVerified,
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),
    #[error("User store error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Signin use case - authenticates local credentials behind the
/// email-verification gate.
pub struct SigninUseCase<'a, R>
where
    R: UserRepository,
{
    repository: &'a R,
    hasher: &'a PasswordHasher,
}

impl<'a, R> SigninUseCase<'a, R>
where
    R: UserRepository,
{
    pub fn new(repository: &'a R, hasher: &'a PasswordHasher) -> Self {
        Self { repository, hasher }
    }

    /// Execute the signin use case.
    ///
    /// Checks run in a fixed order: existence, then verification, then the
    /// password comparison. An unverified account reports "Email not
    /// verified" even when the supplied password is wrong.
    #[tracing::instrument(name = "SigninUseCase::execute", skip_all)]
    pub async fn execute(&self, command: SigninCommand) -> Result<UserDto, SigninError> {
        let Some(user) = self.repository.find_by_email(&command.email).await? else {
            return Err(SigninError::InvalidCredentials);
        };

        if !user.is_email_verified {
            return Err(SigninError::EmailNotVerified);
        }

        // Social-only accounts have no digest to compare against.
        let matches = match &user.password_hash {
            Some(digest) => self.hasher.verify(&command.password, digest).await?,
            None => false,
        };
        if !matches {
            return Err(SigninError::InvalidCredentials);
        }

        Ok(user.into_dto())
    }
}
