use thiserror::Error;
use turnstile_core::{RepositoryError, UserRepository, UserUpdate};

use crate::token::{TokenError, TokenService};

#[derive(Debug, Clone)]
pub struct VerifyEmailCommand {
    pub token: String,
}

#[derive(Debug, Error)]
pub enum VerifyEmailError {
    #[error("{0}")]
    Token(#[from] TokenError),
    #[error("User not found")]
    UserNotFound,
    #[error("Email already verified")]
    AlreadyVerified,
    #[error("User store error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Verify-email use case - consumes a token to flip the verification flag
/// exactly once.
pub struct VerifyEmailUseCase<'a, R>
where
    R: UserRepository,
{
    repository: &'a R,
    tokens: &'a TokenService,
}

impl<'a, R> VerifyEmailUseCase<'a, R>
where
    R: UserRepository,
{
    pub fn new(repository: &'a R, tokens: &'a TokenService) -> Self {
        Self { repository, tokens }
    }

    /// Execute the verify-email use case.
    ///
    /// The flag never transitions back to unverified, and a repeat attempt
    /// surfaces as [`VerifyEmailError::AlreadyVerified`] rather than
    /// silently succeeding.
    #[tracing::instrument(name = "VerifyEmailUseCase::execute", skip_all)]
    pub async fn execute(&self, command: VerifyEmailCommand) -> Result<(), VerifyEmailError> {
        let claims = self.tokens.verify(&command.token)?;

        let user = self
            .repository
            .find_by_id(claims.user_id)
            .await?
            .ok_or(VerifyEmailError::UserNotFound)?;

        if user.is_email_verified {
            return Err(VerifyEmailError::AlreadyVerified);
        }

        self.repository
            .update(user.id, UserUpdate::verified())
            .await?;

        Ok(())
    }
}
