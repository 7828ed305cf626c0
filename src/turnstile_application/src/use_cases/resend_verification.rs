use thiserror::Error;
use turnstile_core::{Mailer, MailerError, RepositoryError, UserDto, UserRepository};

use crate::{
    email::{EmailBuildError, VerificationEmails},
    token::{TokenError, TokenService},
};

#[derive(Debug, Clone)]
pub struct ResendVerificationCommand {
    pub email: String,
}

#[derive(Debug, Error)]
pub enum ResendVerificationError {
    #[error("User not found")]
    UserNotFound,
    #[error("Email already verified")]
    AlreadyVerified,
    #[error("Token error: {0}")]
    Token(#[from] TokenError),
    #[error("{0}")]
    Email(#[from] EmailBuildError),
    #[error("Failed to send email: {0}")]
    Mailer(#[from] MailerError),
    #[error("User store error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Resend-verification use case - reissues a verification token for an
/// unverified account.
pub struct ResendVerificationUseCase<'a, R, M>
where
    R: UserRepository,
    M: Mailer,
{
    repository: &'a R,
    mailer: &'a M,
    tokens: &'a TokenService,
    emails: &'a VerificationEmails,
}

impl<'a, R, M> ResendVerificationUseCase<'a, R, M>
where
    R: UserRepository,
    M: Mailer,
{
    pub fn new(
        repository: &'a R,
        mailer: &'a M,
        tokens: &'a TokenService,
        emails: &'a VerificationEmails,
    ) -> Self {
        Self {
            repository,
            mailer,
            tokens,
            emails,
        }
    }

    /// Execute the resend-verification use case.
    ///
    /// Unlike signup, delivery failures propagate: the email is the whole
    /// point of this operation.
    #[tracing::instrument(name = "ResendVerificationUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        command: ResendVerificationCommand,
    ) -> Result<UserDto, ResendVerificationError> {
        let user = self
            .repository
            .find_by_email(&command.email)
            .await?
            .ok_or(ResendVerificationError::UserNotFound)?;

        if user.is_email_verified {
            return Err(ResendVerificationError::AlreadyVerified);
        }

        let token = self.tokens.issue(user.id)?;
        let notification = self.emails.notification(&user, &token)?;
        self.mailer.send(notification).await?;

        Ok(user.into_dto())
    }
}
