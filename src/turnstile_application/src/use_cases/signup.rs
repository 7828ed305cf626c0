use secrecy::Secret;
use thiserror::Error;
use turnstile_core::{Mailer, NewUser, RepositoryError, UserDto, UserRepository};

use crate::{
    credentials::{CredentialError, PasswordHasher},
    email::VerificationEmails,
    token::{TokenError, TokenService},
};

#[derive(Clone)]
pub struct SignupCommand {
    pub name: String,
    pub email: String,
    pub password: Secret<String>,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Error)]
pub enum SignupError {
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),
    #[error("User store error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

/// Signup use case - creates an unverified local account and emails the
/// verification link.
pub struct SignupUseCase<'a, R, M>
where
    R: UserRepository,
    M: Mailer,
{
    repository: &'a R,
    mailer: &'a M,
    hasher: &'a PasswordHasher,
    tokens: &'a TokenService,
    emails: &'a VerificationEmails,
}

impl<'a, R, M> SignupUseCase<'a, R, M>
where
    R: UserRepository,
    M: Mailer,
{
    pub fn new(
        repository: &'a R,
        mailer: &'a M,
        hasher: &'a PasswordHasher,
        tokens: &'a TokenService,
        emails: &'a VerificationEmails,
    ) -> Self {
        Self {
            repository,
            mailer,
            hasher,
            tokens,
            emails,
        }
    }

    /// Execute the signup use case.
    ///
    /// Account creation succeeds regardless of mail-transport availability:
    /// a failed verification email is logged, not propagated. The user can
    /// request another one through resend-verification.
    #[tracing::instrument(name = "SignupUseCase::execute", skip_all)]
    pub async fn execute(&self, command: SignupCommand) -> Result<UserDto, SignupError> {
        let password_hash = self.hasher.hash(&command.password).await?;

        let user = self
            .repository
            .create(NewUser::local(
                command.name,
                command.email,
                password_hash,
                command.phone,
                command.address,
            ))
            .await?;

        let token = self.tokens.issue(user.id)?;

        match self.emails.notification(&user, &token) {
            Ok(notification) => {
                if let Err(error) = self.mailer.send(notification).await {
                    tracing::warn!(%error, "failed to send verification email");
                }
            }
            Err(error) => tracing::warn!(%error, "failed to build verification email"),
        }

        Ok(user.into_dto())
    }
}
