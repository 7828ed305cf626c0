use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    social::SocialProfile,
    user::{NewUser, User, UserUpdate},
};

// UserRepository port trait and errors
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("User not found")]
    NotFound,
    #[error("Unexpected error {0}")]
    Unexpected(String),
}

impl PartialEq for RepositoryError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound, Self::NotFound) => true,
            (Self::Unexpected(_), Self::Unexpected(_)) => true,
            _ => false,
        }
    }
}

/// Persistence operations the use cases depend on.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError>;

    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError>;

    /// Applies a partial update. Fails with [`RepositoryError::NotFound`]
    /// when no user has the given id.
    async fn update(&self, id: i64, changes: UserUpdate) -> Result<User, RepositoryError>;

    /// Resolves a social identity claim to a local user, atomically:
    ///
    /// 1. An existing `(provider, provider_user_id)` identity wins outright.
    /// 2. Otherwise an email match links the identity to that local account.
    /// 3. Otherwise a new pre-verified user is created.
    ///
    /// A duplicate-identity insert race is resolved by re-reading the
    /// identity, never by surfacing the constraint violation.
    async fn find_or_create_from_social(
        &self,
        profile: &SocialProfile,
    ) -> Result<User, RepositoryError>;
}
