use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use turnstile_core::{
    NewUser, OAuthIdentity, RepositoryError, SocialProfile, User, UserRepository, UserUpdate,
};

/// In-process user store backed by plain collections.
///
/// Serves the test suites and local development. A single write lock around
/// the whole state gives the same atomicity the Postgres implementation gets
/// from a transaction, which matters for the social-identity path.
#[derive(Default, Clone)]
pub struct InMemoryUserRepository {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    identities: Vec<OAuthIdentity>,
    next_user_id: i64,
    next_identity_id: i64,
}

impl Inner {
    fn insert_user(&mut self, new_user: NewUser) -> Result<User, RepositoryError> {
        if let Some(email) = &new_user.email {
            if self
                .users
                .iter()
                .any(|user| user.email.as_deref() == Some(email.as_str()))
            {
                return Err(RepositoryError::Unexpected(format!(
                    "duplicate key on users.email: {email}"
                )));
            }
        }

        self.next_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: self.next_user_id,
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            phone: new_user.phone,
            address: new_user.address,
            image_url: new_user.image_url,
            job_title: None,
            bio: None,
            is_email_verified: new_user.is_email_verified,
            created_at: now,
            updated_at: now,
        };
        self.users.push(user.clone());
        Ok(user)
    }

    fn insert_identity(&mut self, profile: &SocialProfile, user_id: i64) {
        self.next_identity_id += 1;
        let now = Utc::now();
        self.identities.push(OAuthIdentity {
            id: self.next_identity_id,
            provider: profile.provider.clone(),
            provider_user_id: profile.provider_user_id.clone(),
            user_id,
            created_at: now,
            updated_at: now,
        });
    }

    fn identity_owner(&self, provider: &str, provider_user_id: &str) -> Option<&User> {
        let identity = self
            .identities
            .iter()
            .find(|i| i.provider == provider && i.provider_user_id == provider_user_id)?;
        self.users.iter().find(|user| user.id == identity.user_id)
    }
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users. Test inspection helper.
    pub async fn user_count(&self) -> usize {
        self.inner.read().await.users.len()
    }

    /// Number of stored identity links. Test inspection helper.
    pub async fn oauth_identity_count(&self) -> usize {
        self.inner.read().await.identities.len()
    }
}

#[async_trait::async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .find(|user| user.email.as_deref() == Some(email))
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|user| user.id == id).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        self.inner.write().await.insert_user(new_user)
    }

    async fn update(&self, id: i64, changes: UserUpdate) -> Result<User, RepositoryError> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or(RepositoryError::NotFound)?;

        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(phone) = changes.phone {
            user.phone = Some(phone);
        }
        if let Some(address) = changes.address {
            user.address = Some(address);
        }
        if let Some(image_url) = changes.image_url {
            user.image_url = Some(image_url);
        }
        if let Some(job_title) = changes.job_title {
            user.job_title = Some(job_title);
        }
        if let Some(bio) = changes.bio {
            user.bio = Some(bio);
        }
        if let Some(is_email_verified) = changes.is_email_verified {
            user.is_email_verified = is_email_verified;
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn find_or_create_from_social(
        &self,
        profile: &SocialProfile,
    ) -> Result<User, RepositoryError> {
        let mut inner = self.inner.write().await;

        if let Some(user) = inner
            .identity_owner(&profile.provider, &profile.provider_user_id)
            .cloned()
        {
            return Ok(user);
        }

        let linked = profile.email.as_deref().and_then(|email| {
            inner
                .users
                .iter()
                .find(|user| user.email.as_deref() == Some(email))
                .cloned()
        });

        let user = match linked {
            Some(user) => user,
            None => inner.insert_user(NewUser::from_social(profile))?,
        };

        inner.insert_identity(profile, user.id);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use secrecy::Secret;

    use super::*;

    fn profile(email: Option<&str>) -> SocialProfile {
        SocialProfile {
            provider: "google".to_string(),
            provider_user_id: "12345".to_string(),
            name: "Test User".to_string(),
            email: email.map(str::to_string),
            image_url: Some("http://example.com/image.jpg".to_string()),
        }
    }

    fn local_user(email: &str) -> NewUser {
        NewUser::local(
            "Test User".to_string(),
            email.to_string(),
            Secret::from("$argon2id$stub".to_string()),
            "0591234567".to_string(),
            "123 Test St".to_string(),
        )
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let repository = InMemoryUserRepository::new();

        let first = repository.create(local_user("a@example.com")).await.unwrap();
        let second = repository.create(local_user("b@example.com")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(!first.is_email_verified);
    }

    #[tokio::test]
    async fn duplicate_emails_are_rejected() {
        let repository = InMemoryUserRepository::new();
        repository.create(local_user("a@example.com")).await.unwrap();

        let result = repository.create(local_user("a@example.com")).await;
        assert!(matches!(result, Err(RepositoryError::Unexpected(_))));
    }

    #[tokio::test]
    async fn update_applies_only_the_provided_fields() {
        let repository = InMemoryUserRepository::new();
        let user = repository.create(local_user("a@example.com")).await.unwrap();

        let updated = repository
            .update(user.id, UserUpdate::verified())
            .await
            .unwrap();

        assert!(updated.is_email_verified);
        assert_eq!(updated.name, "Test User");
        assert_eq!(updated.email.as_deref(), Some("a@example.com"));
    }

    #[tokio::test]
    async fn update_of_an_unknown_id_reports_not_found() {
        let repository = InMemoryUserRepository::new();
        let result = repository.update(999, UserUpdate::verified()).await;
        assert_eq!(result.unwrap_err(), RepositoryError::NotFound);
    }

    #[tokio::test]
    async fn repeated_social_resolution_reuses_the_identity() {
        let repository = InMemoryUserRepository::new();

        let first = repository
            .find_or_create_from_social(&profile(Some("test@example.com")))
            .await
            .unwrap();
        let second = repository
            .find_or_create_from_social(&profile(Some("test@example.com")))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(repository.user_count().await, 1);
        assert_eq!(repository.oauth_identity_count().await, 1);
    }

    #[tokio::test]
    async fn social_resolution_links_to_an_existing_local_account_by_email() {
        let repository = InMemoryUserRepository::new();
        let local = repository
            .create(local_user("test@example.com"))
            .await
            .unwrap();

        let resolved = repository
            .find_or_create_from_social(&profile(Some("test@example.com")))
            .await
            .unwrap();

        assert_eq!(resolved.id, local.id);
        assert_eq!(repository.user_count().await, 1);
        assert_eq!(repository.oauth_identity_count().await, 1);
    }

    #[tokio::test]
    async fn social_resolution_without_email_creates_a_fresh_verified_account() {
        let repository = InMemoryUserRepository::new();

        let user = repository
            .find_or_create_from_social(&profile(None))
            .await
            .unwrap();

        assert!(user.is_email_verified);
        assert!(user.email.is_none());
        assert!(user.password_hash.is_none());
        assert_eq!(repository.oauth_identity_count().await, 1);
    }

    #[tokio::test]
    async fn concurrent_social_resolutions_create_a_single_identity() {
        let repository = InMemoryUserRepository::new();

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let repository = repository.clone();
                tokio::spawn(async move {
                    repository
                        .find_or_create_from_social(&profile(Some("test@example.com")))
                        .await
                })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap().unwrap().id);
        }

        assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(repository.user_count().await, 1);
        assert_eq!(repository.oauth_identity_count().await, 1);
    }
}
