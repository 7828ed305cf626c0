use chrono::{DateTime, Utc};
use secrecy::Secret;
use serde::Serialize;

/// The authentication subject.
///
/// A user is created either by local signup (password hash present, email
/// unverified until the verification link is consumed) or by social sign-on
/// (no password hash, email trusted as verified by the provider). The
/// verification flag only ever transitions `false` to `true`.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Unique across users. `None` only for social accounts whose provider
    /// did not share an email address.
    pub email: Option<String>,
    /// Absent for social-only accounts.
    pub password_hash: Option<Secret<String>>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub job_title: Option<String>,
    pub bio: Option<String>,
    pub is_email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Projects the user onto its externally visible shape.
    ///
    /// The whitelist is deliberate: the password hash, the verification flag
    /// and the audit timestamps never cross a use-case boundary.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            image_url: self.image_url,
            job_title: self.job_title,
            bio: self.bio,
        }
    }
}

/// Externally safe projection of [`User`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub job_title: Option<String>,
    pub bio: Option<String>,
}

/// Fields required to persist a new user. The repository assigns the id and
/// the timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Option<String>,
    pub password_hash: Option<Secret<String>>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub is_email_verified: bool,
}

impl NewUser {
    /// A local signup: credentials present, email still unverified.
    pub fn local(
        name: String,
        email: String,
        password_hash: Secret<String>,
        phone: String,
        address: String,
    ) -> Self {
        Self {
            name,
            email: Some(email),
            password_hash: Some(password_hash),
            phone: Some(phone),
            address: Some(address),
            image_url: None,
            is_email_verified: false,
        }
    }

    /// An account created from a social identity claim. Providers verify the
    /// email out-of-band, so the account starts verified.
    pub fn from_social(profile: &crate::domain::social::SocialProfile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            password_hash: None,
            phone: None,
            address: None,
            image_url: profile.image_url.clone(),
            is_email_verified: true,
        }
    }
}

/// Partial update applied by [`UserRepository::update`].
///
/// [`UserRepository::update`]: crate::ports::repository::UserRepository::update
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub job_title: Option<String>,
    pub bio: Option<String>,
    pub is_email_verified: Option<bool>,
}

impl UserUpdate {
    pub fn verified() -> Self {
        Self {
            is_email_verified: Some(true),
            ..Self::default()
        }
    }
}
