use chrono::{DateTime, Utc};

/// Identity claim produced by an OAuth2 provider after a successful
/// authorization flow.
#[derive(Debug, Clone, PartialEq)]
pub struct SocialProfile {
    pub provider: String,
    pub provider_user_id: String,
    pub name: String,
    pub email: Option<String>,
    pub image_url: Option<String>,
}

/// Link between one external provider account and one local user.
///
/// The `(provider, provider_user_id)` pair is globally unique; a user may own
/// any number of identities, one per linked provider. Rows are never mutated
/// after creation.
#[derive(Debug, Clone)]
pub struct OAuthIdentity {
    pub id: i64,
    pub provider: String,
    pub provider_user_id: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
