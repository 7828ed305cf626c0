use std::time::Duration;

use axum::http::HeaderValue;
use secrecy::Secret;
use thiserror::Error;
use turnstile_application::{DEFAULT_TOKEN_VALIDITY_SECONDS, HashParams};

use super::constants::{defaults, env::*};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<String>),
    #[error("invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Process-wide configuration, read and validated exactly once at startup.
///
/// Every missing required variable is collected before failing, so an
/// operator sees the whole list in one aggregate error instead of fixing
/// them one crash at a time.
#[derive(Debug, Clone)]
pub struct Settings {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub auth: AuthTokenSettings,
    pub email: EmailSettings,
    pub oauth: OAuthSettings,
}

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub host: String,
    pub port: u16,
    /// Public origin embedded in verification links.
    pub base_url: String,
    pub allowed_origins: Option<AllowedOrigins>,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Clone)]
pub struct AuthTokenSettings {
    pub token_secret: Secret<String>,
    pub token_validity_seconds: i64,
    pub hash: HashParams,
}

#[derive(Debug, Clone)]
pub struct EmailSettings {
    /// Route notifications to the log instead of the Postmark transport.
    pub console_log: bool,
    pub postmark_base_url: String,
    pub auth_token: Secret<String>,
    pub sender: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct OAuthSettings {
    pub google_userinfo_url: String,
}

impl Settings {
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(|name| std::env::var(name).ok())
    }

    fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let mut missing = Vec::new();

        let console_log = lookup(CONSOLE_LOG_EMAILS_ENV_VAR)
            .map(|value| value == "true")
            .unwrap_or(false);

        let database_url = required(&lookup, DATABASE_URL_ENV_VAR, &mut missing);
        let token_secret = required(&lookup, JWT_SECRET_ENV_VAR, &mut missing);

        // The Postmark credentials only matter when mail actually leaves the
        // process.
        let (postmark_token, sender) = if console_log {
            (
                lookup(POSTMARK_AUTH_TOKEN_ENV_VAR).unwrap_or_default(),
                lookup(EMAIL_SENDER_ENV_VAR).unwrap_or_default(),
            )
        } else {
            (
                required(&lookup, POSTMARK_AUTH_TOKEN_ENV_VAR, &mut missing).unwrap_or_default(),
                required(&lookup, EMAIL_SENDER_ENV_VAR, &mut missing).unwrap_or_default(),
            )
        };

        if !missing.is_empty() {
            return Err(SettingsError::Missing(missing));
        }

        let port = parse_or(&lookup, APP_PORT_ENV_VAR, defaults::APP_PORT)?;
        let token_validity_seconds = parse_or(
            &lookup,
            TOKEN_TTL_SECONDS_ENV_VAR,
            DEFAULT_TOKEN_VALIDITY_SECONDS,
        )?;
        let timeout_millis = parse_or(
            &lookup,
            EMAIL_TIMEOUT_MILLIS_ENV_VAR,
            defaults::EMAIL_TIMEOUT_MILLIS,
        )?;

        let hash_defaults = HashParams::default();
        let hash = HashParams {
            m_cost: parse_or(&lookup, ARGON2_M_COST_ENV_VAR, hash_defaults.m_cost)?,
            t_cost: parse_or(&lookup, ARGON2_T_COST_ENV_VAR, hash_defaults.t_cost)?,
            p_cost: parse_or(&lookup, ARGON2_P_COST_ENV_VAR, hash_defaults.p_cost)?,
        };

        let allowed_origins = lookup(ALLOWED_ORIGINS_ENV_VAR)
            .map(|raw| AllowedOrigins::parse(&raw))
            .transpose()?;

        Ok(Self {
            app: AppSettings {
                host: lookup(APP_HOST_ENV_VAR).unwrap_or_else(|| defaults::APP_HOST.to_string()),
                port,
                base_url: lookup(BASE_URL_ENV_VAR)
                    .unwrap_or_else(|| defaults::BASE_URL.to_string()),
                allowed_origins,
            },
            database: DatabaseSettings {
                url: Secret::from(database_url.unwrap_or_default()),
            },
            auth: AuthTokenSettings {
                token_secret: Secret::from(token_secret.unwrap_or_default()),
                token_validity_seconds,
                hash,
            },
            email: EmailSettings {
                console_log,
                postmark_base_url: lookup(POSTMARK_BASE_URL_ENV_VAR)
                    .unwrap_or_else(|| defaults::POSTMARK_BASE_URL.to_string()),
                auth_token: Secret::from(postmark_token),
                sender,
                timeout: Duration::from_millis(timeout_millis),
            },
            oauth: OAuthSettings {
                google_userinfo_url: lookup(GOOGLE_USERINFO_URL_ENV_VAR)
                    .unwrap_or_else(|| defaults::GOOGLE_USERINFO_URL.to_string()),
            },
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    missing: &mut Vec<String>,
) -> Option<String> {
    match lookup(name).filter(|value| !value.trim().is_empty()) {
        Some(value) => Some(value),
        None => {
            missing.push(name.to_string());
            None
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, SettingsError>
where
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.parse().map_err(|e: T::Err| SettingsError::Invalid {
            name,
            message: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// CORS origins the service will answer for.
#[derive(Debug, Clone)]
pub struct AllowedOrigins(Vec<HeaderValue>);

impl AllowedOrigins {
    /// Parses a comma-separated origin list.
    pub fn parse(raw: &str) -> Result<Self, SettingsError> {
        let mut origins = Vec::new();
        for origin in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let value = HeaderValue::from_str(origin).map_err(|e| SettingsError::Invalid {
                name: ALLOWED_ORIGINS_ENV_VAR,
                message: e.to_string(),
            })?;
            origins.push(value);
        }
        Ok(Self(origins))
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.0.iter().any(|allowed| allowed == origin)
    }
}
