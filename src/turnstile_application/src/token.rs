use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode, errors::ErrorKind};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Verification links expire after one day.
pub const DEFAULT_TOKEN_VALIDITY_SECONDS: i64 = 86_400;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is required")]
    Missing,
    #[error("Invalid token format")]
    Malformed,
    #[error("Token has expired")]
    Expired,
    #[error("Token payload is invalid")]
    PayloadInvalid,
    #[error("Token verification failed")]
    VerificationFailed,
}

/// Claim carried by a verification token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationClaims {
    pub user_id: i64,
}

#[derive(Serialize)]
struct Claims {
    id: i64,
    iat: i64,
    exp: i64,
}

// Decode target that stays permissive about the id claim: a well-signed token
// whose id is missing or mistyped must surface as PayloadInvalid, not as a
// structural decode failure.
#[derive(Deserialize)]
struct RawClaims {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    #[allow(dead_code)]
    exp: Option<i64>,
}

/// Issues and validates the signed, time-limited identity tokens used for
/// stateless email verification. No server-side token registry exists;
/// possession of a validly-signed, unexpired token is the whole proof.
#[derive(Clone)]
pub struct TokenService {
    secret: Secret<String>,
    validity_seconds: i64,
}

impl TokenService {
    pub fn new(secret: Secret<String>, validity_seconds: i64) -> Self {
        Self {
            secret,
            validity_seconds,
        }
    }

    pub fn issue(&self, user_id: i64) -> Result<String, TokenError> {
        let delta = Duration::try_seconds(self.validity_seconds)
            .ok_or(TokenError::VerificationFailed)?;

        let now = Utc::now();
        let exp = now
            .checked_add_signed(delta)
            .ok_or(TokenError::VerificationFailed)?;

        let claims = Claims {
            id: user_id,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .map_err(|_| TokenError::VerificationFailed)
    }

    pub fn verify(&self, token: &str) -> Result<VerificationClaims, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::Missing);
        }

        let data = decode::<RawClaims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &Validation::default(),
        )
        .map_err(classify_decode_error)?;

        let user_id = data
            .claims
            .id
            .as_ref()
            .and_then(serde_json::Value::as_i64)
            .ok_or(TokenError::PayloadInvalid)?;

        Ok(VerificationClaims { user_id })
    }
}

fn classify_decode_error(error: jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidToken
        | ErrorKind::InvalidSignature
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => TokenError::Malformed,
        _ => TokenError::VerificationFailed,
    }
}
