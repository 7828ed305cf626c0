use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher as _, SaltString, rand_core},
};
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Failed to hash password: {0}")]
    HashingFailed(String),
    #[error("Failed to compare password: {0}")]
    ComparisonFailed(String),
}

/// Work factor of the password hashing primitive, read once from
/// configuration at startup.
#[derive(Debug, Clone, Copy)]
pub struct HashParams {
    pub m_cost: u32,
    pub t_cost: u32,
    pub p_cost: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            m_cost: 15000,
            t_cost: 2,
            p_cost: 1,
        }
    }
}

/// One-way, salted password hashing and verification (Argon2id).
///
/// Hashing is CPU-bound, so both operations run on the blocking pool. The
/// plaintext never leaves the [`Secret`] wrapper except at the primitive
/// boundary and is never logged.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    pub fn new(work: HashParams) -> Result<Self, CredentialError> {
        let params = Params::new(work.m_cost, work.t_cost, work.p_cost, None)
            .map_err(|e| CredentialError::HashingFailed(e.to_string()))?;
        Ok(Self { params })
    }

    #[tracing::instrument(name = "Computing password hash", skip_all)]
    pub async fn hash(&self, password: &Secret<String>) -> Result<Secret<String>, CredentialError> {
        let password = password.clone();
        let params = self.params.clone();
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let salt = SaltString::generate(rand_core::OsRng);
                Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
                    .hash_password(password.expose_secret().as_bytes(), &salt)
                    .map(|hash| Secret::from(hash.to_string()))
                    .map_err(|e| CredentialError::HashingFailed(e.to_string()))
            })
        })
        .await
        .map_err(|e| CredentialError::HashingFailed(e.to_string()))?
    }

    /// Checks a candidate against a stored digest. A mismatch is `Ok(false)`;
    /// only an unexpected primitive failure is an error, so a caller can
    /// never mistake a broken comparison for a wrong password.
    #[tracing::instrument(name = "Verifying password hash", skip_all)]
    pub async fn verify(
        &self,
        password: &Secret<String>,
        expected_hash: &Secret<String>,
    ) -> Result<bool, CredentialError> {
        let password = password.clone();
        let expected_hash = expected_hash.clone();
        let params = self.params.clone();
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let parsed = PasswordHash::new(expected_hash.expose_secret())
                    .map_err(|e| CredentialError::ComparisonFailed(e.to_string()))?;

                match Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
                    .verify_password(password.expose_secret().as_bytes(), &parsed)
                {
                    Ok(()) => Ok(true),
                    Err(password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(CredentialError::ComparisonFailed(e.to_string())),
                }
            })
        })
        .await
        .map_err(|e| CredentialError::ComparisonFailed(e.to_string()))?
    }
}
