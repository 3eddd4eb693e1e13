//! Password input and the opaque stored credential.
//!
//! `Password` is what callers type; `Credential` is what the user entity keeps.
//! A credential can be compared against a password or replaced, never read
//! back as plaintext. Hashes use Argon2id in PHC string format.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use zeroize::Zeroizing;

use super::AccountValidationError;

/// Maximum accepted password length in characters.
pub const PASSWORD_MAX: usize = 128;

const SALT_LEN: usize = 16;

/// Caller-provided password, wiped from memory on drop.
///
/// ## Invariants
/// - non-empty and at most [`PASSWORD_MAX`] characters;
/// - whitespace is preserved to avoid surprising comparisons.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and wrap a raw password.
    pub fn new(raw: impl Into<String>) -> Result<Self, AccountValidationError> {
        let secret = Zeroizing::new(raw.into());
        if secret.is_empty() {
            return Err(AccountValidationError::EmptyPassword);
        }
        if secret.chars().count() > PASSWORD_MAX {
            return Err(AccountValidationError::PasswordTooLong { max: PASSWORD_MAX });
        }
        Ok(Self(secret))
    }

    /// Wrap a value another validated type already guarantees is acceptable.
    pub(super) fn from_validated(raw: String) -> Self {
        Self(Zeroizing::new(raw))
    }

    /// Plaintext view for hashing and comparison.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Failures while deriving or loading a credential.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    /// Hashing the password failed.
    #[error("password hashing failed: {message}")]
    Hash {
        /// Underlying hasher failure.
        message: String,
    },
    /// A stored hash could not be parsed.
    #[error("stored credential is malformed: {message}")]
    Malformed {
        /// Parser failure for the stored value.
        message: String,
    },
}

/// Opaque stored credential (Argon2id PHC string).
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Hash a password with a fresh random salt.
    pub fn derive(password: &Password) -> Result<Self, CredentialError> {
        let salt_bytes: [u8; SALT_LEN] = rand::random();
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|err| CredentialError::Hash {
            message: err.to_string(),
        })?;
        let hash = Argon2::default()
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|err| CredentialError::Hash {
                message: err.to_string(),
            })?;
        Ok(Self(hash.to_string()))
    }

    /// Rehydrate a credential from its persisted PHC string.
    pub fn from_hash(hash: impl Into<String>) -> Result<Self, CredentialError> {
        let stored = hash.into();
        PasswordHash::new(&stored).map_err(|err| CredentialError::Malformed {
            message: err.to_string(),
        })?;
        Ok(Self(stored))
    }

    /// Whether `candidate` is the password this credential was derived from.
    #[must_use]
    pub fn matches(&self, candidate: &Password) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.0) else {
            return false;
        };
        Argon2::default()
            .verify_password(candidate.expose().as_bytes(), &parsed)
            .is_ok()
    }

    /// [`Credential::derive`] on the blocking thread pool.
    pub async fn derive_async(password: Password) -> Result<Self, CredentialError> {
        on_blocking_pool(move || Self::derive(&password)).await?
    }

    /// [`Credential::matches`] on the blocking thread pool.
    pub async fn matches_async(&self, candidate: &Password) -> Result<bool, CredentialError> {
        let stored = self.clone();
        let attempt = candidate.clone();
        on_blocking_pool(move || stored.matches(&attempt)).await
    }

    /// PHC string for persistence adapters.
    #[must_use]
    pub fn as_hash(&self) -> &str {
        self.0.as_str()
    }
}

/// Argon2 is CPU bound; keep it off the async workers so request timeouts
/// stay responsive.
async fn on_blocking_pool<R, F>(work: F) -> Result<R, CredentialError>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| CredentialError::Hash {
            message: format!("hashing task failed: {err}"),
        })
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
