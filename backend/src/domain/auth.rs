//! Authentication primitives: sign-in credentials, session tokens and the
//! claims recovered from them.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{AccountValidationError, Password, Role, UserId, Username};

/// Validated sign-in credentials.
///
/// ## Invariants
/// - `username` passes [`Username`] validation;
/// - `password` is non-empty but keeps caller-provided whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, AccountValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            password: Password::new(password)?,
        })
    }

    /// Username suitable for user lookups.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Password provided by the caller.
    #[must_use]
    pub const fn password(&self) -> &Password {
        &self.password
    }
}

/// Opaque session token handed to clients after sign-in.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap an encoded token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Encoded form sent to clients.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Identity recovered from a verified session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    /// Signed-in user.
    pub user_id: UserId,
    /// Username at the time the token was issued.
    pub username: Username,
    /// Role at the time the token was issued.
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", AccountValidationError::EmptyUsername)]
    #[case("   ", "pw", AccountValidationError::EmptyUsername)]
    #[case("admin", "pw", AccountValidationError::InvalidEmail)]
    #[case("a@b.com", "", AccountValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: AccountValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn valid_credentials_trim_username_only() {
        let creds = LoginCredentials::try_from_parts("  a@b.com ", " Pw1! ")
            .expect("valid inputs should succeed");
        assert_eq!(creds.username().as_ref(), "a@b.com");
        assert_eq!(creds.password().expose(), " Pw1! ");
    }

    #[rstest]
    fn session_token_debug_is_redacted() {
        let token = SessionToken::new("header.payload.signature");
        assert_eq!(format!("{token:?}"), "SessionToken(<redacted>)");
        assert_eq!(token.as_str(), "header.payload.signature");
    }
}
