//! Ports for minting and verifying session tokens.
use crate::domain::{SessionClaims, SessionToken, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenIssuerError {
        /// The token could not be produced.
        Issue { message: String } => "token issue failed: {message}",
        /// The presented token was malformed, tampered with or expired.
        Invalid { message: String } => "token rejected: {message}",
    }
}

/// Mints a session token for an authenticated user.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Produce a token identifying `user`.
    fn issue(&self, user: &User) -> Result<SessionToken, TokenIssuerError>;
}

/// Recovers the identity carried by a session token.
#[cfg_attr(test, mockall::automock)]
pub trait TokenVerifier: Send + Sync {
    /// Verify signature and expiry, returning the embedded claims.
    fn verify(&self, token: &str) -> Result<SessionClaims, TokenIssuerError>;
}
