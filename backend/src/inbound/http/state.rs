//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{TokenVerifier, UserAccounts};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Account use cases.
    pub accounts: Arc<dyn UserAccounts>,
    /// Verifies bearer tokens on protected routes.
    pub tokens: Arc<dyn TokenVerifier>,
}

impl HttpState {
    /// Bundle the account use cases with the session token verifier.
    #[must_use]
    pub fn new(accounts: Arc<dyn UserAccounts>, tokens: Arc<dyn TokenVerifier>) -> Self {
        Self { accounts, tokens }
    }
}
