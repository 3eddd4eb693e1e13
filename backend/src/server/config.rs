//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use editfolio::domain::DEFAULT_OPERATION_TIMEOUT;
use editfolio::outbound::persistence::DbPool;
use editfolio::outbound::token::JwtTokenIssuer;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) tokens: Arc<JwtTokenIssuer>,
    pub(crate) operation_timeout: Duration,
}

impl ServerConfig {
    /// Construct a server configuration from the resolved settings.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, tokens: Arc<JwtTokenIssuer>) -> Self {
        Self {
            bind_addr,
            db_pool,
            tokens,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Override the time budget applied to every account operation.
    #[must_use]
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }
}
