//! Application settings loaded via OrthoConfig.
//!
//! Values come from `EDITFOLIO_*` environment variables, CLI flags or a
//! configuration file. Accessors fall back to defaults for optional values.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_TOKEN_TTL_SECONDS: i64 = 3_600;
const DEFAULT_SUPERADMIN_NAME: &str = "Super Admin";
const DEFAULT_SUPERADMIN_NICKNAME: &str = "root";

/// Runtime configuration for the account backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EDITFOLIO")]
pub struct AppSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Maximum pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Time budget for one account operation, in milliseconds.
    pub request_timeout_ms: Option<u64>,
    /// Secret used to sign session tokens.
    pub jwt_secret: Option<String>,
    /// Session token lifetime, in seconds.
    pub token_ttl_seconds: Option<i64>,
    /// Skip embedded migrations at startup.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
    /// Username of the super admin provisioned at startup.
    pub superadmin_username: Option<String>,
    /// Password of the super admin provisioned at startup.
    pub superadmin_password: Option<String>,
    /// Display name of the provisioned super admin.
    pub superadmin_name: Option<String>,
    /// Nickname of the provisioned super admin.
    pub superadmin_nickname: Option<String>,
}

/// Credentials for the super admin created at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuperAdminSeed<'a> {
    /// Login name.
    pub username: &'a str,
    /// Initial password.
    pub password: &'a str,
    /// Real name for the manager profile.
    pub name: &'a str,
    /// Display nickname.
    pub nickname: &'a str,
}

impl AppSettings {
    /// Parse the configured bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).parse()
    }

    /// Pool size, falling back to the default.
    #[must_use]
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Per-operation time budget.
    #[must_use]
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS))
    }

    /// Session token lifetime.
    #[must_use]
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.token_ttl_seconds.unwrap_or(DEFAULT_TOKEN_TTL_SECONDS))
    }

    /// Super admin bootstrap values when both username and password are set.
    #[must_use]
    pub fn superadmin(&self) -> Option<SuperAdminSeed<'_>> {
        let username = self.superadmin_username.as_deref()?;
        let password = self.superadmin_password.as_deref()?;
        Some(SuperAdminSeed {
            username,
            password,
            name: self
                .superadmin_name
                .as_deref()
                .unwrap_or(DEFAULT_SUPERADMIN_NAME),
            nickname: self
                .superadmin_nickname
                .as_deref()
                .unwrap_or(DEFAULT_SUPERADMIN_NICKNAME),
        })
    }
}
