//! Backend entry-point: loads settings, prepares the database and serves
//! the account API.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use editfolio::inbound::http::health::HealthState;
use editfolio::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use editfolio::outbound::token::JwtTokenIssuer;
use editfolio::settings::AppSettings;
use server::{ServerConfig, bootstrap_super_admin, build_account_service, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let database_url = settings
        .database_url
        .as_deref()
        .ok_or_else(|| eyre!("EDITFOLIO_DATABASE_URL must be set"))?;
    let jwt_secret = settings
        .jwt_secret
        .as_deref()
        .filter(|secret| !secret.is_empty())
        .ok_or_else(|| eyre!("EDITFOLIO_JWT_SECRET must be set"))?;
    let bind_addr = settings.bind_addr().wrap_err("invalid bind address")?;

    if settings.skip_migrations {
        info!("skipping database migrations");
    } else {
        run_pending_migrations(database_url)
            .await
            .wrap_err("failed to apply database migrations")?;
    }

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.db_max_connections()))
        .await
        .wrap_err("failed to build database pool")?;
    let tokens = Arc::new(JwtTokenIssuer::new(jwt_secret.as_bytes(), settings.token_ttl()));
    let config = ServerConfig::new(bind_addr, pool.clone(), tokens)
        .with_operation_timeout(settings.operation_timeout());

    let accounts = build_account_service(&config);
    if let Some(seed) = settings.superadmin() {
        bootstrap_super_admin(accounts.as_ref(), seed).await?;
    }

    let health_state = web::Data::new(HealthState::new().with_probe(Arc::new(pool)));
    let server = create_server(health_state, config, accounts)?;
    info!(%bind_addr, "account API listening");
    server.await.wrap_err("server terminated with an error")
}
