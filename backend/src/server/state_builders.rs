//! Builders wiring the Diesel adapters into the account service and the
//! HTTP state.

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::info;

use editfolio::domain::ports::{BootstrapSuperAdminRequest, UserAccounts};
use editfolio::domain::{
    AccountValidationError, Nickname, Password, PersonName, UserAccountService, Username,
};
use editfolio::inbound::http::state::HttpState;
use editfolio::outbound::persistence::{
    DieselAccountTransaction, DieselManagerRepository, DieselUserRepository,
};
use editfolio::outbound::token::JwtTokenIssuer;
use editfolio::settings::SuperAdminSeed;

use super::ServerConfig;

/// Account service backed by PostgreSQL and JWT session tokens.
pub(crate) type AccountService = UserAccountService<
    DieselUserRepository,
    DieselManagerRepository,
    DieselAccountTransaction,
    JwtTokenIssuer,
>;

/// Wire repositories, the transaction boundary and the token issuer.
pub(crate) fn build_account_service(config: &ServerConfig) -> Arc<AccountService> {
    let pool = &config.db_pool;
    let service = UserAccountService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselManagerRepository::new(pool.clone())),
        Arc::new(DieselAccountTransaction::new(pool.clone())),
        Arc::clone(&config.tokens),
    )
    .with_timeout(config.operation_timeout);
    Arc::new(service)
}

/// Bundle the ports HTTP handlers depend on.
pub(crate) fn build_http_state(
    accounts: Arc<dyn UserAccounts>,
    config: &ServerConfig,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(accounts, config.tokens.clone()))
}

fn bootstrap_request(
    seed: &SuperAdminSeed<'_>,
) -> Result<BootstrapSuperAdminRequest, AccountValidationError> {
    Ok(BootstrapSuperAdminRequest {
        username: Username::new(seed.username)?,
        password: Password::new(seed.password)?,
        name: PersonName::new(seed.name)?,
        nickname: Nickname::new(seed.nickname)?,
    })
}

/// Provision the configured super admin unless its username is taken.
pub(crate) async fn bootstrap_super_admin(
    accounts: &dyn UserAccounts,
    seed: SuperAdminSeed<'_>,
) -> Result<()> {
    let request = bootstrap_request(&seed)
        .map_err(|err| eyre!("invalid super admin settings ({}): {err}", err.field()))?;
    let user_id = accounts
        .ensure_super_admin(request)
        .await
        .wrap_err("failed to provision super admin")?;
    info!(user_id = %user_id, "super admin available");
    Ok(())
}
