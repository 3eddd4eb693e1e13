//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_transaction;
mod manager_repository;
mod readiness_probe;
mod token_issuer;
mod user_accounts;
mod user_repository;

pub use account_transaction::{
    AccountTransaction, TransactionFuture, TransactionScope, TransactionWork, transaction_work,
};
#[cfg(test)]
pub use manager_repository::MockManagerRepository;
pub use manager_repository::ManagerRepository;
#[cfg(test)]
pub use readiness_probe::MockReadinessProbe;
pub use readiness_probe::ReadinessProbe;
#[cfg(test)]
pub use token_issuer::{MockTokenIssuer, MockTokenVerifier};
pub use token_issuer::{TokenIssuer, TokenIssuerError, TokenVerifier};
#[cfg(test)]
pub use user_accounts::MockUserAccounts;
pub use user_accounts::{
    AdminProfile, BootstrapSuperAdminRequest, CreateAdminRequest, CreateCustomerRequest,
    ForceUpdateAdminRequest, UpdateAdminInfoRequest, UpdateAdminPasswordRequest, UserAccountError,
    UserAccounts,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{AccountPersistenceError, UserRepository};
