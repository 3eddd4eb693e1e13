//! PostgreSQL persistence adapters using Diesel.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs and the schema stay private to this module; every
//! database failure is mapped to [`AccountPersistenceError`].
//!
//! [`AccountPersistenceError`]: crate::domain::ports::AccountPersistenceError

mod account_queries;
mod diesel_account_transaction;
mod diesel_error_mapping;
mod diesel_manager_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_transaction::DieselAccountTransaction;
pub use diesel_manager_repository::DieselManagerRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::run_pending_migrations;
pub use pool::{DbPool, PoolConfig, PoolError};
