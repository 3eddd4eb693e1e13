//! Transaction boundary spanning the user and manager repositories.
//!
//! Adapters open a transaction, hand the work a [`TransactionScope`] whose
//! repositories are bound to it, and commit only when the work returns `Ok`.

use async_trait::async_trait;
use futures_util::future::BoxFuture;

use super::{AccountPersistenceError, ManagerRepository, UserRepository};

/// Repositories bound to one open transaction.
#[derive(Clone, Copy)]
pub struct TransactionScope<'a> {
    users: &'a (dyn UserRepository + 'a),
    managers: &'a (dyn ManagerRepository + 'a),
}

impl<'a> TransactionScope<'a> {
    /// Bundle transaction-bound repositories.
    #[must_use]
    pub const fn new(
        users: &'a (dyn UserRepository + 'a),
        managers: &'a (dyn ManagerRepository + 'a),
    ) -> Self {
        Self { users, managers }
    }

    /// User repository joined to the transaction.
    #[must_use]
    pub const fn users(&self) -> &'a (dyn UserRepository + 'a) {
        self.users
    }

    /// Manager repository joined to the transaction.
    #[must_use]
    pub const fn managers(&self) -> &'a (dyn ManagerRepository + 'a) {
        self.managers
    }
}

/// Future returned by transactional work.
pub type TransactionFuture<'a> = BoxFuture<'a, Result<(), AccountPersistenceError>>;

/// Work executed inside a transaction.
pub type TransactionWork =
    Box<dyn for<'a> FnOnce(TransactionScope<'a>) -> TransactionFuture<'a> + Send>;

/// Box a closure as [`TransactionWork`].
///
/// Passing the closure through this function lets the compiler infer the
/// higher-ranked scope lifetime.
pub fn transaction_work<F>(work: F) -> TransactionWork
where
    F: for<'a> FnOnce(TransactionScope<'a>) -> TransactionFuture<'a> + Send + 'static,
{
    Box::new(work)
}

/// All-or-nothing execution of account writes.
#[async_trait]
pub trait AccountTransaction: Send + Sync {
    /// Run `work` in a transaction; commit iff it returns `Ok`.
    async fn run(&self, work: TransactionWork) -> Result<(), AccountPersistenceError>;
}
