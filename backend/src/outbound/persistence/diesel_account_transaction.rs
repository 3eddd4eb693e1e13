//! Diesel transaction boundary for account writes.
//!
//! The open transaction's connection sits behind an async mutex shared by the
//! scoped user and manager repositories. Concurrently issued statements are
//! serialised on the connection and commit or roll back together.

use async_trait::async_trait;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection};
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::ports::{
    AccountPersistenceError, AccountTransaction, ManagerRepository, TransactionScope,
    TransactionWork, UserRepository,
};
use crate::domain::{Manager, User, UserId, Username};

use super::account_queries::{
    find_manager, find_user_by_id, find_user_by_username, upsert_manager, upsert_user,
};
use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::pool::DbPool;

type SharedConnection<'c> = Mutex<&'c mut AsyncPgConnection>;

/// Failure inside the Diesel transaction closure.
enum TransactionError {
    Diesel(diesel::result::Error),
    Work(AccountPersistenceError),
}

impl From<diesel::result::Error> for TransactionError {
    fn from(value: diesel::result::Error) -> Self {
        Self::Diesel(value)
    }
}

impl From<TransactionError> for AccountPersistenceError {
    fn from(value: TransactionError) -> Self {
        match value {
            TransactionError::Diesel(error) => map_diesel_error(error),
            TransactionError::Work(error) => error,
        }
    }
}

/// User repository bound to an open transaction.
struct ScopedUserRepository<'a, 'c> {
    conn: &'a SharedConnection<'c>,
}

#[async_trait]
impl<'a, 'c> UserRepository for ScopedUserRepository<'a, 'c> {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountPersistenceError> {
        let mut conn = self.conn.lock().await;
        find_user_by_id(&mut conn, id).await
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, AccountPersistenceError> {
        let mut conn = self.conn.lock().await;
        find_user_by_username(&mut conn, username).await
    }

    async fn save(&self, user: &User) -> Result<(), AccountPersistenceError> {
        let mut conn = self.conn.lock().await;
        upsert_user(&mut conn, user).await
    }
}

/// Manager repository bound to an open transaction.
struct ScopedManagerRepository<'a, 'c> {
    conn: &'a SharedConnection<'c>,
}

#[async_trait]
impl<'a, 'c> ManagerRepository for ScopedManagerRepository<'a, 'c> {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Manager>, AccountPersistenceError> {
        let mut conn = self.conn.lock().await;
        find_manager(&mut conn, user_id).await
    }

    async fn save(&self, manager: &Manager) -> Result<(), AccountPersistenceError> {
        let mut conn = self.conn.lock().await;
        upsert_manager(&mut conn, manager).await
    }
}

/// Diesel-backed implementation of the account transaction port.
#[derive(Clone)]
pub struct DieselAccountTransaction {
    pool: DbPool,
}

impl DieselAccountTransaction {
    /// Create a transaction boundary over the given pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountTransaction for DieselAccountTransaction {
    async fn run(&self, work: TransactionWork) -> Result<(), AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Result<(), TransactionError> = conn
            .transaction(|conn| {
                async move {
                    let shared: SharedConnection<'_> = Mutex::new(&mut **conn);
                    let users = ScopedUserRepository { conn: &shared };
                    let managers = ScopedManagerRepository { conn: &shared };
                    work(TransactionScope::new(&users, &managers))
                        .await
                        .map_err(TransactionError::Work)
                }
                .scope_boxed()
            })
            .await;

        if let Err(TransactionError::Work(error)) = &result {
            debug!(error = %error, "account transaction rolled back");
        }
        result.map_err(AccountPersistenceError::from)
    }
}
