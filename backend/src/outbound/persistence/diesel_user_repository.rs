//! PostgreSQL-backed `UserRepository` using a pooled connection per call.

use async_trait::async_trait;

use crate::domain::ports::{AccountPersistenceError, UserRepository};
use crate::domain::{User, UserId, Username};

use super::account_queries::{find_user_by_id, find_user_by_username, upsert_user};
use super::diesel_error_mapping::map_pool_error;
use super::pool::DbPool;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        find_user_by_id(&mut conn, id).await
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        find_user_by_username(&mut conn, username).await
    }

    async fn save(&self, user: &User) -> Result<(), AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        upsert_user(&mut conn, user).await
    }
}
