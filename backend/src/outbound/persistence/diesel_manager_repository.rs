//! PostgreSQL-backed `ManagerRepository`.

use async_trait::async_trait;

use crate::domain::ports::{AccountPersistenceError, ManagerRepository};
use crate::domain::{Manager, UserId};

use super::account_queries::{find_manager, upsert_manager};
use super::diesel_error_mapping::map_pool_error;
use super::pool::DbPool;

/// Diesel-backed implementation of the manager repository port.
#[derive(Clone)]
pub struct DieselManagerRepository {
    pool: DbPool,
}

impl DieselManagerRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ManagerRepository for DieselManagerRepository {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Manager>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        find_manager(&mut conn, user_id).await
    }

    async fn save(&self, manager: &Manager) -> Result<(), AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        upsert_manager(&mut conn, manager).await
    }
}
