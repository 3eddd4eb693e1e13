//! Port abstraction for manager profile persistence.
use async_trait::async_trait;

use crate::domain::{Manager, UserId};

use super::AccountPersistenceError;

/// Storage for [`Manager`] profiles, keyed by the owning user id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ManagerRepository: Send + Sync {
    /// Fetch the profile owned by `user_id`.
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Manager>, AccountPersistenceError>;

    /// Insert or overwrite the profile keyed by its user id.
    async fn save(&self, manager: &Manager) -> Result<(), AccountPersistenceError>;
}
