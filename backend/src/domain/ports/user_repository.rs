//! Port abstraction for user persistence adapters and the persistence error
//! shared by every account repository.
use async_trait::async_trait;

use crate::domain::{User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum AccountPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// A unique constraint (the username) rejected the write.
        Duplicate { message: String } => "account repository rejected duplicate: {message}",
    }
}

/// Storage for [`User`] entities.
///
/// Lookups return soft-deleted users too; callers decide whether a deleted
/// account counts as present.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountPersistenceError>;

    /// Fetch a user by login name.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, AccountPersistenceError>;

    /// Insert or overwrite every column of the user keyed by id.
    async fn save(&self, user: &User) -> Result<(), AccountPersistenceError>;
}
