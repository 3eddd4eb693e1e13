//! Driving port for the account lifecycle use cases.
//!
//! Inbound adapters call [`UserAccounts`] without knowing how accounts are
//! stored or how tokens are minted. HTTP handler tests substitute the
//! generated mock.

use async_trait::async_trait;

use crate::domain::{
    CredentialError, LoginCredentials, Mobile, Nickname, Password, PersonName, Role,
    SessionToken, UserId, Username,
};

use super::{AccountPersistenceError, TokenIssuerError};

/// Failures surfaced by the account use cases.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserAccountError {
    /// No active account satisfies the request.
    #[error("account not found")]
    NotFound,
    /// The username is already taken.
    #[error("account already exists")]
    AlreadyExists,
    /// The supplied password does not match the stored credential.
    #[error("wrong password")]
    WrongPassword,
    /// The operation exceeded its time budget.
    #[error("account operation timed out")]
    TimedOut,
    /// Storage failed.
    #[error(transparent)]
    Persistence(AccountPersistenceError),
    /// The token adapter failed.
    #[error(transparent)]
    Token(#[from] TokenIssuerError),
    /// Hashing or loading a credential failed.
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

impl From<AccountPersistenceError> for UserAccountError {
    fn from(value: AccountPersistenceError) -> Self {
        if value.is_duplicate() {
            Self::AlreadyExists
        } else {
            Self::Persistence(value)
        }
    }
}

/// Input for [`UserAccounts::create_customer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCustomerRequest {
    /// Login name.
    pub email: Username,
    /// Mobile number, also the initial password.
    pub mobile: Mobile,
    /// Validated at the boundary; not stored.
    pub name: PersonName,
}

/// Input for [`UserAccounts::create_admin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAdminRequest {
    /// Real name for the manager profile.
    pub name: PersonName,
    /// Login name.
    pub email: Username,
    /// Initial password.
    pub password: Password,
    /// Display nickname.
    pub nickname: Nickname,
}

/// Input for [`UserAccounts::update_admin_password`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAdminPasswordRequest {
    /// Admin changing their own password.
    pub user_id: UserId,
    /// Current password, checked before the change.
    pub old_password: Password,
    /// Replacement password.
    pub new_password: Password,
}

/// Input for [`UserAccounts::update_admin_info`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAdminInfoRequest {
    /// Admin editing their own profile.
    pub user_id: UserId,
    /// New login name.
    pub username: Username,
    /// New real name.
    pub name: PersonName,
    /// New nickname.
    pub nickname: Nickname,
}

/// Input for [`UserAccounts::force_update_admin`]; skips the old-password
/// check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForceUpdateAdminRequest {
    /// Admin being overwritten.
    pub user_id: UserId,
    /// New login name.
    pub username: Username,
    /// New real name.
    pub name: PersonName,
    /// New nickname.
    pub nickname: Nickname,
    /// New password.
    pub password: Password,
}

/// Input for [`UserAccounts::ensure_super_admin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapSuperAdminRequest {
    /// Login name of the super admin.
    pub username: Username,
    /// Initial password.
    pub password: Password,
    /// Real name for the manager profile.
    pub name: PersonName,
    /// Display nickname.
    pub nickname: Nickname,
}

/// Read model combining an admin-like user with its manager profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminProfile {
    /// User id.
    pub id: UserId,
    /// Login name.
    pub username: Username,
    /// Admin or super admin.
    pub role: Role,
    /// Real name.
    pub name: PersonName,
    /// Display nickname.
    pub nickname: Nickname,
}

/// Account lifecycle use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccounts: Send + Sync {
    /// Register a customer whose initial password is their mobile number.
    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<UserId, UserAccountError>;

    /// Register an admin together with its manager profile.
    async fn create_admin(&self, request: CreateAdminRequest) -> Result<UserId, UserAccountError>;

    /// Authenticate and mint a session token.
    async fn sign_in(
        &self,
        credentials: LoginCredentials,
    ) -> Result<SessionToken, UserAccountError>;

    /// Change an admin's own password after checking the old one.
    async fn update_admin_password(
        &self,
        request: UpdateAdminPasswordRequest,
    ) -> Result<(), UserAccountError>;

    /// Change an admin's username, name and nickname.
    async fn update_admin_info(
        &self,
        request: UpdateAdminInfoRequest,
    ) -> Result<(), UserAccountError>;

    /// Overwrite another admin's profile and password.
    async fn force_update_admin(
        &self,
        request: ForceUpdateAdminRequest,
    ) -> Result<(), UserAccountError>;

    /// Soft-delete an active customer.
    async fn delete_customer(&self, user_id: UserId) -> Result<(), UserAccountError>;

    /// Soft-delete an active admin.
    async fn delete_admin(&self, user_id: UserId) -> Result<(), UserAccountError>;

    /// Current role of an active (not soft-deleted) user.
    ///
    /// Inbound adapters call this on every authenticated request so a token
    /// outliving its account, or its role, grants nothing.
    async fn active_role(&self, user_id: UserId) -> Result<Role, UserAccountError>;

    /// Load the profile of an active admin-like user.
    async fn admin_profile(&self, user_id: UserId) -> Result<AdminProfile, UserAccountError>;

    /// Create the configured super admin unless the username is taken.
    async fn ensure_super_admin(
        &self,
        request: BootstrapSuperAdminRequest,
    ) -> Result<UserId, UserAccountError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn duplicate_persistence_error_means_already_exists() {
        let err = UserAccountError::from(AccountPersistenceError::duplicate("users_username_key"));
        assert_eq!(err, UserAccountError::AlreadyExists);
    }

    #[rstest]
    fn other_persistence_errors_are_wrapped() {
        let source = AccountPersistenceError::query("boom");
        assert_eq!(
            UserAccountError::from(source.clone()),
            UserAccountError::Persistence(source)
        );
    }
}
