//! Account lifecycle service implementing [`UserAccounts`].
//!
//! Multi-entity reads fan out with `try_join!`; multi-entity writes fan out
//! inside one [`AccountTransaction`] so a user never exists without its
//! manager profile. Every operation is bounded by a single timeout.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use futures_util::try_join;
use tracing::{error, info, warn};

use crate::domain::ports::{
    AccountPersistenceError, AccountTransaction, AdminProfile, BootstrapSuperAdminRequest,
    CreateAdminRequest, CreateCustomerRequest, ForceUpdateAdminRequest, ManagerRepository,
    TokenIssuer, UpdateAdminInfoRequest, UpdateAdminPasswordRequest,
    UserAccountError, UserAccounts, UserRepository, transaction_work,
};
use crate::domain::{
    Capability, Credential, DomainError, LoginCredentials, Manager, Nickname, Password,
    PersonName, Role, SessionToken, User, UserId, Username,
};

/// Default time budget for one account operation.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Account service wiring repositories, the transaction boundary and the
/// token adapter.
#[derive(Clone)]
pub struct UserAccountService<U, M, T, I> {
    users: Arc<U>,
    managers: Arc<M>,
    transaction: Arc<T>,
    tokens: Arc<I>,
    timeout: Duration,
}

impl<U, M, T, I> UserAccountService<U, M, T, I> {
    /// Create a service using [`DEFAULT_OPERATION_TIMEOUT`].
    #[must_use]
    pub const fn new(users: Arc<U>, managers: Arc<M>, transaction: Arc<T>, tokens: Arc<I>) -> Self {
        Self {
            users,
            managers,
            transaction,
            tokens,
            timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Override the per-operation time budget.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Changes applied by both admin update flows.
struct AdminUpdate {
    user_id: UserId,
    username: Username,
    name: PersonName,
    nickname: Nickname,
    password: Option<Password>,
}

impl<U, M, T, I> UserAccountService<U, M, T, I>
where
    U: UserRepository,
    M: ManagerRepository,
    T: AccountTransaction,
    I: TokenIssuer,
{
    async fn bounded<R, F>(&self, operation: &'static str, work: F) -> Result<R, UserAccountError>
    where
        F: Future<Output = Result<R, UserAccountError>>,
    {
        match tokio::time::timeout(self.timeout, work).await {
            Ok(result) => result,
            Err(_) => {
                let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                warn!(operation, timeout_ms, "account operation timed out");
                Err(UserAccountError::TimedOut)
            }
        }
    }

    /// Persist a user and its manager profile atomically.
    async fn save_together(&self, user: User, manager: Manager) -> Result<(), UserAccountError> {
        self.transaction
            .run(transaction_work(move |scope| {
                Box::pin(async move {
                    try_join!(scope.users().save(&user), scope.managers().save(&manager))?;
                    Ok(())
                })
            }))
            .await?;
        Ok(())
    }

    async fn ensure_username_free(
        &self,
        username: &Username,
        owner: Option<UserId>,
    ) -> Result<(), UserAccountError> {
        match self.users.find_by_username(username).await? {
            Some(existing) if Some(existing.id()) != owner => Err(UserAccountError::AlreadyExists),
            _ => Ok(()),
        }
    }

    /// Load an active admin-like user and its manager profile concurrently.
    async fn load_admin(&self, user_id: &UserId) -> Result<(User, Manager), UserAccountError> {
        let (user, manager) = try_join!(
            self.users.find_by_id(user_id),
            self.managers.find_by_user_id(user_id)
        )?;
        let user = user
            .filter(|user| user.can(Capability::AdminConsole))
            .ok_or(UserAccountError::NotFound)?;
        let Some(manager) = manager else {
            warn!(user_id = %user_id, "admin account has no manager profile");
            return Err(UserAccountError::NotFound);
        };
        Ok((user, manager))
    }

    async fn apply_admin_update(&self, update: AdminUpdate) -> Result<(), UserAccountError> {
        let AdminUpdate {
            user_id,
            username,
            name,
            nickname,
            password,
        } = update;

        self.ensure_username_free(&username, Some(user_id)).await?;
        let (mut user, mut manager) = self.load_admin(&user_id).await?;

        user.rename(username.clone());
        if let Some(replacement) = password {
            user.replace_credential(Credential::derive_async(replacement).await?);
        }
        manager.update_profile(username, name, nickname);

        self.save_together(user, manager).await?;
        info!(user_id = %user_id, "admin profile updated");
        Ok(())
    }

    async fn register_manager(
        &self,
        role: Role,
        username: Username,
        password: Password,
        name: PersonName,
        nickname: Nickname,
    ) -> Result<UserId, UserAccountError> {
        self.ensure_username_free(&username, None).await?;
        let credential = Credential::derive_async(password).await?;
        let user = User::with_credential(role, username.clone(), credential);
        let id = user.id();
        let manager = Manager::new(id, name, nickname, username);
        self.save_together(user, manager).await?;
        info!(user_id = %id, role = %role, "admin account created");
        Ok(id)
    }

    async fn soft_delete_where(
        &self,
        user_id: UserId,
        role: Role,
    ) -> Result<(), UserAccountError> {
        let mut user = self
            .users
            .find_by_id(&user_id)
            .await?
            .filter(|user| !user.is_deleted() && user.role() == role)
            .ok_or(UserAccountError::NotFound)?;
        user.soft_delete(Utc::now());
        self.users.save(&user).await?;
        info!(user_id = %user_id, role = %role, "account soft-deleted");
        Ok(())
    }
}

#[async_trait]
impl<U, M, T, I> UserAccounts for UserAccountService<U, M, T, I>
where
    U: UserRepository,
    M: ManagerRepository,
    T: AccountTransaction,
    I: TokenIssuer,
{
    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<UserId, UserAccountError> {
        self.bounded("create_customer", async move {
            let CreateCustomerRequest { email, mobile, .. } = request;
            let credential = Credential::derive_async(mobile.into_initial_password()).await?;
            let user = User::with_credential(Role::Customer, email, credential);
            let id = user.id();
            self.transaction
                .run(transaction_work(move |scope| {
                    Box::pin(async move { scope.users().save(&user).await })
                }))
                .await?;
            info!(user_id = %id, "customer account created");
            Ok(id)
        })
        .await
    }

    async fn create_admin(&self, request: CreateAdminRequest) -> Result<UserId, UserAccountError> {
        self.bounded("create_admin", async move {
            let CreateAdminRequest {
                name,
                email,
                password,
                nickname,
            } = request;
            self.register_manager(Role::Admin, email, password, name, nickname)
                .await
        })
        .await
    }

    async fn sign_in(
        &self,
        credentials: LoginCredentials,
    ) -> Result<SessionToken, UserAccountError> {
        self.bounded("sign_in", async move {
            let user = self
                .users
                .find_by_username(credentials.username())
                .await?
                .filter(|user| !user.is_deleted())
                .ok_or(UserAccountError::NotFound)?;
            if !user
                .credential()
                .matches_async(credentials.password())
                .await?
            {
                return Err(UserAccountError::WrongPassword);
            }
            let token = self.tokens.issue(&user)?;
            info!(user_id = %user.id(), "user signed in");
            Ok(token)
        })
        .await
    }

    async fn update_admin_password(
        &self,
        request: UpdateAdminPasswordRequest,
    ) -> Result<(), UserAccountError> {
        self.bounded("update_admin_password", async move {
            let UpdateAdminPasswordRequest {
                user_id,
                old_password,
                new_password,
            } = request;
            let mut user = self
                .users
                .find_by_id(&user_id)
                .await?
                .filter(|user| user.can(Capability::AdminConsole))
                .ok_or(UserAccountError::NotFound)?;
            if !user.credential().matches_async(&old_password).await? {
                return Err(UserAccountError::WrongPassword);
            }
            user.replace_credential(Credential::derive_async(new_password).await?);
            self.users.save(&user).await?;
            info!(user_id = %user_id, "admin password updated");
            Ok(())
        })
        .await
    }

    async fn update_admin_info(
        &self,
        request: UpdateAdminInfoRequest,
    ) -> Result<(), UserAccountError> {
        self.bounded("update_admin_info", async move {
            let UpdateAdminInfoRequest {
                user_id,
                username,
                name,
                nickname,
            } = request;
            self.apply_admin_update(AdminUpdate {
                user_id,
                username,
                name,
                nickname,
                password: None,
            })
            .await
        })
        .await
    }

    async fn force_update_admin(
        &self,
        request: ForceUpdateAdminRequest,
    ) -> Result<(), UserAccountError> {
        self.bounded("force_update_admin", async move {
            let ForceUpdateAdminRequest {
                user_id,
                username,
                name,
                nickname,
                password,
            } = request;
            self.apply_admin_update(AdminUpdate {
                user_id,
                username,
                name,
                nickname,
                password: Some(password),
            })
            .await
        })
        .await
    }

    async fn delete_customer(&self, user_id: UserId) -> Result<(), UserAccountError> {
        self.bounded("delete_customer", self.soft_delete_where(user_id, Role::Customer))
            .await
    }

    async fn delete_admin(&self, user_id: UserId) -> Result<(), UserAccountError> {
        self.bounded("delete_admin", self.soft_delete_where(user_id, Role::Admin))
            .await
    }

    async fn active_role(&self, user_id: UserId) -> Result<Role, UserAccountError> {
        self.bounded("active_role", async move {
            self.users
                .find_by_id(&user_id)
                .await?
                .filter(|user| !user.is_deleted())
                .map(|user| user.role())
                .ok_or(UserAccountError::NotFound)
        })
        .await
    }

    async fn admin_profile(&self, user_id: UserId) -> Result<AdminProfile, UserAccountError> {
        self.bounded("admin_profile", async move {
            let (user, manager) = self.load_admin(&user_id).await?;
            Ok(AdminProfile {
                id: user.id(),
                username: user.username().clone(),
                role: user.role(),
                name: manager.name().clone(),
                nickname: manager.nickname().clone(),
            })
        })
        .await
    }

    async fn ensure_super_admin(
        &self,
        request: BootstrapSuperAdminRequest,
    ) -> Result<UserId, UserAccountError> {
        self.bounded("ensure_super_admin", async move {
            let BootstrapSuperAdminRequest {
                username,
                password,
                name,
                nickname,
            } = request;
            if let Some(existing) = self.users.find_by_username(&username).await? {
                info!(user_id = %existing.id(), "super admin already provisioned");
                return Ok(existing.id());
            }
            self.register_manager(Role::SuperAdmin, username, password, name, nickname)
                .await
        })
        .await
    }
}

impl From<UserAccountError> for DomainError {
    fn from(value: UserAccountError) -> Self {
        match value {
            UserAccountError::NotFound => DomainError::not_found("account not found"),
            UserAccountError::AlreadyExists => DomainError::conflict("account already exists"),
            UserAccountError::WrongPassword => DomainError::unauthorized("wrong password"),
            UserAccountError::Persistence(AccountPersistenceError::Connection { message }) => {
                error!(error = %message, "account repository unavailable");
                DomainError::service_unavailable(format!("account repository unavailable: {message}"))
            }
            other => {
                error!(error = %other, "account operation failed");
                DomainError::internal(other.to_string())
            }
        }
    }
}
