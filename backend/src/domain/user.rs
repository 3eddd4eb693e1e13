//! User account entity and its identity value types.
//!
//! A [`User`] owns its role, credential and soft-delete state. Role checks go
//! through [`Role::grants`] so every flow agrees on what "admin-like" means.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{AccountValidationError, Credential, CredentialError, Password};

/// Stable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        Uuid::parse_str(id.as_ref().trim())
            .map(Self)
            .map_err(|_| AccountValidationError::InvalidUserId)
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID (e.g. from a database row).
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum username length accepted by storage.
pub const USERNAME_MAX: usize = 255;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Shape check only; deliverability is not our concern.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Login name of a user; always an e-mail address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`]; surrounding whitespace is trimmed.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(AccountValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !email_regex().is_match(trimmed) {
            return Err(AccountValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static MOBILE_RE: OnceLock<Regex> = OnceLock::new();

fn mobile_regex() -> &'static Regex {
    MOBILE_RE.get_or_init(|| {
        Regex::new(r"^01[0-9]{8,9}$")
            .unwrap_or_else(|error| panic!("mobile regex failed to compile: {error}"))
    })
}

/// Customer mobile number, digits only (`01012345678`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mobile(String);

impl Mobile {
    /// Validate a mobile number.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let trimmed = raw.as_ref().trim();
        if !mobile_regex().is_match(trimmed) {
            return Err(AccountValidationError::InvalidMobile);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Use the number as the customer's initial password.
    #[must_use]
    pub fn into_initial_password(self) -> Password {
        Password::from_validated(self.0)
    }
}

impl AsRef<str> for Mobile {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Account role. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// End customer of the portfolio service.
    Customer,
    /// Staff member managing customers.
    Admin,
    /// Staff member who also manages other admins.
    SuperAdmin,
}

/// Actions gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Use the admin console: own profile, password, customer management.
    AdminConsole,
    /// Create, force-update and delete admin accounts.
    ManageAdmins,
}

impl Role {
    /// Single source of truth for role permissions.
    #[must_use]
    pub const fn grants(self, capability: Capability) -> bool {
        match capability {
            Capability::AdminConsole => matches!(self, Self::Admin | Self::SuperAdmin),
            Capability::ManageAdmins => matches!(self, Self::SuperAdmin),
        }
    }

    /// Storage and token representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored role string is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRoleError(pub String);

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            other => Err(UnknownRoleError(other.to_owned())),
        }
    }
}

/// Persisted fields used to rehydrate a [`User`].
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Stable identifier.
    pub id: UserId,
    /// Login name.
    pub username: Username,
    /// Stored password hash.
    pub credential: Credential,
    /// Account role.
    pub role: Role,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Application user.
///
/// ## Invariants
/// - `role` never changes after creation;
/// - once `deleted_at` is set it is never cleared (`Active → SoftDeleted`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    credential: Credential,
    role: Role,
    deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new active user, hashing `password` on the calling thread.
    pub fn create(
        role: Role,
        username: Username,
        password: &Password,
    ) -> Result<Self, CredentialError> {
        Ok(Self::with_credential(
            role,
            username,
            Credential::derive(password)?,
        ))
    }

    /// Create a new active user from an already derived credential.
    #[must_use]
    pub fn with_credential(role: Role, username: Username, credential: Credential) -> Self {
        Self {
            id: UserId::random(),
            username,
            credential,
            role,
            deleted_at: None,
        }
    }

    /// Rehydrate a user loaded from storage.
    #[must_use]
    pub fn from_record(record: UserRecord) -> Self {
        let UserRecord {
            id,
            username,
            credential,
            role,
            deleted_at,
        } = record;
        Self {
            id,
            username,
            credential,
            role,
            deleted_at,
        }
    }

    /// Stable user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Login name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Account role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Stored credential for persistence adapters.
    #[must_use]
    pub const fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Soft-delete timestamp, if any.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Whether the account has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Active account whose role grants `capability`.
    #[must_use]
    pub const fn can(&self, capability: Capability) -> bool {
        !self.is_deleted() && self.role.grants(capability)
    }

    /// Compare a candidate password with the stored credential.
    #[must_use]
    pub fn compare_password(&self, candidate: &Password) -> bool {
        self.credential.matches(candidate)
    }

    /// Replace the credential, hashing `password` on the calling thread.
    pub fn update_password(&mut self, password: &Password) -> Result<(), CredentialError> {
        self.replace_credential(Credential::derive(password)?);
        Ok(())
    }

    /// Replace the credential with one derived elsewhere.
    pub fn replace_credential(&mut self, credential: Credential) {
        self.credential = credential;
    }

    /// Change the login name.
    pub fn rename(&mut self, username: Username) {
        self.username = username;
    }

    /// Mark the account deleted. A second call keeps the first timestamp.
    pub fn soft_delete(&mut self, at: DateTime<Utc>) {
        if self.deleted_at.is_none() {
            self.deleted_at = Some(at);
        }
    }
}

#[cfg(test)]
mod tests;
