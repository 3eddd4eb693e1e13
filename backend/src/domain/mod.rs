//! Domain primitives, aggregates, ports and the account use cases.
//!
//! Purpose: define strongly typed account entities used by the API and
//! persistence layers. Value types validate on construction; entities keep
//! their invariants behind methods.
//!
//! Public surface:
//! - DomainError / ErrorCode: transport-agnostic error payload.
//! - User / Manager: account entity and its admin profile.
//! - UserAccountService: implementation of the `UserAccounts` driving port.

pub mod account_validation;
pub mod auth;
pub mod credential;
pub mod error;
pub mod manager;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_account_service;

pub use self::account_validation::AccountValidationError;
pub use self::auth::{LoginCredentials, SessionClaims, SessionToken};
pub use self::credential::{Credential, CredentialError, PASSWORD_MAX, Password};
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode, TRACE_ID_HEADER};
pub use self::manager::{Manager, NAME_MAX, NAME_MIN, NICKNAME_MAX, Nickname, PersonName};
pub use self::trace_id::TraceId;
pub use self::user::{
    Capability, Mobile, Role, USERNAME_MAX, UnknownRoleError, User, UserId, UserRecord, Username,
};
pub use self::user_account_service::{DEFAULT_OPERATION_TIMEOUT, UserAccountService};
