//! Validation failures raised by account value-type constructors.
//!
//! Inbound adapters translate these into `invalid_request` responses carrying
//! the offending field and a stable code.

/// Validation errors returned by account value-type constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountValidationError {
    /// User id was not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidUserId,
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username exceeded the storage limit.
    #[error("username must be at most {max} characters")]
    UsernameTooLong {
        /// Upper bound in characters.
        max: usize,
    },
    /// Username was not shaped like an e-mail address.
    #[error("username must be a valid e-mail address")]
    InvalidEmail,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Password exceeded the accepted length.
    #[error("password must be at most {max} characters")]
    PasswordTooLong {
        /// Upper bound in characters.
        max: usize,
    },
    /// Mobile number did not match `01XXXXXXXX(X)`.
    #[error("mobile number must look like 01012345678")]
    InvalidMobile,
    /// Name was missing or blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// Name was shorter than allowed.
    #[error("name must be at least {min} characters")]
    NameTooShort {
        /// Lower bound in characters.
        min: usize,
    },
    /// Name was longer than allowed.
    #[error("name must be at most {max} characters")]
    NameTooLong {
        /// Upper bound in characters.
        max: usize,
    },
    /// Nickname was missing or blank once trimmed.
    #[error("nickname must not be empty")]
    EmptyNickname,
    /// Nickname was longer than allowed.
    #[error("nickname must be at most {max} characters")]
    NicknameTooLong {
        /// Upper bound in characters.
        max: usize,
    },
}

impl AccountValidationError {
    /// Request field the failure refers to, using the wire (camelCase) name.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidUserId => "id",
            Self::EmptyUsername | Self::UsernameTooLong { .. } | Self::InvalidEmail => "username",
            Self::EmptyPassword | Self::PasswordTooLong { .. } => "password",
            Self::InvalidMobile => "mobile",
            Self::EmptyName | Self::NameTooShort { .. } | Self::NameTooLong { .. } => "name",
            Self::EmptyNickname | Self::NicknameTooLong { .. } => "nickname",
        }
    }

    /// Stable machine-readable code for clients.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidUserId => "invalid_id",
            Self::EmptyUsername | Self::EmptyPassword | Self::EmptyName | Self::EmptyNickname => {
                "empty"
            }
            Self::UsernameTooLong { .. }
            | Self::PasswordTooLong { .. }
            | Self::NameTooLong { .. }
            | Self::NicknameTooLong { .. } => "too_long",
            Self::NameTooShort { .. } => "too_short",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidMobile => "invalid_mobile",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AccountValidationError::InvalidEmail, "username", "invalid_email")]
    #[case(AccountValidationError::PasswordTooLong { max: 128 }, "password", "too_long")]
    #[case(AccountValidationError::InvalidMobile, "mobile", "invalid_mobile")]
    #[case(AccountValidationError::NameTooShort { min: 2 }, "name", "too_short")]
    #[case(AccountValidationError::EmptyNickname, "nickname", "empty")]
    fn maps_field_and_code(
        #[case] error: AccountValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        assert_eq!(error.field(), field);
        assert_eq!(error.code(), code);
    }
}
