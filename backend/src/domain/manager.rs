//! Manager profile attached one-to-one to admin-role users.

use super::{AccountValidationError, UserId, Username};

/// Minimum allowed length for a person name.
pub const NAME_MIN: usize = 2;
/// Maximum allowed length for a person name.
pub const NAME_MAX: usize = 60;
/// Maximum allowed length for a nickname.
pub const NICKNAME_MAX: usize = 60;

/// Real name of a customer or manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Validate a name; surrounding whitespace is trimmed.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyName);
        }
        let length = trimmed.chars().count();
        if length < NAME_MIN {
            return Err(AccountValidationError::NameTooShort { min: NAME_MIN });
        }
        if length > NAME_MAX {
            return Err(AccountValidationError::NameTooLong { max: NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Display nickname of a manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nickname(String);

impl Nickname {
    /// Validate a nickname; surrounding whitespace is trimmed.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyNickname);
        }
        if trimmed.chars().count() > NICKNAME_MAX {
            return Err(AccountValidationError::NicknameTooLong { max: NICKNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Nickname {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Profile of an admin-role user.
///
/// ## Invariants
/// - exists iff the user with `user_id` has role Admin or SuperAdmin;
/// - `username` mirrors the owning user's username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manager {
    user_id: UserId,
    name: PersonName,
    nickname: Nickname,
    username: Username,
}

impl Manager {
    /// Build a manager profile for `user_id`.
    #[must_use]
    pub const fn new(user_id: UserId, name: PersonName, nickname: Nickname, username: Username) -> Self {
        Self {
            user_id,
            name,
            nickname,
            username,
        }
    }

    /// Owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Real name.
    #[must_use]
    pub const fn name(&self) -> &PersonName {
        &self.name
    }

    /// Display nickname.
    #[must_use]
    pub const fn nickname(&self) -> &Nickname {
        &self.nickname
    }

    /// Mirror of the owning user's username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Replace the profile fields in one step.
    pub fn update_profile(&mut self, username: Username, name: PersonName, nickname: Nickname) {
        self.username = username;
        self.name = name;
        self.nickname = nickname;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", AccountValidationError::EmptyName)]
    #[case("K", AccountValidationError::NameTooShort { min: NAME_MIN })]
    #[case(&"k".repeat(NAME_MAX + 1), AccountValidationError::NameTooLong { max: NAME_MAX })]
    fn person_name_bounds(#[case] raw: &str, #[case] expected: AccountValidationError) {
        assert_eq!(PersonName::new(raw).expect_err("invalid name"), expected);
    }

    #[rstest]
    #[case("   ", AccountValidationError::EmptyNickname)]
    #[case(&"k".repeat(NICKNAME_MAX + 1), AccountValidationError::NicknameTooLong { max: NICKNAME_MAX })]
    fn nickname_bounds(#[case] raw: &str, #[case] expected: AccountValidationError) {
        assert_eq!(Nickname::new(raw).expect_err("invalid nickname"), expected);
    }

    #[rstest]
    fn single_character_nickname_is_allowed() {
        assert_eq!(Nickname::new(" K ").expect("valid").as_ref(), "K");
    }

    #[rstest]
    fn update_profile_replaces_all_fields() {
        let user_id = UserId::random();
        let mut manager = Manager::new(
            user_id,
            PersonName::new("Kim").expect("name"),
            Nickname::new("K").expect("nickname"),
            Username::new("a@b.com").expect("username"),
        );

        manager.update_profile(
            Username::new("c@d.com").expect("username"),
            PersonName::new("Lee").expect("name"),
            Nickname::new("L").expect("nickname"),
        );

        assert_eq!(manager.user_id(), user_id);
        assert_eq!(manager.username().as_ref(), "c@d.com");
        assert_eq!(manager.name().as_ref(), "Lee");
        assert_eq!(manager.nickname().as_ref(), "L");
    }
}
