//! Tests for the user entity and its value types.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};

#[fixture]
fn admin() -> User {
    let username = Username::new("a@b.com").expect("valid username");
    let password = Password::new("Pw1!").expect("valid password");
    User::create(Role::Admin, username, &password).expect("hash password")
}

#[rstest]
#[case("", AccountValidationError::EmptyUsername)]
#[case("   ", AccountValidationError::EmptyUsername)]
#[case("not-an-email", AccountValidationError::InvalidEmail)]
#[case("two@@b.com", AccountValidationError::InvalidEmail)]
#[case("spaced out@b.com", AccountValidationError::InvalidEmail)]
fn username_rejects_invalid_input(#[case] raw: &str, #[case] expected: AccountValidationError) {
    assert_eq!(Username::new(raw).expect_err("invalid username"), expected);
}

#[rstest]
fn username_rejects_overlong_input() {
    let raw = format!("{}@b.com", "a".repeat(USERNAME_MAX));
    assert_eq!(
        Username::new(raw).expect_err("too long"),
        AccountValidationError::UsernameTooLong { max: USERNAME_MAX }
    );
}

#[rstest]
fn username_trims_whitespace() {
    let username = Username::new("  kim@example.com ").expect("valid username");
    assert_eq!(username.as_ref(), "kim@example.com");
}

#[rstest]
#[case("01012345678", true)]
#[case("0101234567", true)]
#[case("010-1234-5678", false)]
#[case("02012345678", false)]
#[case("010123456789", false)]
fn mobile_format(#[case] raw: &str, #[case] valid: bool) {
    assert_eq!(Mobile::new(raw).is_ok(), valid);
}

#[rstest]
fn mobile_becomes_initial_password() {
    let mobile = Mobile::new("01012345678").expect("valid mobile");
    let password = mobile.into_initial_password();
    assert_eq!(password.expose(), "01012345678");
}

#[rstest]
#[case(Role::Customer, false, false)]
#[case(Role::Admin, true, false)]
#[case(Role::SuperAdmin, true, true)]
fn role_grants(#[case] role: Role, #[case] console: bool, #[case] manage_admins: bool) {
    assert_eq!(role.grants(Capability::AdminConsole), console);
    assert_eq!(role.grants(Capability::ManageAdmins), manage_admins);
}

#[rstest]
#[case(Role::Customer)]
#[case(Role::Admin)]
#[case(Role::SuperAdmin)]
fn role_string_form_parses_back(#[case] role: Role) {
    assert_eq!(role.as_str().parse::<Role>(), Ok(role));
}

#[rstest]
fn unknown_role_is_rejected() {
    assert_eq!(
        "owner".parse::<Role>(),
        Err(UnknownRoleError("owner".to_owned()))
    );
}

#[rstest]
fn update_password_swaps_accepted_secret(mut admin: User) {
    let old = Password::new("Pw1!").expect("valid password");
    let new = Password::new("N3w!").expect("valid password");

    admin.update_password(&new).expect("hash password");

    assert!(admin.compare_password(&new));
    assert!(!admin.compare_password(&old));
}

#[rstest]
fn soft_delete_is_terminal_and_keeps_first_timestamp(mut admin: User) {
    let first = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid date");
    let second = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().expect("valid date");

    admin.soft_delete(first);
    admin.soft_delete(second);

    assert!(admin.is_deleted());
    assert_eq!(admin.deleted_at(), Some(first));
}

#[rstest]
fn deleted_admin_loses_console_capability(mut admin: User) {
    assert!(admin.can(Capability::AdminConsole));
    admin.soft_delete(Utc::now());
    assert!(!admin.can(Capability::AdminConsole));
}

#[rstest]
fn from_record_preserves_fields(admin: User) {
    let record = UserRecord {
        id: admin.id(),
        username: admin.username().clone(),
        credential: admin.credential().clone(),
        role: admin.role(),
        deleted_at: None,
    };
    assert_eq!(User::from_record(record), admin);
}
