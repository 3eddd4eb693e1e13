//! Account queries shared by the pooled and transaction-scoped repositories.
//!
//! Every function takes a bare connection so the same statements run either
//! on a pooled checkout or inside an open transaction.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::AccountPersistenceError;
use crate::domain::{
    Credential, Manager, Nickname, PersonName, Role, User, UserId, UserRecord, Username,
};

use super::diesel_error_mapping::map_diesel_error;
use super::models::{
    ManagerRow, ManagerUpdate, NewManagerRow, NewUserRow, UserRow, UserUpdate,
};
use super::schema::{managers, users};

fn corrupt(column: &str, err: impl std::fmt::Display) -> AccountPersistenceError {
    AccountPersistenceError::query(format!("invalid {column} in database: {err}"))
}

/// Convert a row into a domain user, rejecting values that fail validation.
pub(super) fn row_to_user(row: UserRow) -> Result<User, AccountPersistenceError> {
    let UserRow {
        id,
        username,
        password_hash,
        role,
        deleted_at,
    } = row;

    Ok(User::from_record(UserRecord {
        id: UserId::from_uuid(id),
        username: Username::new(username).map_err(|err| corrupt("username", err))?,
        credential: Credential::from_hash(password_hash)
            .map_err(|err| corrupt("password_hash", err))?,
        role: role.parse::<Role>().map_err(|err| corrupt("role", err))?,
        deleted_at,
    }))
}

/// Convert a row into a domain manager profile.
pub(super) fn row_to_manager(row: ManagerRow) -> Result<Manager, AccountPersistenceError> {
    let ManagerRow {
        user_id,
        name,
        nickname,
        username,
    } = row;

    Ok(Manager::new(
        UserId::from_uuid(user_id),
        PersonName::new(name).map_err(|err| corrupt("name", err))?,
        Nickname::new(nickname).map_err(|err| corrupt("nickname", err))?,
        Username::new(username).map_err(|err| corrupt("username", err))?,
    ))
}

pub(super) async fn find_user_by_id(
    conn: &mut AsyncPgConnection,
    id: &UserId,
) -> Result<Option<User>, AccountPersistenceError> {
    let row = users::table
        .filter(users::id.eq(id.as_uuid()))
        .select(UserRow::as_select())
        .first::<UserRow>(conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

    row.map(row_to_user).transpose()
}

pub(super) async fn find_user_by_username(
    conn: &mut AsyncPgConnection,
    username: &Username,
) -> Result<Option<User>, AccountPersistenceError> {
    let row = users::table
        .filter(users::username.eq(username.as_ref()))
        .select(UserRow::as_select())
        .first::<UserRow>(conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

    row.map(row_to_user).transpose()
}

pub(super) async fn upsert_user(
    conn: &mut AsyncPgConnection,
    user: &User,
) -> Result<(), AccountPersistenceError> {
    let new_row = NewUserRow {
        id: *user.id().as_uuid(),
        username: user.username().as_ref(),
        password_hash: user.credential().as_hash(),
        role: user.role().as_str(),
        deleted_at: user.deleted_at(),
    };
    let update_row = UserUpdate {
        username: new_row.username,
        password_hash: new_row.password_hash,
        role: new_row.role,
        deleted_at: new_row.deleted_at,
    };

    diesel::insert_into(users::table)
        .values(&new_row)
        .on_conflict(users::id)
        .do_update()
        .set(&update_row)
        .execute(conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
}

pub(super) async fn find_manager(
    conn: &mut AsyncPgConnection,
    user_id: &UserId,
) -> Result<Option<Manager>, AccountPersistenceError> {
    let row = managers::table
        .filter(managers::user_id.eq(user_id.as_uuid()))
        .select(ManagerRow::as_select())
        .first::<ManagerRow>(conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

    row.map(row_to_manager).transpose()
}

pub(super) async fn upsert_manager(
    conn: &mut AsyncPgConnection,
    manager: &Manager,
) -> Result<(), AccountPersistenceError> {
    let new_row = NewManagerRow {
        user_id: *manager.user_id().as_uuid(),
        name: manager.name().as_ref(),
        nickname: manager.nickname().as_ref(),
        username: manager.username().as_ref(),
    };
    let update_row = ManagerUpdate {
        name: new_row.name,
        nickname: new_row.nickname,
        username: new_row.username,
    };

    diesel::insert_into(managers::table)
        .values(&new_row)
        .on_conflict(managers::user_id)
        .do_update()
        .set(&update_row)
        .execute(conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
}
