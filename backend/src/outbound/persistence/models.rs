//! Internal Diesel row structs for the account tables.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{managers, users};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insertable `users` row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Full overwrite of a `users` row on upsert.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserUpdate<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Row read from `managers`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = managers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ManagerRow {
    pub user_id: Uuid,
    pub name: String,
    pub nickname: String,
    pub username: String,
}

/// Insertable `managers` row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = managers)]
pub(crate) struct NewManagerRow<'a> {
    pub user_id: Uuid,
    pub name: &'a str,
    pub nickname: &'a str,
    pub username: &'a str,
}

/// Full overwrite of a `managers` row on upsert.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = managers)]
pub(crate) struct ManagerUpdate<'a> {
    pub name: &'a str,
    pub nickname: &'a str,
    pub username: &'a str,
}
