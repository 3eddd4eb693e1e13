//! Diesel table definitions for the account tables.
//!
//! Kept in sync with `migrations/` by hand.

diesel::table! {
    /// Login accounts of customers and staff.
    users (id) {
        id -> Uuid,
        /// Login name; e-mail shaped and unique across live and deleted rows.
        #[max_length = 255]
        username -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        /// `customer`, `admin` or `super_admin`.
        #[max_length = 32]
        role -> Varchar,
        /// Soft-delete marker; never cleared once set.
        deleted_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        /// Maintained by trigger.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Profiles of admin-role users, one per user.
    managers (user_id) {
        user_id -> Uuid,
        #[max_length = 60]
        name -> Varchar,
        #[max_length = 60]
        nickname -> Varchar,
        /// Mirror of `users.username`.
        #[max_length = 255]
        username -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(managers -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(managers, users);
