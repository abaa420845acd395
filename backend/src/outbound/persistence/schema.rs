//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. `username` carries a unique index.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        email -> Varchar,
        password_hash -> Text,
        /// Stored role names such as `ROLE_ADMIN`; never empty.
        roles -> Array<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Categories, each owned by one user.
    categories (id) {
        id -> Uuid,
        owner_id -> Uuid,
        name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Contacts, each owned by one user.
    contacts (id) {
        id -> Uuid,
        owner_id -> Uuid,
        first_name -> Varchar,
        last_name -> Varchar,
        email -> Nullable<Varchar>,
        phone -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(categories -> users (owner_id));
diesel::joinable!(contacts -> users (owner_id));

diesel::allow_tables_to_appear_in_same_query!(users, categories, contacts);
