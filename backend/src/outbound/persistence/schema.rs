//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Users owning profiles. `username` is unique.
    users (id) {
        id -> Int4,
        username -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One optional profile per user (`user_id` is unique and cascades on
    /// user deletion).
    profiles (id) {
        id -> Int4,
        user_id -> Int4,
        email -> Nullable<Varchar>,
        gender -> Nullable<Varchar>,
        address -> Nullable<Varchar>,
        pincode -> Nullable<Varchar>,
        city -> Nullable<Varchar>,
        state -> Nullable<Varchar>,
        country -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(profiles -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(profiles, users);
