//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Universities; students reference them by id.
    universities (id) {
        id -> Int8,
        name -> Varchar,
        location -> Varchar,
    }
}

diesel::table! {
    /// Students. `email` is unique (`students_email_key`).
    students (id) {
        id -> Int8,
        first_name -> Varchar,
        last_name -> Varchar,
        email -> Varchar,
        university_id -> Int8,
    }
}

diesel::table! {
    /// Registered accounts. `username` and `email` are unique.
    users (id) {
        id -> Int8,
        username -> Varchar,
        email -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Varchar,
        first_name -> Nullable<Varchar>,
        last_name -> Nullable<Varchar>,
    }
}

diesel::joinable!(students -> universities (university_id));

diesel::allow_tables_to_appear_in_same_query!(students, universities, users);
