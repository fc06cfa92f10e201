//! Registered user accounts.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Public view of a registered user. The password hash never leaves the
/// persistence boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Generated identifier.
    #[schema(example = 1)]
    pub id: i64,
    /// Unique login name.
    #[schema(example = "ada")]
    pub username: String,
    /// Unique email address.
    #[schema(example = "ada@example.org")]
    pub email: String,
    /// Optional given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Optional family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// A user row together with the stored password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// Public user fields.
    pub user: User,
    /// PHC-formatted password hash.
    pub password_hash: String,
}

/// Row to insert for a new account; the password is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// PHC-formatted password hash.
    pub password_hash: String,
    /// Optional given name.
    pub first_name: Option<String>,
    /// Optional family name.
    pub last_name: Option<String>,
}
