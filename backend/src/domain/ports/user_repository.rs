//! Port abstraction for user account persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, User, UserAccount};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique column already holds the value.
        Duplicate { field: String } => "user {field} already exists",
    }
}

/// Persistence port for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch an account, including its password hash, by username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserRepositoryError>;

    /// Whether any account uses the username.
    async fn username_exists(&self, username: &str) -> Result<bool, UserRepositoryError>;

    /// Whether any account uses the email address.
    async fn email_exists(&self, email: &str) -> Result<bool, UserRepositoryError>;

    /// Insert a new account and return its public view.
    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError>;
}
