//! Driving port for registration, login and token use-cases.
//!
//! Inbound adapters authenticate through this port without importing the
//! token or hashing adapters behind it.

use async_trait::async_trait;

use crate::domain::{AuthenticatedUser, Error, LoginCredentials, Registration, User};

/// Domain use-case port for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account and issue its first token pair.
    async fn register(&self, registration: &Registration) -> Result<AuthenticatedUser, Error>;

    /// Check credentials and issue a token pair.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthenticatedUser, Error>;

    /// Exchange a valid token for a new access token.
    async fn refresh(&self, refresh_token: &str) -> Result<String, Error>;

    /// Resolve the account behind a bearer token.
    async fn profile(&self, access_token: &str) -> Result<User, Error>;
}
