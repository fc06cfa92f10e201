//! Authentication primitives: credentials, registrations and issued tokens.
//!
//! Inbound payload parsing stays outside the domain; handlers build these
//! types through validating constructors before talking to a service.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::User;
use super::validation::{self, FieldValidationError};

/// Minimum accepted password length at registration.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use campus::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("ada", "secret").unwrap();
/// assert_eq!(creds.username(), "ada");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration request.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `email` has the `local@domain` shape.
/// - `password` has at least [`PASSWORD_MIN_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: String,
    email: String,
    password: Zeroizing<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}

/// Raw registration fields prior to validation.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationFields<'a> {
    /// Requested login name.
    pub username: &'a str,
    /// Contact email.
    pub email: &'a str,
    /// Plain-text password.
    pub password: &'a str,
    /// Optional given name.
    pub first_name: Option<&'a str>,
    /// Optional family name.
    pub last_name: Option<&'a str>,
}

impl Registration {
    /// Validate raw registration fields.
    pub fn try_new(fields: RegistrationFields<'_>) -> Result<Self, FieldValidationError> {
        let username = validation::non_blank(fields.username, "username")?;
        let email = validation::email(fields.email, "email")?;
        if fields.password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(FieldValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LENGTH,
            });
        }
        Ok(Self {
            username,
            email,
            password: Zeroizing::new(fields.password.to_owned()),
            first_name: trimmed_optional(fields.first_name),
            last_name: trimmed_optional(fields.last_name),
        })
    }

    /// Requested login name.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Contact email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Plain-text password, zeroised on drop.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Optional given name.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// Optional family name.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }
}

fn trimmed_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_owned)
}

/// Access and refresh tokens issued together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Short-lived bearer token.
    pub access_token: String,
    /// Longer-lived token exchanged for new access tokens.
    pub refresh_token: String,
}

/// Token lifetimes; the two kinds differ in nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Bearer token for API calls.
    Access,
    /// Token exchanged at the refresh endpoint.
    Refresh,
}

/// Outcome of a successful registration or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The authenticated account.
    pub user: User,
    /// Freshly issued tokens.
    pub tokens: TokenPair,
}
