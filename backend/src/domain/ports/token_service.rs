//! Port for issuing and verifying signed bearer tokens.

use crate::domain::TokenKind;

use super::define_port_error;

define_port_error! {
    /// Failures raised by token adapters.
    pub enum TokenError {
        /// Signature, structure or expiry check failed.
        Invalid { reason: String } => "token rejected: {reason}",
        /// The adapter could not sign a token.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Signs and verifies tokens whose subject is a username.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a token of the given kind for `subject`.
    fn issue(&self, subject: &str, kind: TokenKind) -> Result<String, TokenError>;

    /// Verify a token and return its subject.
    fn verify(&self, token: &str) -> Result<String, TokenError>;
}
