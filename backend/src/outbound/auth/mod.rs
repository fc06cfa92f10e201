//! Credential adapters: signed tokens and password hashes.

mod argon2_hasher;
mod jwt;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt::{JwtConfig, JwtTokenService};
