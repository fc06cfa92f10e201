//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: process-local repositories for running without a database
//! - **auth**: JWT signing and Argon2 password hashing
//! - **http**: reqwest clients for the Record Store, Course Store and
//!   Text-Service
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod auth;
pub mod http;
pub mod memory;
pub mod persistence;
