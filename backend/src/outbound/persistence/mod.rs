//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the record and account repository ports,
//! backed by PostgreSQL via `diesel-async` and `bb8` pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Joining, validation and cascading live in the services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: pool and Diesel failures map to each port's
//!   `Connection`/`Query` variants; unique violations map to duplicates.
//!
//! # Example
//!
//! ```ignore
//! use campus::outbound::persistence::{DbPool, DieselStudentRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/campus")).await?;
//! let students = DieselStudentRepository::new(pool);
//! ```

mod diesel_student_repository;
mod diesel_university_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_student_repository::DieselStudentRepository;
pub use diesel_university_repository::DieselUniversityRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
