//! Domain primitives, aggregates and services.
//!
//! Purpose: define the student and university records, user accounts and
//! the opaque course/text shapes owned by external services, plus the
//! services implementing the driving ports. Types document their invariants
//! and serialisation contracts in their own Rustdoc.
//!
//! Public surface:
//! - [`Error`] and [`ErrorCode`]: the error payload every adapter returns.
//! - [`Student`] and [`University`]: record store entities with their
//!   validated write inputs.
//! - [`StudentService`], [`UniversityService`] and [`AccountManager`]:
//!   driving port implementations backed by repository ports.

pub mod auth;
pub mod course;
pub mod error;
pub mod ports;
pub mod sample_data;
pub mod student;
pub mod text;
pub mod trace_id;
pub mod university;
pub mod user;

mod account_manager;
mod student_service;
mod university_service;
mod validation;

pub use self::account_manager::AccountManager;
pub use self::auth::{
    AuthenticatedUser, LoginCredentials, LoginValidationError, PASSWORD_MIN_LENGTH, Registration,
    RegistrationFields, TokenKind, TokenPair,
};
pub use self::course::{
    Course, CourseInput, CoursePatch, Enrollment, EnrollmentInput, EnrollmentPatch,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::sample_data::{SampleDataSeeder, SampleDataSeedingError, SeedOutcome};
pub use self::student::{NewStudent, Student, StudentPatch, StudentStats, StudentSummary};
pub use self::student_service::StudentService;
pub use self::text::{Summary, SummaryRequest, TextServiceHealth, Translation, TranslationRequest};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::university::{NewUniversity, University, UniversityPatch, UniversitySummary};
pub use self::university_service::UniversityService;
pub use self::user::{NewUser, User, UserAccount};
pub use self::validation::FieldValidationError;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use campus::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Student not found with id: 7"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
