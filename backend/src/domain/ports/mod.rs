//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod course_store_client;
mod password_hasher;
mod record_store_client;
mod student_records;
mod student_repository;
mod text_service_client;
mod token_service;
mod university_records;
mod university_repository;
mod upstream;
mod user_repository;

pub use account_service::AccountService;
#[cfg(test)]
pub use account_service::MockAccountService;
pub use course_store_client::CourseStoreClient;
#[cfg(test)]
pub use course_store_client::MockCourseStoreClient;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use record_store_client::MockRecordStoreClient;
pub use record_store_client::{
    RecordStoreClient, StudentChanges, StudentDraft, UniversityChanges, UniversityDraft,
    UniversityRef,
};
#[cfg(test)]
pub use student_records::MockStudentRecords;
pub use student_records::StudentRecords;
#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::{StudentRecord, StudentRepository, StudentRepositoryError};
#[cfg(test)]
pub use text_service_client::MockTextServiceClient;
pub use text_service_client::TextServiceClient;
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use university_records::MockUniversityRecords;
pub use university_records::UniversityRecords;
#[cfg(test)]
pub use university_repository::MockUniversityRepository;
pub use university_repository::{UniversityRepository, UniversityRepositoryError};
pub use upstream::{DeleteOutcome, UpstreamError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
