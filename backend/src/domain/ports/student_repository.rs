//! Port abstraction for student persistence adapters and their errors.
//!
//! Adapters store students with a plain university reference; joining the
//! university into the client view happens in the service.

use async_trait::async_trait;

use crate::domain::{NewStudent, StudentSummary};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by student repository adapters.
    pub enum StudentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "student repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "student repository query failed: {message}",
        /// Another student already uses the email address.
        DuplicateEmail { email: String } => "student email {email} already exists",
    }
}

/// Stored student row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    /// Generated identifier.
    pub id: i64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique email address.
    pub email: String,
    /// Owning university.
    pub university_id: i64,
}

impl StudentRecord {
    /// Student fields without the university reference.
    #[must_use]
    pub fn summary(&self) -> StudentSummary {
        StudentSummary {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Port for reading and writing student rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Every stored student ordered by id.
    async fn list(&self) -> Result<Vec<StudentRecord>, StudentRepositoryError>;

    /// Fetch a student by identifier.
    async fn find_by_id(&self, id: i64) -> Result<Option<StudentRecord>, StudentRepositoryError>;

    /// Students belonging to one university, ordered by id.
    async fn list_by_university(
        &self,
        university_id: i64,
    ) -> Result<Vec<StudentRecord>, StudentRepositoryError>;

    /// Case-insensitive substring match on first name, last name or email.
    async fn search(
        &self,
        fragment: &str,
    ) -> Result<Vec<StudentRecord>, StudentRepositoryError>;

    /// Number of stored students.
    async fn count(&self) -> Result<i64, StudentRepositoryError>;

    /// Insert a new student and return the stored row.
    async fn insert(&self, student: &NewStudent) -> Result<StudentRecord, StudentRepositoryError>;

    /// Overwrite every mutable field of an existing student.
    ///
    /// Returns `None` when no row has the identifier.
    async fn update(
        &self,
        id: i64,
        student: &NewStudent,
    ) -> Result<Option<StudentRecord>, StudentRepositoryError>;

    /// Delete a student; `false` when no row had the identifier.
    async fn delete(&self, id: i64) -> Result<bool, StudentRepositoryError>;

    /// Delete every student of a university and return how many went.
    async fn delete_by_university(&self, university_id: i64)
    -> Result<u64, StudentRepositoryError>;
}
