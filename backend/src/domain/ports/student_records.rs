//! Driving port for student record use-cases.
//!
//! HTTP handlers call this port; tests substitute a mock instead of wiring
//! repositories.

use async_trait::async_trait;

use crate::domain::{Error, NewStudent, Student, StudentPatch, StudentStats};

/// Domain use-case port for student records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRecords: Send + Sync {
    /// Every student with its university.
    async fn list_students(&self) -> Result<Vec<Student>, Error>;

    /// One student; `not_found` when absent.
    async fn get_student(&self, id: i64) -> Result<Student, Error>;

    /// Students of one university; empty for unknown universities.
    async fn students_by_university(&self, university_id: i64) -> Result<Vec<Student>, Error>;

    /// Students whose first name, last name or email contains `query`.
    async fn search_students(&self, query: &str) -> Result<Vec<Student>, Error>;

    /// Aggregate counters.
    async fn student_stats(&self) -> Result<StudentStats, Error>;

    /// Create a student under an existing university.
    async fn create_student(&self, student: &NewStudent) -> Result<Student, Error>;

    /// Apply a partial update; absent fields keep their values.
    async fn update_student(&self, id: i64, patch: &StudentPatch) -> Result<Student, Error>;

    /// Delete a student; `not_found` when absent.
    async fn delete_student(&self, id: i64) -> Result<(), Error>;
}
