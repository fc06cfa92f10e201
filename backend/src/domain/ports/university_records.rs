//! Driving port for university record use-cases.

use async_trait::async_trait;

use crate::domain::{Error, NewUniversity, University, UniversityPatch};

/// Domain use-case port for university records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UniversityRecords: Send + Sync {
    /// Every university with its students.
    async fn list_universities(&self) -> Result<Vec<University>, Error>;

    /// One university; `not_found` when absent.
    async fn get_university(&self, id: i64) -> Result<University, Error>;

    /// Universities whose name contains `name`, ignoring case.
    async fn search_universities(&self, name: &str) -> Result<Vec<University>, Error>;

    /// Create a university with no students.
    async fn create_university(&self, university: &NewUniversity) -> Result<University, Error>;

    /// Apply a partial update; absent fields keep their values.
    async fn update_university(
        &self,
        id: i64,
        patch: &UniversityPatch,
    ) -> Result<University, Error>;

    /// Delete a university and, before it, all of its students.
    async fn delete_university(&self, id: i64) -> Result<(), Error>;
}
