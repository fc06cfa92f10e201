//! Port abstraction for university persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewUniversity, UniversitySummary};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by university repository adapters.
    pub enum UniversityRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "university repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "university repository query failed: {message}",
    }
}

/// Port for reading and writing university rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UniversityRepository: Send + Sync {
    /// Every stored university ordered by id.
    async fn list(&self) -> Result<Vec<UniversitySummary>, UniversityRepositoryError>;

    /// Fetch a university by identifier.
    async fn find_by_id(
        &self,
        id: i64,
    ) -> Result<Option<UniversitySummary>, UniversityRepositoryError>;

    /// Fetch the universities with the given identifiers; unknown ids are skipped.
    async fn find_by_ids(
        &self,
        ids: &[i64],
    ) -> Result<Vec<UniversitySummary>, UniversityRepositoryError>;

    /// Case-insensitive substring match on the name.
    async fn search_by_name(
        &self,
        fragment: &str,
    ) -> Result<Vec<UniversitySummary>, UniversityRepositoryError>;

    /// Number of stored universities.
    async fn count(&self) -> Result<i64, UniversityRepositoryError>;

    /// Insert a new university and return the stored row.
    async fn insert(
        &self,
        university: &NewUniversity,
    ) -> Result<UniversitySummary, UniversityRepositoryError>;

    /// Overwrite name and location; `false` when no row had the identifier.
    async fn update(&self, university: &UniversitySummary)
    -> Result<bool, UniversityRepositoryError>;

    /// Delete a university row; `false` when no row had the identifier.
    ///
    /// Callers remove the university's students first.
    async fn delete(&self, id: i64) -> Result<bool, UniversityRepositoryError>;
}
