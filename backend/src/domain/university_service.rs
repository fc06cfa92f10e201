//! University record services.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{StudentRepository, UniversityRecords, UniversityRepository};
use crate::domain::student_service::{map_student_error, map_university_error, university_not_found};
use crate::domain::{
    Error, NewUniversity, StudentSummary, University, UniversityPatch, UniversitySummary,
};

/// University service implementing the driving port.
///
/// Deleting a university removes its students first, as two separate
/// repository calls.
#[derive(Clone)]
pub struct UniversityService<U, S> {
    universities: Arc<U>,
    students: Arc<S>,
}

impl<U, S> UniversityService<U, S> {
    /// Create a new service with the given repositories.
    pub fn new(universities: Arc<U>, students: Arc<S>) -> Self {
        Self {
            universities,
            students,
        }
    }
}

impl<U, S> UniversityService<U, S>
where
    U: UniversityRepository,
    S: StudentRepository,
{
    async fn existing(&self, id: i64) -> Result<UniversitySummary, Error> {
        self.universities
            .find_by_id(id)
            .await
            .map_err(map_university_error)?
            .ok_or_else(|| university_not_found(id))
    }

    async fn with_students(&self, summary: UniversitySummary) -> Result<University, Error> {
        let students = self
            .students
            .list_by_university(summary.id)
            .await
            .map_err(map_student_error)?
            .iter()
            .map(|record| record.summary())
            .collect();
        Ok(University::from_summary(summary, students))
    }

    async fn with_all_students(
        &self,
        summaries: Vec<UniversitySummary>,
    ) -> Result<Vec<University>, Error> {
        if summaries.is_empty() {
            return Ok(Vec::new());
        }
        let mut grouped: HashMap<i64, Vec<StudentSummary>> = HashMap::new();
        for record in self.students.list().await.map_err(map_student_error)? {
            grouped
                .entry(record.university_id)
                .or_default()
                .push(record.summary());
        }
        Ok(summaries
            .into_iter()
            .map(|summary| {
                let students = grouped.remove(&summary.id).unwrap_or_default();
                University::from_summary(summary, students)
            })
            .collect())
    }
}

#[async_trait]
impl<U, S> UniversityRecords for UniversityService<U, S>
where
    U: UniversityRepository,
    S: StudentRepository,
{
    async fn list_universities(&self) -> Result<Vec<University>, Error> {
        let summaries = self.universities.list().await.map_err(map_university_error)?;
        self.with_all_students(summaries).await
    }

    async fn get_university(&self, id: i64) -> Result<University, Error> {
        let summary = self.existing(id).await?;
        self.with_students(summary).await
    }

    async fn search_universities(&self, name: &str) -> Result<Vec<University>, Error> {
        let summaries = self
            .universities
            .search_by_name(name.trim())
            .await
            .map_err(map_university_error)?;
        self.with_all_students(summaries).await
    }

    async fn create_university(&self, university: &NewUniversity) -> Result<University, Error> {
        let stored = self
            .universities
            .insert(university)
            .await
            .map_err(map_university_error)?;
        debug!(university_id = stored.id, "university created");
        Ok(University::from_summary(stored, Vec::new()))
    }

    async fn update_university(
        &self,
        id: i64,
        patch: &UniversityPatch,
    ) -> Result<University, Error> {
        let updated = patch.apply(self.existing(id).await?);
        let found = self
            .universities
            .update(&updated)
            .await
            .map_err(map_university_error)?;
        if !found {
            return Err(university_not_found(id));
        }
        self.with_students(updated).await
    }

    async fn delete_university(&self, id: i64) -> Result<(), Error> {
        self.existing(id).await?;
        let removed_students = self
            .students
            .delete_by_university(id)
            .await
            .map_err(map_student_error)?;
        let deleted = self
            .universities
            .delete(id)
            .await
            .map_err(map_university_error)?;
        if !deleted {
            return Err(university_not_found(id));
        }
        info!(university_id = id, removed_students, "university deleted");
        Ok(())
    }
}
