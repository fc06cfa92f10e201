//! Student record services.
//!
//! Implements [`StudentRecords`] over the student and university repository
//! ports. Rows carry only a university id; this service joins the university
//! into each [`Student`] and checks the reference on every write.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    StudentRecord, StudentRecords, StudentRepository, StudentRepositoryError,
    UniversityRepository, UniversityRepositoryError,
};
use crate::domain::{
    Error, NewStudent, Student, StudentPatch, StudentStats, UniversitySummary,
};

/// Student service implementing the driving port.
#[derive(Clone)]
pub struct StudentService<S, U> {
    students: Arc<S>,
    universities: Arc<U>,
}

impl<S, U> StudentService<S, U> {
    /// Create a new service with the given repositories.
    pub fn new(students: Arc<S>, universities: Arc<U>) -> Self {
        Self {
            students,
            universities,
        }
    }
}

pub(crate) fn student_not_found(id: i64) -> Error {
    Error::not_found(format!("Student not found with id: {id}"))
}

pub(crate) fn university_not_found(id: i64) -> Error {
    Error::not_found(format!("University not found with id: {id}"))
}

pub(crate) fn map_student_error(error: StudentRepositoryError) -> Error {
    match error {
        StudentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("student repository unavailable: {message}"))
        }
        StudentRepositoryError::Query { message } => {
            Error::internal(format!("student repository error: {message}"))
        }
        StudentRepositoryError::DuplicateEmail { email } => {
            debug!(%email, "rejected duplicate student email");
            Error::conflict("Email already exists")
        }
    }
}

pub(crate) fn map_university_error(error: UniversityRepositoryError) -> Error {
    match error {
        UniversityRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("university repository unavailable: {message}"))
        }
        UniversityRepositoryError::Query { message } => {
            Error::internal(format!("university repository error: {message}"))
        }
    }
}

fn assemble(record: StudentRecord, university: UniversitySummary) -> Student {
    Student {
        id: record.id,
        first_name: record.first_name,
        last_name: record.last_name,
        email: record.email,
        university,
    }
}

impl<S, U> StudentService<S, U>
where
    S: StudentRepository,
    U: UniversityRepository,
{
    async fn university(&self, id: i64) -> Result<UniversitySummary, Error> {
        self.universities
            .find_by_id(id)
            .await
            .map_err(map_university_error)?
            .ok_or_else(|| university_not_found(id))
    }

    async fn join_one(&self, record: StudentRecord) -> Result<Student, Error> {
        let university = self.university(record.university_id).await?;
        Ok(assemble(record, university))
    }

    async fn join_all(&self, records: Vec<StudentRecord>) -> Result<Vec<Student>, Error> {
        let mut ids: Vec<i64> = records.iter().map(|record| record.university_id).collect();
        ids.sort_unstable();
        ids.dedup();
        let by_id: HashMap<i64, UniversitySummary> = self
            .universities
            .find_by_ids(&ids)
            .await
            .map_err(map_university_error)?
            .into_iter()
            .map(|university| (university.id, university))
            .collect();

        records
            .into_iter()
            .map(|record| {
                let university = by_id.get(&record.university_id).cloned().ok_or_else(|| {
                    Error::internal(format!(
                        "student {} references missing university {}",
                        record.id, record.university_id
                    ))
                })?;
                Ok(assemble(record, university))
            })
            .collect()
    }

    async fn existing(&self, id: i64) -> Result<StudentRecord, Error> {
        self.students
            .find_by_id(id)
            .await
            .map_err(map_student_error)?
            .ok_or_else(|| student_not_found(id))
    }
}

#[async_trait]
impl<S, U> StudentRecords for StudentService<S, U>
where
    S: StudentRepository,
    U: UniversityRepository,
{
    async fn list_students(&self) -> Result<Vec<Student>, Error> {
        let records = self.students.list().await.map_err(map_student_error)?;
        self.join_all(records).await
    }

    async fn get_student(&self, id: i64) -> Result<Student, Error> {
        let record = self.existing(id).await?;
        self.join_one(record).await
    }

    async fn students_by_university(&self, university_id: i64) -> Result<Vec<Student>, Error> {
        let records = self
            .students
            .list_by_university(university_id)
            .await
            .map_err(map_student_error)?;
        self.join_all(records).await
    }

    async fn search_students(&self, query: &str) -> Result<Vec<Student>, Error> {
        let records = self
            .students
            .search(query.trim())
            .await
            .map_err(map_student_error)?;
        self.join_all(records).await
    }

    async fn student_stats(&self) -> Result<StudentStats, Error> {
        let total_students = self.students.count().await.map_err(map_student_error)?;
        Ok(StudentStats { total_students })
    }

    async fn create_student(&self, student: &NewStudent) -> Result<Student, Error> {
        let university = self.university(student.university_id()).await?;
        let record = self
            .students
            .insert(student)
            .await
            .map_err(map_student_error)?;
        debug!(student_id = record.id, university_id = university.id, "student created");
        Ok(assemble(record, university))
    }

    async fn update_student(&self, id: i64, patch: &StudentPatch) -> Result<Student, Error> {
        let current = self.get_student(id).await?;
        let merged = patch.merge(&current);
        let university = if merged.university_id() == current.university.id {
            current.university
        } else {
            self.university(merged.university_id()).await?
        };
        let record = self
            .students
            .update(id, &merged)
            .await
            .map_err(map_student_error)?
            .ok_or_else(|| student_not_found(id))?;
        Ok(assemble(record, university))
    }

    async fn delete_student(&self, id: i64) -> Result<(), Error> {
        let deleted = self.students.delete(id).await.map_err(map_student_error)?;
        if deleted {
            debug!(student_id = id, "student deleted");
            Ok(())
        } else {
            Err(student_not_found(id))
        }
    }
}

#[cfg(test)]
#[path = "student_service_tests.rs"]
mod tests;
