//! PostgreSQL-backed `StudentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::NewStudent;
use crate::domain::ports::{StudentRecord, StudentRepository, StudentRepositoryError};

use super::error_mapping::{contains_pattern, map_diesel_error, map_pool_error, unique_violation};
use super::models::{StudentRow, StudentValues};
use super::pool::{DbPool, PoolError};
use super::schema::students;

/// Diesel-backed implementation of the `StudentRepository` port.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> StudentRepositoryError {
    map_pool_error(error, StudentRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> StudentRepositoryError {
    map_diesel_error(
        error,
        StudentRepositoryError::query,
        StudentRepositoryError::connection,
    )
}

/// Like [`diesel_error`], but reports email clashes as duplicates.
fn write_error(error: diesel::result::Error, email: &str) -> StudentRepositoryError {
    if unique_violation(&error).is_some() {
        return StudentRepositoryError::duplicate_email(email);
    }
    diesel_error(error)
}

fn values(student: &NewStudent) -> StudentValues<'_> {
    StudentValues {
        first_name: student.first_name(),
        last_name: student.last_name(),
        email: student.email(),
        university_id: student.university_id(),
    }
}

fn records(rows: Vec<StudentRow>) -> Vec<StudentRecord> {
    rows.into_iter().map(StudentRecord::from).collect()
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn list(&self) -> Result<Vec<StudentRecord>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<StudentRow> = students::table
            .order(students::id.asc())
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(records(rows))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<StudentRecord>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<StudentRow> = students::table
            .find(id)
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(StudentRecord::from))
    }

    async fn list_by_university(
        &self,
        university_id: i64,
    ) -> Result<Vec<StudentRecord>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<StudentRow> = students::table
            .filter(students::university_id.eq(university_id))
            .order(students::id.asc())
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(records(rows))
    }

    async fn search(&self, fragment: &str) -> Result<Vec<StudentRecord>, StudentRepositoryError> {
        let pattern = contains_pattern(fragment);
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<StudentRow> = students::table
            .filter(
                students::first_name
                    .ilike(&pattern)
                    .or(students::last_name.ilike(&pattern))
                    .or(students::email.ilike(&pattern)),
            )
            .order(students::id.asc())
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(records(rows))
    }

    async fn count(&self) -> Result<i64, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        students::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)
    }

    async fn insert(&self, student: &NewStudent) -> Result<StudentRecord, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: StudentRow = diesel::insert_into(students::table)
            .values(&values(student))
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| write_error(err, student.email()))?;
        Ok(row.into())
    }

    async fn update(
        &self,
        id: i64,
        student: &NewStudent,
    ) -> Result<Option<StudentRecord>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<StudentRow> = diesel::update(students::table.find(id))
            .set(&values(student))
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| write_error(err, student.email()))?;
        Ok(row.map(StudentRecord::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(students::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(removed > 0)
    }

    async fn delete_by_university(
        &self,
        university_id: i64,
    ) -> Result<u64, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(
            students::table.filter(students::university_id.eq(university_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;
        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn non_unique_write_failures_stay_query_errors() {
        let mapped = write_error(diesel::result::Error::NotFound, "ada@example.org");
        assert!(matches!(mapped, StudentRepositoryError::Query { .. }));
    }

    #[rstest]
    fn values_borrow_the_draft() {
        let draft =
            NewStudent::try_new("Emma", "Wilson", "emma.wilson@philosophe.edu", 4).expect("draft");
        let row = values(&draft);
        assert_eq!(row.email, "emma.wilson@philosophe.edu");
        assert_eq!(row.university_id, 4);
    }
}
