//! PostgreSQL-backed `UniversityRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UniversityRepository, UniversityRepositoryError};
use crate::domain::{NewUniversity, UniversitySummary};

use super::error_mapping::{contains_pattern, map_diesel_error, map_pool_error};
use super::models::{UniversityRow, UniversityValues};
use super::pool::{DbPool, PoolError};
use super::schema::universities;

/// Diesel-backed implementation of the `UniversityRepository` port.
#[derive(Clone)]
pub struct DieselUniversityRepository {
    pool: DbPool,
}

impl DieselUniversityRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UniversityRepositoryError {
    map_pool_error(error, UniversityRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UniversityRepositoryError {
    map_diesel_error(
        error,
        UniversityRepositoryError::query,
        UniversityRepositoryError::connection,
    )
}

fn summaries(rows: Vec<UniversityRow>) -> Vec<UniversitySummary> {
    rows.into_iter().map(UniversitySummary::from).collect()
}

#[async_trait]
impl UniversityRepository for DieselUniversityRepository {
    async fn list(&self) -> Result<Vec<UniversitySummary>, UniversityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<UniversityRow> = universities::table
            .order(universities::id.asc())
            .select(UniversityRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(summaries(rows))
    }

    async fn find_by_id(
        &self,
        id: i64,
    ) -> Result<Option<UniversitySummary>, UniversityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<UniversityRow> = universities::table
            .find(id)
            .select(UniversityRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(UniversitySummary::from))
    }

    async fn find_by_ids(
        &self,
        ids: &[i64],
    ) -> Result<Vec<UniversitySummary>, UniversityRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<UniversityRow> = universities::table
            .filter(universities::id.eq_any(ids))
            .select(UniversityRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(summaries(rows))
    }

    async fn search_by_name(
        &self,
        fragment: &str,
    ) -> Result<Vec<UniversitySummary>, UniversityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<UniversityRow> = universities::table
            .filter(universities::name.ilike(contains_pattern(fragment)))
            .order(universities::id.asc())
            .select(UniversityRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(summaries(rows))
    }

    async fn count(&self) -> Result<i64, UniversityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        universities::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)
    }

    async fn insert(
        &self,
        university: &NewUniversity,
    ) -> Result<UniversitySummary, UniversityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: UniversityRow = diesel::insert_into(universities::table)
            .values(&UniversityValues {
                name: university.name(),
                location: university.location(),
            })
            .returning(UniversityRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(row.into())
    }

    async fn update(
        &self,
        university: &UniversitySummary,
    ) -> Result<bool, UniversityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated = diesel::update(universities::table.find(university.id))
            .set(&UniversityValues {
                name: &university.name,
                location: &university.location,
            })
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, UniversityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(universities::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(removed > 0)
    }
}
