//! Query root. Each field issues exactly one upstream call.

use async_graphql::{ErrorExtensions, Object, Result};

use crate::domain::ports::UpstreamError;

use super::Upstreams;
use super::error::{Kind, lookup_error};
use super::types::{
    CourseObject, EnrollmentObject, HealthStatus, StudentObject, StudentStatsObject,
    UniversityObject,
};

fn all<T, U: From<T>>(result: Result<Vec<T>, UpstreamError>) -> Result<Vec<U>> {
    result
        .map(|items| items.into_iter().map(U::from).collect())
        .map_err(|err| err.extend())
}

fn one<T, U: From<T>>(kind: Kind, id: i64, result: Result<T, UpstreamError>) -> Result<U> {
    result
        .map(U::from)
        .map_err(|err| lookup_error(kind, id, &err))
}

/// Read-only queries across the three upstream services.
pub struct QueryRoot {
    upstreams: Upstreams,
}

impl QueryRoot {
    pub(crate) const fn new(upstreams: Upstreams) -> Self {
        Self { upstreams }
    }
}

#[Object]
impl QueryRoot {
    async fn students(&self) -> Result<Vec<StudentObject>> {
        all(self.upstreams.records.list_students().await)
    }

    async fn student(&self, id: i64) -> Result<StudentObject> {
        one(
            Kind::Student,
            id,
            self.upstreams.records.get_student(id).await,
        )
    }

    /// Empty for an unknown university.
    async fn students_by_university(&self, university_id: i64) -> Result<Vec<StudentObject>> {
        all(
            self.upstreams
                .records
                .students_by_university(university_id)
                .await,
        )
    }

    /// Case-insensitive match on first name, last name or email.
    async fn search_students(&self, query: String) -> Result<Vec<StudentObject>> {
        all(self.upstreams.records.search_students(&query).await)
    }

    async fn student_stats(&self) -> Result<StudentStatsObject> {
        self.upstreams
            .records
            .student_stats()
            .await
            .map(StudentStatsObject::from)
            .map_err(|err| err.extend())
    }

    async fn universities(&self) -> Result<Vec<UniversityObject>> {
        all(self.upstreams.records.list_universities().await)
    }

    async fn university(&self, id: i64) -> Result<UniversityObject> {
        one(
            Kind::University,
            id,
            self.upstreams.records.get_university(id).await,
        )
    }

    async fn search_universities(&self, name: String) -> Result<Vec<UniversityObject>> {
        all(self.upstreams.records.search_universities(&name).await)
    }

    async fn all_courses(&self) -> Result<Vec<CourseObject>> {
        all(self.upstreams.courses.list_courses().await)
    }

    async fn course(&self, id: i64) -> Result<CourseObject> {
        one(Kind::Course, id, self.upstreams.courses.get_course(id).await)
    }

    async fn all_enrollments(&self) -> Result<Vec<EnrollmentObject>> {
        all(self.upstreams.courses.list_enrollments().await)
    }

    async fn enrollments_by_course(&self, course_id: i64) -> Result<Vec<EnrollmentObject>> {
        all(self.upstreams.courses.enrollments_by_course(course_id).await)
    }

    async fn enrollments_by_student(&self, student_id: i64) -> Result<Vec<EnrollmentObject>> {
        all(self.upstreams.courses.enrollments_by_student(student_id).await)
    }

    /// Never fails: an unreachable Text-Service reports `success: false`.
    async fn chatbot_health(&self) -> HealthStatus {
        match self.upstreams.text.health().await {
            Ok(health) => health.into(),
            Err(err) => HealthStatus {
                success: false,
                status: Some("unhealthy".to_owned()),
                error: Some(err.to_string()),
                ..HealthStatus::default()
            },
        }
    }
}
