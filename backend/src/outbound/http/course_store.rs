//! Reqwest adapter for the Course Store.
//!
//! The store uses trailing-slash collection paths and filters enrollments with
//! `course_id` / `student_id` query parameters.

use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use tracing::debug;

use crate::domain::ports::{CourseStoreClient, DeleteOutcome, UpstreamError};
use crate::domain::{Course, CourseInput, CoursePatch, Enrollment, EnrollmentInput, EnrollmentPatch};

use super::upstream::Upstream;

/// Talks to the Course Store under `base` (for example `http://localhost:9090/api`).
#[derive(Debug, Clone)]
pub struct HttpCourseStoreClient {
    upstream: Upstream,
}

impl HttpCourseStoreClient {
    /// Create a client rooted at `base`.
    pub fn new(client: Client, base: &Url) -> Self {
        Self {
            upstream: Upstream::new(client, base),
        }
    }

    async fn enrollments_where(
        &self,
        filter: &[(&str, String)],
    ) -> Result<Vec<Enrollment>, UpstreamError> {
        self.upstream
            .get_with_query("/enrollments/", filter, "enrollments")
            .await
    }
}

fn course(id: i64) -> String {
    format!("course {id}")
}

fn enrollment(id: i64) -> String {
    format!("enrollment {id}")
}

#[async_trait]
impl CourseStoreClient for HttpCourseStoreClient {
    async fn list_courses(&self) -> Result<Vec<Course>, UpstreamError> {
        self.upstream.get("/courses/", "courses").await
    }

    async fn get_course(&self, id: i64) -> Result<Course, UpstreamError> {
        self.upstream
            .get(&format!("/courses/{id}/"), &course(id))
            .await
    }

    async fn create_course(&self, input: &CourseInput) -> Result<Course, UpstreamError> {
        self.upstream
            .send(Method::POST, "/courses/", input, "course")
            .await
    }

    async fn update_course(&self, id: i64, patch: &CoursePatch) -> Result<Course, UpstreamError> {
        let path = format!("/courses/{id}/");
        self.upstream
            .send_discarding(Method::PUT, &path, patch, &course(id))
            .await?;
        self.upstream.get(&path, &course(id)).await
    }

    async fn delete_course(&self, id: i64) -> Result<DeleteOutcome, UpstreamError> {
        self.upstream
            .delete(&format!("/courses/{id}/"), &course(id))
            .await
    }

    async fn list_enrollments(&self) -> Result<Vec<Enrollment>, UpstreamError> {
        self.upstream.get("/enrollments/", "enrollments").await
    }

    async fn enrollments_by_course(
        &self,
        course_id: i64,
    ) -> Result<Vec<Enrollment>, UpstreamError> {
        self.enrollments_where(&[("course_id", course_id.to_string())])
            .await
    }

    async fn enrollments_by_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<Enrollment>, UpstreamError> {
        self.enrollments_where(&[("student_id", student_id.to_string())])
            .await
    }

    async fn add_enrollment(&self, input: &EnrollmentInput) -> Result<Enrollment, UpstreamError> {
        self.upstream
            .send(Method::POST, "/enrollments/", input, "enrollment")
            .await
    }

    async fn update_enrollment(
        &self,
        id: i64,
        patch: &EnrollmentPatch,
    ) -> Result<Enrollment, UpstreamError> {
        let path = format!("/enrollments/{id}/");
        self.upstream
            .send_discarding(Method::PUT, &path, patch, &enrollment(id))
            .await?;
        self.upstream.get(&path, &enrollment(id)).await
    }

    async fn remove_enrollment(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<DeleteOutcome, UpstreamError> {
        let matches = self
            .enrollments_where(&[
                ("student_id", student_id.to_string()),
                ("course_id", course_id.to_string()),
            ])
            .await?;
        let Some(first) = matches.first() else {
            debug!(student_id, course_id, "no enrollment to remove");
            return Ok(DeleteOutcome::NotFound);
        };
        self.upstream
            .delete(&format!("/enrollments/{}/", first.id), &enrollment(first.id))
            .await
    }
}
