//! Outbound port for the external Course Store.

use async_trait::async_trait;

use crate::domain::{Course, CourseInput, CoursePatch, Enrollment, EnrollmentInput, EnrollmentPatch};

use super::{DeleteOutcome, UpstreamError};

/// Client port for courses and enrollments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseStoreClient: Send + Sync {
    async fn list_courses(&self) -> Result<Vec<Course>, UpstreamError>;

    async fn get_course(&self, id: i64) -> Result<Course, UpstreamError>;

    async fn create_course(&self, input: &CourseInput) -> Result<Course, UpstreamError>;

    /// `PUT` the patch, then re-read the course.
    async fn update_course(&self, id: i64, patch: &CoursePatch) -> Result<Course, UpstreamError>;

    async fn delete_course(&self, id: i64) -> Result<DeleteOutcome, UpstreamError>;

    async fn list_enrollments(&self) -> Result<Vec<Enrollment>, UpstreamError>;

    async fn enrollments_by_course(&self, course_id: i64)
    -> Result<Vec<Enrollment>, UpstreamError>;

    async fn enrollments_by_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<Enrollment>, UpstreamError>;

    async fn add_enrollment(&self, input: &EnrollmentInput) -> Result<Enrollment, UpstreamError>;

    /// `PUT` the patch, then re-read the enrollment.
    async fn update_enrollment(
        &self,
        id: i64,
        patch: &EnrollmentPatch,
    ) -> Result<Enrollment, UpstreamError>;

    /// Delete the first enrollment linking the student and the course.
    async fn remove_enrollment(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<DeleteOutcome, UpstreamError>;
}
