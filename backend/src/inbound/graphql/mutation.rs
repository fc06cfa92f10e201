//! Mutation root.
//!
//! Deletes answer with a boolean: `true` only when something was removed.
//! `translate` and `summarize` report failures inside their result objects.

use async_graphql::{ErrorExtensions, Object, Result};

use crate::domain::ports::{StudentDraft, UpstreamError};
use crate::domain::{SummaryRequest, TranslationRequest};

use super::Upstreams;
use super::error::{Kind, deleted, lookup_error};
use super::types::{
    AddEnrollmentInput, CourseObject, CreateCourseInput, CreateStudentInput,
    CreateUniversityInput, EnrollmentObject, StudentObject, SummarizationResult,
    TranslationResult, UniversityObject, UpdateCourseInput, UpdateEnrollmentInput,
    UpdateStudentInput, UpdateUniversityInput,
};

fn failure_message(err: &UpstreamError) -> String {
    match err {
        UpstreamError::Rejected { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

/// Mutations forwarded to the Record Store and Course Store.
pub struct MutationRoot {
    upstreams: Upstreams,
}

impl MutationRoot {
    pub(crate) const fn new(upstreams: Upstreams) -> Self {
        Self { upstreams }
    }
}

#[Object]
impl MutationRoot {
    async fn create_student(&self, input: CreateStudentInput) -> Result<StudentObject> {
        let draft = StudentDraft::from(input);
        self.upstreams
            .records
            .create_student(&draft)
            .await
            .map(StudentObject::from)
            // The only missing reference on create is the university.
            .map_err(|err| lookup_error(Kind::University, draft.university.id, &err))
    }

    async fn update_student(&self, id: i64, input: UpdateStudentInput) -> Result<StudentObject> {
        self.upstreams
            .records
            .update_student(id, &input.into())
            .await
            .map(StudentObject::from)
            .map_err(|err| lookup_error(Kind::Student, id, &err))
    }

    async fn delete_student(&self, id: i64) -> bool {
        deleted(
            "deleteStudent",
            self.upstreams.records.delete_student(id).await,
        )
    }

    async fn create_university(&self, input: CreateUniversityInput) -> Result<UniversityObject> {
        self.upstreams
            .records
            .create_university(&input.into())
            .await
            .map(UniversityObject::from)
            .map_err(|err| err.extend())
    }

    async fn update_university(
        &self,
        id: i64,
        input: UpdateUniversityInput,
    ) -> Result<UniversityObject> {
        self.upstreams
            .records
            .update_university(id, &input.into())
            .await
            .map(UniversityObject::from)
            .map_err(|err| lookup_error(Kind::University, id, &err))
    }

    /// Removes the university together with its students.
    async fn delete_university(&self, id: i64) -> bool {
        deleted(
            "deleteUniversity",
            self.upstreams.records.delete_university(id).await,
        )
    }

    async fn create_course(&self, input: CreateCourseInput) -> Result<CourseObject> {
        self.upstreams
            .courses
            .create_course(&input.into())
            .await
            .map(CourseObject::from)
            .map_err(|err| err.extend())
    }

    async fn update_course(&self, id: i64, input: UpdateCourseInput) -> Result<CourseObject> {
        self.upstreams
            .courses
            .update_course(id, &input.into())
            .await
            .map(CourseObject::from)
            .map_err(|err| lookup_error(Kind::Course, id, &err))
    }

    async fn delete_course(&self, id: i64) -> bool {
        deleted(
            "deleteCourse",
            self.upstreams.courses.delete_course(id).await,
        )
    }

    async fn add_student_to_course(&self, input: AddEnrollmentInput) -> Result<EnrollmentObject> {
        self.upstreams
            .courses
            .add_enrollment(&input.into())
            .await
            .map(EnrollmentObject::from)
            .map_err(|err| err.extend())
    }

    async fn update_enrollment(
        &self,
        id: i64,
        input: UpdateEnrollmentInput,
    ) -> Result<EnrollmentObject> {
        self.upstreams
            .courses
            .update_enrollment(id, &input.into())
            .await
            .map(EnrollmentObject::from)
            .map_err(|err| lookup_error(Kind::Enrollment, id, &err))
    }

    async fn remove_student_from_course(&self, student_id: i64, course_id: i64) -> bool {
        deleted(
            "removeStudentFromCourse",
            self.upstreams
                .courses
                .remove_enrollment(student_id, course_id)
                .await,
        )
    }

    /// Languages left out fall back to the Text-Service defaults.
    async fn translate(
        &self,
        text: String,
        source_lang: Option<String>,
        target_lang: Option<String>,
    ) -> TranslationResult {
        let request = TranslationRequest {
            text,
            source_lang,
            target_lang,
        };
        match self.upstreams.text.translate(&request).await {
            Ok(translation) => translation.into(),
            Err(err) => TranslationResult {
                success: false,
                original_text: Some(request.text),
                error: Some(failure_message(&err)),
                ..TranslationResult::default()
            },
        }
    }

    async fn summarize(
        &self,
        text: String,
        max_length: Option<i32>,
        min_length: Option<i32>,
    ) -> SummarizationResult {
        let request = SummaryRequest {
            text,
            max_length,
            min_length,
        };
        match self.upstreams.text.summarize(&request).await {
            Ok(summary) => summary.into(),
            Err(err) => SummarizationResult {
                success: false,
                original_text: Some(request.text),
                error: Some(failure_message(&err)),
                ..SummarizationResult::default()
            },
        }
    }
}
