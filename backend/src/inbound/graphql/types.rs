//! GraphQL object and input types.
//!
//! Record Store objects use camelCase field names. Course Store objects keep
//! the store's snake_case names so clients see the same shape through the
//! graph as they would from the store itself.

use async_graphql::{InputObject, SimpleObject};

use crate::domain::ports::{
    StudentChanges, StudentDraft, UniversityChanges, UniversityDraft, UniversityRef,
};
use crate::domain::{
    Course, CourseInput, CoursePatch, Enrollment, EnrollmentInput, EnrollmentPatch, Student,
    StudentStats, StudentSummary, Summary, TextServiceHealth, Translation, University,
    UniversitySummary,
};

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "UniversitySummary")]
pub struct UniversitySummaryObject {
    pub id: i64,
    pub name: String,
    pub location: String,
}

impl From<UniversitySummary> for UniversitySummaryObject {
    fn from(value: UniversitySummary) -> Self {
        Self {
            id: value.id,
            name: value.name,
            location: value.location,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Student")]
pub struct StudentObject {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub university: UniversitySummaryObject,
}

impl From<Student> for StudentObject {
    fn from(value: Student) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            university: value.university.into(),
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "StudentSummary")]
pub struct StudentSummaryObject {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<StudentSummary> for StudentSummaryObject {
    fn from(value: StudentSummary) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "University")]
pub struct UniversityObject {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub students: Vec<StudentSummaryObject>,
}

impl From<University> for UniversityObject {
    fn from(value: University) -> Self {
        Self {
            id: value.id,
            name: value.name,
            location: value.location,
            students: value.students.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "StudentStats")]
pub struct StudentStatsObject {
    pub total_students: i64,
}

impl From<StudentStats> for StudentStatsObject {
    fn from(value: StudentStats) -> Self {
        Self {
            total_students: value.total_students,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Course", rename_fields = "snake_case")]
pub struct CourseObject {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub credits: Option<i32>,
    pub instructor: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Course> for CourseObject {
    fn from(value: Course) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            credits: value.credits,
            instructor: value.instructor,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Enrollment", rename_fields = "snake_case")]
pub struct EnrollmentObject {
    pub id: i64,
    pub student_id: i64,
    pub student_name: Option<String>,
    pub course: i64,
    pub course_name: Option<String>,
    pub grade: Option<String>,
    pub enrollment_date: Option<String>,
    pub created_at: Option<String>,
}

impl From<Enrollment> for EnrollmentObject {
    fn from(value: Enrollment) -> Self {
        Self {
            id: value.id,
            student_id: value.student_id,
            student_name: value.student_name,
            course: value.course,
            course_name: value.course_name,
            grade: value.grade,
            enrollment_date: value.enrollment_date,
            created_at: value.created_at,
        }
    }
}

/// Outcome of `translate`; failures are reported in `error`.
#[derive(Debug, Clone, Default, SimpleObject)]
pub struct TranslationResult {
    pub success: bool,
    pub original_text: Option<String>,
    pub translated_text: Option<String>,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
    pub error: Option<String>,
}

impl From<Translation> for TranslationResult {
    fn from(value: Translation) -> Self {
        Self {
            success: true,
            original_text: Some(value.original_text),
            translated_text: Some(value.translated_text),
            source_lang: Some(value.source_lang),
            target_lang: Some(value.target_lang),
            error: None,
        }
    }
}

/// Outcome of `summarize`; failures are reported in `error`.
#[derive(Debug, Clone, Default, SimpleObject)]
pub struct SummarizationResult {
    pub success: bool,
    pub original_text: Option<String>,
    pub summary: Option<String>,
    pub original_length: Option<i32>,
    pub summary_length: Option<i32>,
    pub error: Option<String>,
}

impl From<Summary> for SummarizationResult {
    fn from(value: Summary) -> Self {
        Self {
            success: true,
            original_text: Some(value.original_text),
            summary: Some(value.summary),
            original_length: Some(value.original_length),
            summary_length: Some(value.summary_length),
            error: None,
        }
    }
}

/// Text-Service health as seen from the aggregator.
#[derive(Debug, Clone, Default, SimpleObject)]
pub struct HealthStatus {
    pub success: bool,
    pub status: Option<String>,
    pub service: Option<String>,
    pub version: Option<String>,
    pub error: Option<String>,
}

impl From<TextServiceHealth> for HealthStatus {
    fn from(value: TextServiceHealth) -> Self {
        Self {
            success: true,
            status: value.status,
            service: value.service,
            version: value.version,
            error: None,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct CreateStudentInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub university_id: i64,
}

impl From<CreateStudentInput> for StudentDraft {
    fn from(value: CreateStudentInput) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            university: UniversityRef {
                id: value.university_id,
            },
        }
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct UpdateStudentInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub university_id: Option<i64>,
}

impl From<UpdateStudentInput> for StudentChanges {
    fn from(value: UpdateStudentInput) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            university: value.university_id.map(|id| UniversityRef { id }),
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct CreateUniversityInput {
    pub name: String,
    pub location: String,
}

impl From<CreateUniversityInput> for UniversityDraft {
    fn from(value: CreateUniversityInput) -> Self {
        Self {
            name: value.name,
            location: value.location,
        }
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct UpdateUniversityInput {
    pub name: Option<String>,
    pub location: Option<String>,
}

impl From<UpdateUniversityInput> for UniversityChanges {
    fn from(value: UpdateUniversityInput) -> Self {
        Self {
            name: value.name,
            location: value.location,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct CreateCourseInput {
    pub name: String,
    pub description: Option<String>,
    pub credits: Option<i32>,
    pub instructor: Option<String>,
}

impl From<CreateCourseInput> for CourseInput {
    fn from(value: CreateCourseInput) -> Self {
        Self {
            name: value.name,
            description: value.description,
            credits: value.credits,
            instructor: value.instructor,
        }
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct UpdateCourseInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub credits: Option<i32>,
    pub instructor: Option<String>,
}

impl From<UpdateCourseInput> for CoursePatch {
    fn from(value: UpdateCourseInput) -> Self {
        Self {
            name: value.name,
            description: value.description,
            credits: value.credits,
            instructor: value.instructor,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct AddEnrollmentInput {
    pub student_id: i64,
    pub course_id: i64,
    pub grade: Option<String>,
}

impl From<AddEnrollmentInput> for EnrollmentInput {
    fn from(value: AddEnrollmentInput) -> Self {
        Self {
            student_id: value.student_id,
            course: value.course_id,
            grade: value.grade,
        }
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct UpdateEnrollmentInput {
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    pub grade: Option<String>,
}

impl From<UpdateEnrollmentInput> for EnrollmentPatch {
    fn from(value: UpdateEnrollmentInput) -> Self {
        Self {
            student_id: value.student_id,
            course: value.course_id,
            grade: value.grade,
        }
    }
}
