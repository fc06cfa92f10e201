//! Resolver tests over mocked upstream clients.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{
    DeleteOutcome, MockCourseStoreClient, MockRecordStoreClient, MockTextServiceClient,
    UpstreamError,
};
use crate::domain::{Course, Enrollment, Student, TextServiceHealth, UniversitySummary};

struct Mocks {
    records: MockRecordStoreClient,
    courses: MockCourseStoreClient,
    text: MockTextServiceClient,
}

impl Mocks {
    fn new() -> Self {
        Self {
            records: MockRecordStoreClient::new(),
            courses: MockCourseStoreClient::new(),
            text: MockTextServiceClient::new(),
        }
    }

    fn schema(self) -> CampusSchema {
        build_schema(Upstreams::new(
            Arc::new(self.records),
            Arc::new(self.courses),
            Arc::new(self.text),
        ))
    }

    async fn run(self, query: &str) -> Value {
        let response = self.schema().execute(query).await;
        serde_json::to_value(&response).expect("response serialises")
    }
}

fn emily() -> Student {
    Student {
        id: 4,
        first_name: "Emily".to_owned(),
        last_name: "Martinez".to_owned(),
        email: "emily.martinez@sorbonne.edu".to_owned(),
        university: UniversitySummary {
            id: 2,
            name: "Sorbonne University".to_owned(),
            location: "Paris, France".to_owned(),
        },
    }
}

fn error_code(body: &Value) -> &Value {
    &body["errors"][0]["extensions"]["code"]
}

#[actix_web::test]
async fn search_returns_matching_students() {
    let mut mocks = Mocks::new();
    mocks
        .records
        .expect_search_students()
        .withf(|query| query == "mar")
        .times(1)
        .return_once(|_| Ok(vec![emily()]));

    let body = mocks
        .run(r#"{ searchStudents(query: "mar") { firstName lastName university { name } } }"#)
        .await;

    assert_eq!(
        body["data"]["searchStudents"],
        json!([{
            "firstName": "Emily",
            "lastName": "Martinez",
            "university": { "name": "Sorbonne University" }
        }])
    );
}

#[actix_web::test]
async fn unknown_student_is_reported_with_kind_and_id() {
    let mut mocks = Mocks::new();
    mocks
        .records
        .expect_get_student()
        .return_once(|_| Err(UpstreamError::not_found("student 99", None)));

    let body = mocks.run("{ student(id: 99) { id } }").await;

    assert_eq!(
        body["errors"][0]["message"],
        "Student not found with id: 99"
    );
    assert_eq!(error_code(&body), "NOT_FOUND");
}

#[actix_web::test]
async fn create_student_forwards_the_typed_input() {
    let mut mocks = Mocks::new();
    mocks
        .records
        .expect_create_student()
        .withf(|draft| {
            draft.first_name == "Emily"
                && draft.email == "emily.martinez@sorbonne.edu"
                && draft.university.id == 2
        })
        .times(1)
        .return_once(|_| Ok(emily()));

    let body = mocks
        .run(
            r#"mutation {
                createStudent(input: {
                    firstName: "Emily",
                    lastName: "Martinez",
                    email: "emily.martinez@sorbonne.edu",
                    universityId: 2
                }) { id university { id } }
            }"#,
        )
        .await;

    assert_eq!(body["data"]["createStudent"]["id"], 4);
    assert_eq!(body["data"]["createStudent"]["university"]["id"], 2);
}

#[actix_web::test]
async fn duplicate_email_surfaces_the_upstream_message() {
    let mut mocks = Mocks::new();
    mocks
        .records
        .expect_create_student()
        .return_once(|_| Err(UpstreamError::rejected(409_u16, "Email already exists")));

    let body = mocks
        .run(
            r#"mutation {
                createStudent(input: {
                    firstName: "Jane", lastName: "Doe", email: "dup@x.edu", universityId: 1
                }) { id }
            }"#,
        )
        .await;

    assert_eq!(body["errors"][0]["message"], "Email already exists");
    assert_eq!(error_code(&body), "BAD_REQUEST");
}

#[actix_web::test]
async fn create_student_with_unknown_university_names_the_university() {
    let mut mocks = Mocks::new();
    mocks
        .records
        .expect_create_student()
        .return_once(|_| Err(UpstreamError::not_found("student", None)));

    let body = mocks
        .run(
            r#"mutation {
                createStudent(input: {
                    firstName: "Jane", lastName: "Doe", email: "jane@x.edu", universityId: 77
                }) { id }
            }"#,
        )
        .await;

    assert_eq!(
        body["errors"][0]["message"],
        "University not found with id: 77"
    );
}

#[actix_web::test]
async fn update_student_sends_only_supplied_fields() {
    let mut mocks = Mocks::new();
    mocks
        .records
        .expect_update_student()
        .withf(|id, changes| {
            *id == 4
                && changes.email.as_deref() == Some("emily@sorbonne.edu")
                && changes.first_name.is_none()
                && changes.university.is_none()
        })
        .return_once(|_, _| Ok(emily()));

    let body = mocks
        .run(r#"mutation { updateStudent(id: 4, input: { email: "emily@sorbonne.edu" }) { id } }"#)
        .await;

    assert_eq!(body["data"]["updateStudent"]["id"], 4);
}

#[actix_web::test]
async fn data_queries_fail_when_the_upstream_is_unreachable() {
    let mut mocks = Mocks::new();
    mocks
        .records
        .expect_list_universities()
        .return_once(|| Err(UpstreamError::transport("connection refused")));

    let body = mocks.run("{ universities { id } }").await;

    assert_eq!(error_code(&body), "UPSTREAM_UNAVAILABLE");
}

#[rstest]
#[case(Ok(DeleteOutcome::Deleted), true)]
#[case(Ok(DeleteOutcome::NotFound), false)]
#[case(Err(UpstreamError::transport("connection refused")), false)]
#[actix_web::test]
async fn delete_course_collapses_to_a_boolean(
    #[case] outcome: Result<DeleteOutcome, UpstreamError>,
    #[case] expected: bool,
) {
    let mut mocks = Mocks::new();
    mocks
        .courses
        .expect_delete_course()
        .withf(|id| *id == 3)
        .return_once(move |_| outcome);

    let body = mocks.run("mutation { deleteCourse(id: 3) }").await;

    assert_eq!(body["data"]["deleteCourse"], expected);
    assert!(body.get("errors").is_none());
}

#[actix_web::test]
async fn remove_student_from_course_passes_both_ids() {
    let mut mocks = Mocks::new();
    mocks
        .courses
        .expect_remove_enrollment()
        .withf(|student_id, course_id| *student_id == 4 && *course_id == 3)
        .return_once(|_, _| Ok(DeleteOutcome::NotFound));

    let body = mocks
        .run("mutation { removeStudentFromCourse(studentId: 4, courseId: 3) }")
        .await;

    assert_eq!(body["data"]["removeStudentFromCourse"], false);
}

#[actix_web::test]
async fn zero_credits_are_forwarded() {
    let mut mocks = Mocks::new();
    mocks
        .courses
        .expect_create_course()
        .withf(|input| input.credits == Some(0) && input.instructor.is_none())
        .return_once(|input| {
            Ok(Course {
                id: 9,
                name: input.name.clone(),
                description: None,
                credits: Some(0),
                instructor: None,
                created_at: Some("2025-01-01T00:00:00Z".to_owned()),
                updated_at: None,
            })
        });

    let body = mocks
        .run(r#"mutation { createCourse(input: { name: "Seminar", credits: 0 }) { id credits created_at } }"#)
        .await;

    assert_eq!(
        body["data"]["createCourse"],
        json!({ "id": 9, "credits": 0, "created_at": "2025-01-01T00:00:00Z" })
    );
}

#[actix_web::test]
async fn enrollments_keep_store_field_names() {
    let mut mocks = Mocks::new();
    mocks
        .courses
        .expect_enrollments_by_student()
        .withf(|student_id| *student_id == 4)
        .return_once(|_| {
            Ok(vec![Enrollment {
                id: 11,
                student_id: 4,
                student_name: Some("Emily Martinez".to_owned()),
                course: 3,
                course_name: Some("Philosophy".to_owned()),
                grade: None,
                enrollment_date: None,
                created_at: None,
            }])
        });

    let body = mocks
        .run("{ enrollmentsByStudent(studentId: 4) { id student_id course course_name grade } }")
        .await;

    assert_eq!(
        body["data"]["enrollmentsByStudent"],
        json!([{
            "id": 11,
            "student_id": 4,
            "course": 3,
            "course_name": "Philosophy",
            "grade": null
        }])
    );
}

#[actix_web::test]
async fn translation_failures_are_reported_in_the_result() {
    let mut mocks = Mocks::new();
    mocks
        .text
        .expect_translate()
        .withf(|request| request.source_lang.is_none() && request.target_lang.as_deref() == Some("fr"))
        .return_once(|_| Err(UpstreamError::rejected(400_u16, "Unsupported language pair")));

    let body = mocks
        .run(r#"mutation { translate(text: "hello", targetLang: "fr") { success originalText error } }"#)
        .await;

    assert_eq!(
        body["data"]["translate"],
        json!({
            "success": false,
            "originalText": "hello",
            "error": "Unsupported language pair"
        })
    );
}

#[actix_web::test]
async fn chatbot_health_reports_unreachable_service() {
    let mut mocks = Mocks::new();
    mocks
        .text
        .expect_health()
        .return_once(|| Err(UpstreamError::transport("connection refused")));

    let body = mocks.run("{ chatbotHealth { success status } }").await;

    assert_eq!(
        body["data"]["chatbotHealth"],
        json!({ "success": false, "status": "unhealthy" })
    );
}

#[actix_web::test]
async fn graphql_endpoint_executes_over_http() {
    let mut mocks = Mocks::new();
    mocks.text.expect_health().return_once(|| {
        Ok(TextServiceHealth {
            status: Some("healthy".to_owned()),
            service: Some("chatbot".to_owned()),
            version: Some("1.0".to_owned()),
        })
    });
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(mocks.schema()))
            .configure(configure),
    )
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/graphql")
        .set_json(json!({ "query": "{ chatbotHealth { success service } }" }))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(
        body["data"]["chatbotHealth"],
        json!({ "success": true, "service": "chatbot" })
    );

    let explorer = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/graphql").to_request(),
    )
    .await;
    assert_eq!(explorer.status(), StatusCode::OK);
}
