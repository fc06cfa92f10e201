//! Reqwest adapter for the Record Store REST API.

use async_trait::async_trait;
use reqwest::{Client, Method, Url};

use crate::domain::ports::{
    DeleteOutcome, RecordStoreClient, StudentChanges, StudentDraft, UniversityChanges,
    UniversityDraft, UpstreamError,
};
use crate::domain::{Student, StudentStats, University};

use super::upstream::Upstream;

/// Talks to the Record Store under `base` (for example `http://localhost:8080`).
#[derive(Debug, Clone)]
pub struct HttpRecordStoreClient {
    upstream: Upstream,
}

impl HttpRecordStoreClient {
    /// Create a client rooted at `base`.
    pub fn new(client: Client, base: &Url) -> Self {
        Self {
            upstream: Upstream::new(client, base),
        }
    }
}

fn student(id: i64) -> String {
    format!("student {id}")
}

fn university(id: i64) -> String {
    format!("university {id}")
}

#[async_trait]
impl RecordStoreClient for HttpRecordStoreClient {
    async fn list_students(&self) -> Result<Vec<Student>, UpstreamError> {
        self.upstream.get("/api/students", "students").await
    }

    async fn get_student(&self, id: i64) -> Result<Student, UpstreamError> {
        self.upstream
            .get(&format!("/api/students/{id}"), &student(id))
            .await
    }

    async fn students_by_university(
        &self,
        university_id: i64,
    ) -> Result<Vec<Student>, UpstreamError> {
        self.upstream
            .get(
                &format!("/api/students/university/{university_id}"),
                &university(university_id),
            )
            .await
    }

    async fn search_students(&self, query: &str) -> Result<Vec<Student>, UpstreamError> {
        self.upstream
            .get_with_query("/api/students/search", &[("query", query)], "students")
            .await
    }

    async fn student_stats(&self) -> Result<StudentStats, UpstreamError> {
        self.upstream
            .get("/api/students/stats", "student stats")
            .await
    }

    async fn create_student(&self, input: &StudentDraft) -> Result<Student, UpstreamError> {
        self.upstream
            .send(Method::POST, "/api/students", input, "student")
            .await
    }

    async fn update_student(
        &self,
        id: i64,
        changes: &StudentChanges,
    ) -> Result<Student, UpstreamError> {
        let path = format!("/api/students/{id}");
        self.upstream
            .send_discarding(Method::PUT, &path, changes, &student(id))
            .await?;
        self.upstream.get(&path, &student(id)).await
    }

    async fn delete_student(&self, id: i64) -> Result<DeleteOutcome, UpstreamError> {
        self.upstream
            .delete(&format!("/api/students/{id}"), &student(id))
            .await
    }

    async fn list_universities(&self) -> Result<Vec<University>, UpstreamError> {
        self.upstream.get("/api/universities", "universities").await
    }

    async fn get_university(&self, id: i64) -> Result<University, UpstreamError> {
        self.upstream
            .get(&format!("/api/universities/{id}"), &university(id))
            .await
    }

    async fn search_universities(&self, name: &str) -> Result<Vec<University>, UpstreamError> {
        self.upstream
            .get_with_query("/api/universities/search", &[("name", name)], "universities")
            .await
    }

    async fn create_university(
        &self,
        input: &UniversityDraft,
    ) -> Result<University, UpstreamError> {
        self.upstream
            .send(Method::POST, "/api/universities", input, "university")
            .await
    }

    async fn update_university(
        &self,
        id: i64,
        changes: &UniversityChanges,
    ) -> Result<University, UpstreamError> {
        let path = format!("/api/universities/{id}");
        self.upstream
            .send_discarding(Method::PUT, &path, changes, &university(id))
            .await?;
        self.upstream.get(&path, &university(id)).await
    }

    async fn delete_university(&self, id: i64) -> Result<DeleteOutcome, UpstreamError> {
        self.upstream
            .delete(&format!("/api/universities/{id}"), &university(id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::UniversityRef;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn student_json(id: i64, email: &str) -> serde_json::Value {
        json!({
            "id": id,
            "firstName": "Emily",
            "lastName": "Martinez",
            "email": email,
            "university": { "id": 1, "name": "Sorbonne", "location": "Paris, France" }
        })
    }

    async fn client(server: &MockServer) -> HttpRecordStoreClient {
        let base = Url::parse(&server.uri()).expect("mock server url");
        HttpRecordStoreClient::new(Client::new(), &base)
    }

    #[tokio::test]
    async fn search_sends_the_query_parameter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/students/search"))
            .and(query_param("query", "mar"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([student_json(7, "emily.martinez@philosophe.edu")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let found = client(&server).await.search_students("mar").await.expect("search");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].university.name, "Sorbonne");
    }

    #[tokio::test]
    async fn create_posts_camel_case_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/students"))
            .and(body_json(json!({
                "firstName": "Emily",
                "lastName": "Martinez",
                "email": "emily@philosophe.edu",
                "university": { "id": 1 }
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(student_json(9, "emily@philosophe.edu")),
            )
            .mount(&server)
            .await;

        let created = client(&server)
            .await
            .create_student(&StudentDraft {
                first_name: "Emily".to_owned(),
                last_name: "Martinez".to_owned(),
                email: "emily@philosophe.edu".to_owned(),
                university: UniversityRef { id: 1 },
            })
            .await
            .expect("created");
        assert_eq!(created.id, 9);
    }

    #[tokio::test]
    async fn update_rereads_after_put() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/students/7"))
            .and(body_json(json!({ "email": "new@philosophe.edu" })))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/students/7"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(student_json(7, "new@philosophe.edu")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let changes = StudentChanges {
            email: Some("new@philosophe.edu".to_owned()),
            ..StudentChanges::default()
        };
        let updated = client(&server)
            .await
            .update_student(7, &changes)
            .await
            .expect("updated");
        assert_eq!(updated.email, "new@philosophe.edu");
    }

    #[tokio::test]
    async fn missing_student_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/students/404"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "code": "not_found",
                "message": "Student not found with id: 404"
            })))
            .mount(&server)
            .await;

        let err = client(&server).await.get_student(404).await.expect_err("missing");
        assert_eq!(
            err,
            UpstreamError::not_found(
                "student 404",
                Some("Student not found with id: 404".to_owned())
            )
        );
    }

    #[tokio::test]
    async fn delete_of_missing_university_reports_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/universities/5"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let outcome = client(&server)
            .await
            .delete_university(5)
            .await
            .expect("delete call");
        assert_eq!(outcome, DeleteOutcome::NotFound);
    }

    #[tokio::test]
    async fn conflicts_surface_the_upstream_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/universities"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "code": "invalid_request",
                "message": "name must not be blank"
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .await
            .create_university(&UniversityDraft {
                name: " ".to_owned(),
                location: "Paris".to_owned(),
            })
            .await
            .expect_err("rejected");
        assert_eq!(err, UpstreamError::rejected(400_u16, "name must not be blank"));
    }

    #[tokio::test]
    async fn the_current_trace_id_is_forwarded() {
        let server = MockServer::start().await;
        let trace_id = crate::domain::TraceId::generate();
        Mock::given(method("GET"))
            .and(path("/api/students"))
            .and(header(crate::domain::TRACE_ID_HEADER, trace_id.to_string().as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server).await;
        let students = crate::domain::TraceId::scope(trace_id, client.list_students())
            .await
            .expect("list call");
        assert!(students.is_empty());
    }
}
