//! Outbound port for the Record Store REST API, used by the aggregation layer.
//!
//! Write payloads mirror the Record Store's camelCase body shape, with the
//! university referenced as `{ "id": .. }`.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Student, StudentStats, University};

use super::{DeleteOutcome, UpstreamError};

/// Reference to a university by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UniversityRef {
    /// University identifier.
    pub id: i64,
}

/// Body for creating a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDraft {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique contact address.
    pub email: String,
    /// Owning university.
    pub university: UniversityRef,
}

/// Body for updating a student; absent fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentChanges {
    /// Replacement given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Replacement family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Replacement email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Move the student to another university.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university: Option<UniversityRef>,
}

/// Body for creating a university.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniversityDraft {
    /// Display name.
    pub name: String,
    /// City and country.
    pub location: String,
}

/// Body for updating a university; absent fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UniversityChanges {
    /// Replacement name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Client port for the Record Store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStoreClient: Send + Sync {
    async fn list_students(&self) -> Result<Vec<Student>, UpstreamError>;

    async fn get_student(&self, id: i64) -> Result<Student, UpstreamError>;

    async fn students_by_university(
        &self,
        university_id: i64,
    ) -> Result<Vec<Student>, UpstreamError>;

    async fn search_students(&self, query: &str) -> Result<Vec<Student>, UpstreamError>;

    async fn student_stats(&self) -> Result<StudentStats, UpstreamError>;

    async fn create_student(&self, input: &StudentDraft) -> Result<Student, UpstreamError>;

    /// `PUT` the changes, then re-read the student.
    async fn update_student(
        &self,
        id: i64,
        changes: &StudentChanges,
    ) -> Result<Student, UpstreamError>;

    async fn delete_student(&self, id: i64) -> Result<DeleteOutcome, UpstreamError>;

    async fn list_universities(&self) -> Result<Vec<University>, UpstreamError>;

    async fn get_university(&self, id: i64) -> Result<University, UpstreamError>;

    async fn search_universities(&self, name: &str) -> Result<Vec<University>, UpstreamError>;

    async fn create_university(
        &self,
        input: &UniversityDraft,
    ) -> Result<University, UpstreamError>;

    /// `PUT` the changes, then re-read the university.
    async fn update_university(
        &self,
        id: i64,
        changes: &UniversityChanges,
    ) -> Result<University, UpstreamError>;

    async fn delete_university(&self, id: i64) -> Result<DeleteOutcome, UpstreamError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn student_changes_only_carry_present_fields() {
        let changes = StudentChanges {
            email: Some("jane.doe@philosophe.edu".to_owned()),
            university: Some(UniversityRef { id: 3 }),
            ..StudentChanges::default()
        };
        assert_eq!(
            serde_json::to_value(&changes).expect("serialises"),
            json!({ "email": "jane.doe@philosophe.edu", "university": { "id": 3 } })
        );
    }
}
