//! Student records.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::university::UniversitySummary;
use super::validation::{self, FieldValidationError};

/// Student as returned to clients, with the owning university inlined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Generated identifier; immutable once assigned.
    #[schema(example = 8)]
    pub id: i64,
    /// Given name.
    #[schema(example = "Emily")]
    pub first_name: String,
    /// Family name.
    #[schema(example = "Martinez")]
    pub last_name: String,
    /// Email address, unique across students.
    #[schema(example = "emily.martinez@philosophe.edu")]
    pub email: String,
    /// Owning university.
    pub university: UniversitySummary,
}

impl Student {
    /// Drop the university reference, as listed under a university.
    #[must_use]
    pub fn summary(&self) -> StudentSummary {
        StudentSummary {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Student fields without the university, as nested in a university.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    /// Generated identifier.
    pub id: i64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
}

/// Aggregate counters over the student table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentStats {
    /// Number of stored students.
    #[schema(example = 8)]
    pub total_students: i64,
}

/// Validated input for creating a student.
///
/// ## Invariants
/// - names are trimmed and non-empty.
/// - `email` has the `local@domain` shape.
/// - `university_id` refers to a university; existence is checked by the
///   service at write time, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    first_name: String,
    last_name: String,
    email: String,
    university_id: i64,
}

impl NewStudent {
    /// Validate raw inputs.
    ///
    /// # Examples
    /// ```
    /// use campus::domain::NewStudent;
    ///
    /// let draft = NewStudent::try_new("Emma", "Wilson", "emma.wilson@philosophe.edu", 2).unwrap();
    /// assert_eq!(draft.university_id(), 2);
    /// ```
    pub fn try_new(
        first_name: &str,
        last_name: &str,
        email: &str,
        university_id: i64,
    ) -> Result<Self, FieldValidationError> {
        Ok(Self {
            first_name: validation::non_blank(first_name, "firstName")?,
            last_name: validation::non_blank(last_name, "lastName")?,
            email: validation::email(email, "email")?,
            university_id,
        })
    }

    /// Given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Email address.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Referenced university.
    #[must_use]
    pub const fn university_id(&self) -> i64 {
        self.university_id
    }
}

/// Partial update for a student; absent fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    university_id: Option<i64>,
}

impl StudentPatch {
    /// Validate the fields that are present.
    pub fn try_new(
        first_name: Option<&str>,
        last_name: Option<&str>,
        email: Option<&str>,
        university_id: Option<i64>,
    ) -> Result<Self, FieldValidationError> {
        Ok(Self {
            first_name: validation::optional(first_name, "firstName", validation::non_blank)?,
            last_name: validation::optional(last_name, "lastName", validation::non_blank)?,
            email: validation::optional(email, "email", validation::email)?,
            university_id,
        })
    }

    /// Replacement given name, if supplied.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// Replacement family name, if supplied.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// Replacement email, if supplied.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Replacement university reference, if supplied.
    #[must_use]
    pub const fn university_id(&self) -> Option<i64> {
        self.university_id
    }

    /// Merge the patch over the current record, producing the full row to store.
    #[must_use]
    pub fn merge(&self, current: &Student) -> NewStudent {
        NewStudent {
            first_name: self
                .first_name
                .clone()
                .unwrap_or_else(|| current.first_name.clone()),
            last_name: self
                .last_name
                .clone()
                .unwrap_or_else(|| current.last_name.clone()),
            email: self.email.clone().unwrap_or_else(|| current.email.clone()),
            university_id: self.university_id.unwrap_or(current.university.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn emily() -> Student {
        Student {
            id: 8,
            first_name: "Emily".to_owned(),
            last_name: "Martinez".to_owned(),
            email: "emily.martinez@philosophe.edu".to_owned(),
            university: UniversitySummary {
                id: 4,
                name: "Cambridge University".to_owned(),
                location: "Cambridge, UK".to_owned(),
            },
        }
    }

    #[rstest]
    #[case("", "Doe", "jane@example.org", "firstName")]
    #[case("Jane", " ", "jane@example.org", "lastName")]
    #[case("Jane", "Doe", "jane.example.org", "email")]
    fn new_student_rejects_invalid_fields(
        #[case] first: &str,
        #[case] last: &str,
        #[case] email: &str,
        #[case] field: &str,
    ) {
        let err = NewStudent::try_new(first, last, email, 1).expect_err("invalid input");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn merge_keeps_absent_fields(emily: Student) {
        let patch = StudentPatch::try_new(None, None, Some("emily.m@philosophe.edu"), None)
            .expect("valid patch");
        let merged = patch.merge(&emily);
        assert_eq!(merged.first_name(), "Emily");
        assert_eq!(merged.email(), "emily.m@philosophe.edu");
        assert_eq!(merged.university_id(), 4);
    }

    #[rstest]
    fn merge_moves_to_new_university(emily: Student) {
        let patch = StudentPatch::try_new(None, None, None, Some(1)).expect("valid patch");
        assert_eq!(patch.merge(&emily).university_id(), 1);
    }

    #[rstest]
    fn student_json_uses_camel_case(emily: Student) {
        let value = serde_json::to_value(&emily).expect("serialises");
        assert_eq!(value["firstName"], "Emily");
        assert_eq!(value["university"]["name"], "Cambridge University");
        assert!(value["university"].get("students").is_none());
    }
}
