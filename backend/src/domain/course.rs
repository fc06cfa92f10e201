//! Course and enrollment shapes owned by the external Course Store.
//!
//! The aggregation layer treats these as opaque records: field names follow
//! the store's snake_case wire format and nothing is reshaped on the way
//! through. Write inputs model every optional field as present-or-absent so
//! falsy values such as `credits: 0` or an empty grade are still forwarded.

use serde::{Deserialize, Serialize};

/// Course record as stored by the Course Store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Store-assigned identifier.
    pub id: i64,
    /// Course title.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Credit weighting.
    #[serde(default)]
    pub credits: Option<i32>,
    /// Teaching staff.
    #[serde(default)]
    pub instructor: Option<String>,
    /// Creation timestamp as rendered by the store.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp as rendered by the store.
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Fields for creating a course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CourseInput {
    /// Course title.
    pub name: String,
    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Credit weighting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<i32>,
    /// Teaching staff.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
}

/// Partial course update; only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoursePatch {
    /// Replacement title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement credit weighting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<i32>,
    /// Replacement teaching staff.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
}

/// Link between a Record Store student id and a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Store-assigned identifier.
    pub id: i64,
    /// Student identifier in the Record Store.
    pub student_id: i64,
    /// Display name computed by the store.
    #[serde(default)]
    pub student_name: Option<String>,
    /// Course identifier.
    pub course: i64,
    /// Course title denormalised by the store.
    #[serde(default)]
    pub course_name: Option<String>,
    /// Grade, when awarded.
    #[serde(default)]
    pub grade: Option<String>,
    /// Enrollment date as rendered by the store.
    #[serde(default)]
    pub enrollment_date: Option<String>,
    /// Creation timestamp as rendered by the store.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Fields for enrolling a student in a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrollmentInput {
    /// Student identifier in the Record Store.
    pub student_id: i64,
    /// Course identifier.
    pub course: i64,
    /// Optional initial grade.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

/// Partial enrollment update; only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnrollmentPatch {
    /// Replacement student.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<i64>,
    /// Replacement course.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<i64>,
    /// Replacement grade.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn falsy_values_are_forwarded() {
        let patch = CoursePatch {
            credits: Some(0),
            description: Some(String::new()),
            ..CoursePatch::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).expect("serialises"),
            json!({ "description": "", "credits": 0 })
        );
    }

    #[test]
    fn enrollment_decodes_sparse_payloads() {
        let decoded: Enrollment =
            serde_json::from_value(json!({ "id": 5, "student_id": 1, "course": 2 }))
                .expect("decodes");
        assert_eq!(decoded.course, 2);
        assert!(decoded.grade.is_none());
    }
}
