//! University records.
//!
//! A university owns its students: the `students` list on [`University`] is a
//! derived back-reference assembled from student records and can never be
//! written through a university payload.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::student::StudentSummary;
use super::validation::{self, FieldValidationError};

/// University as returned to clients, including its enrolled students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct University {
    /// Generated identifier.
    #[schema(example = 2)]
    pub id: i64,
    /// Display name.
    #[schema(example = "Oxford University")]
    pub name: String,
    /// City and country.
    #[schema(example = "Oxford, UK")]
    pub location: String,
    /// Students belonging to this university.
    #[serde(default)]
    pub students: Vec<StudentSummary>,
}

impl University {
    /// Assemble the client view from a stored record and its students.
    #[must_use]
    pub fn from_summary(summary: UniversitySummary, students: Vec<StudentSummary>) -> Self {
        let UniversitySummary { id, name, location } = summary;
        Self {
            id,
            name,
            location,
            students,
        }
    }
}

/// University fields without the student back-reference.
///
/// This is the stored shape, and the shape nested inside a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UniversitySummary {
    /// Generated identifier.
    #[schema(example = 2)]
    pub id: i64,
    /// Display name.
    #[schema(example = "Oxford University")]
    pub name: String,
    /// City and country.
    #[schema(example = "Oxford, UK")]
    pub location: String,
}

/// Validated input for creating a university.
///
/// ## Invariants
/// - `name` and `location` are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUniversity {
    name: String,
    location: String,
}

impl NewUniversity {
    /// Validate raw inputs.
    ///
    /// # Examples
    /// ```
    /// use campus::domain::NewUniversity;
    ///
    /// let draft = NewUniversity::try_new(" Harvard University ", "Cambridge, USA").unwrap();
    /// assert_eq!(draft.name(), "Harvard University");
    /// ```
    pub fn try_new(name: &str, location: &str) -> Result<Self, FieldValidationError> {
        Ok(Self {
            name: validation::non_blank(name, "name")?,
            location: validation::non_blank(location, "location")?,
        })
    }

    /// University name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// University location.
    #[must_use]
    pub fn location(&self) -> &str {
        self.location.as_str()
    }
}

/// Partial update for a university; absent fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniversityPatch {
    name: Option<String>,
    location: Option<String>,
}

impl UniversityPatch {
    /// Validate the fields that are present.
    pub fn try_new(
        name: Option<&str>,
        location: Option<&str>,
    ) -> Result<Self, FieldValidationError> {
        Ok(Self {
            name: validation::optional(name, "name", validation::non_blank)?,
            location: validation::optional(location, "location", validation::non_blank)?,
        })
    }

    /// Replacement name, if supplied.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Replacement location, if supplied.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Apply the patch to a stored record.
    #[must_use]
    pub fn apply(&self, mut current: UniversitySummary) -> UniversitySummary {
        if let Some(name) = &self.name {
            current.name.clone_from(name);
        }
        if let Some(location) = &self.location {
            current.location.clone_from(location);
        }
        current
    }
}
