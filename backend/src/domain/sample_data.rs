//! Sample data seeding for empty record stores.
//!
//! Seeds four universities and eight students, two per university, when the
//! store holds no universities yet. A store with any university is left alone.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::domain::ports::{
    StudentRepository, StudentRepositoryError, UniversityRepository, UniversityRepositoryError,
};
use crate::domain::{FieldValidationError, NewStudent, NewUniversity};

const UNIVERSITIES: [(&str, &str); 4] = [
    ("Sorbonne University", "Paris, France"),
    ("Oxford University", "Oxford, UK"),
    ("Harvard University", "Cambridge, USA"),
    ("Cambridge University", "Cambridge, UK"),
];

/// `(first name, last name, index into UNIVERSITIES)`.
const STUDENTS: [(&str, &str, usize); 8] = [
    ("John", "Smith", 0),
    ("Jane", "Doe", 1),
    ("Michael", "Brown", 2),
    ("Emma", "Wilson", 3),
    ("David", "Miller", 0),
    ("Sarah", "Davis", 1),
    ("James", "Garcia", 2),
    ("Emily", "Martinez", 3),
];

const EMAIL_DOMAIN: &str = "philosophe.edu";

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Sample rows were inserted.
    Applied {
        /// Universities inserted.
        universities: usize,
        /// Students inserted.
        students: usize,
    },
    /// The store already had universities.
    AlreadyPopulated,
}

/// Errors raised while seeding sample data.
#[derive(Debug, Error)]
pub enum SampleDataSeedingError {
    /// A sample row failed entity validation.
    #[error("sample row failed validation: {0}")]
    Invalid(#[from] FieldValidationError),
    /// University persistence failed.
    #[error("sample university persistence failed: {0}")]
    University(#[from] UniversityRepositoryError),
    /// Student persistence failed.
    #[error("sample student persistence failed: {0}")]
    Student(#[from] StudentRepositoryError),
}

/// Seeds the sample universities and students.
#[derive(Clone)]
pub struct SampleDataSeeder<U, S> {
    universities: Arc<U>,
    students: Arc<S>,
}

impl<U, S> SampleDataSeeder<U, S> {
    /// Create a seeder over the record repositories.
    pub fn new(universities: Arc<U>, students: Arc<S>) -> Self {
        Self {
            universities,
            students,
        }
    }
}

impl<U, S> SampleDataSeeder<U, S>
where
    U: UniversityRepository,
    S: StudentRepository,
{
    /// Insert the sample rows unless universities already exist.
    ///
    /// # Errors
    ///
    /// Returns [`SampleDataSeedingError`] when validation or persistence fails.
    /// Rows inserted before the failure stay in place.
    pub async fn seed(&self) -> Result<SeedOutcome, SampleDataSeedingError> {
        if self.universities.count().await? > 0 {
            return Ok(SeedOutcome::AlreadyPopulated);
        }

        let mut university_ids = Vec::with_capacity(UNIVERSITIES.len());
        for (name, location) in UNIVERSITIES {
            let stored = self
                .universities
                .insert(&NewUniversity::try_new(name, location)?)
                .await?;
            university_ids.push(stored.id);
        }

        for (first_name, last_name, university) in STUDENTS {
            let email = format!(
                "{}.{}@{EMAIL_DOMAIN}",
                first_name.to_lowercase(),
                last_name.to_lowercase()
            );
            let draft =
                NewStudent::try_new(first_name, last_name, &email, university_ids[university])?;
            self.students.insert(&draft).await?;
        }

        info!(
            universities = UNIVERSITIES.len(),
            students = STUDENTS.len(),
            "seeded sample records"
        );
        Ok(SeedOutcome::Applied {
            universities: UNIVERSITIES.len(),
            students: STUDENTS.len(),
        })
    }
}
