//! Builders wiring repositories into the Record Store driving ports.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::ports::{StudentRepository, UniversityRepository, UserRepository};
use crate::domain::{
    AccountManager, SampleDataSeeder, SampleDataSeedingError, SeedOutcome, StudentService,
    UniversityService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::auth::{Argon2PasswordHasher, JwtConfig, JwtTokenService};
use crate::outbound::memory::{
    InMemoryStudentRepository, InMemoryUniversityRepository, InMemoryUserRepository,
};
use crate::outbound::persistence::{
    DbPool, DieselStudentRepository, DieselUniversityRepository, DieselUserRepository,
};

/// Repositories behind one Record Store instance.
pub struct Repositories<S, U, R> {
    pub students: Arc<S>,
    pub universities: Arc<U>,
    pub users: Arc<R>,
}

impl<S, U, R> Clone for Repositories<S, U, R> {
    fn clone(&self) -> Self {
        Self {
            students: Arc::clone(&self.students),
            universities: Arc::clone(&self.universities),
            users: Arc::clone(&self.users),
        }
    }
}

/// Process-memory repositories.
pub type InMemoryRepositories =
    Repositories<InMemoryStudentRepository, InMemoryUniversityRepository, InMemoryUserRepository>;

/// PostgreSQL repositories sharing one pool.
pub type DieselRepositories =
    Repositories<DieselStudentRepository, DieselUniversityRepository, DieselUserRepository>;

impl InMemoryRepositories {
    /// Empty repositories held in process memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            students: Arc::new(InMemoryStudentRepository::default()),
            universities: Arc::new(InMemoryUniversityRepository::default()),
            users: Arc::new(InMemoryUserRepository::default()),
        }
    }
}

impl DieselRepositories {
    /// Repositories sharing `pool`.
    #[must_use]
    pub fn diesel(pool: &DbPool) -> Self {
        Self {
            students: Arc::new(DieselStudentRepository::new(pool.clone())),
            universities: Arc::new(DieselUniversityRepository::new(pool.clone())),
            users: Arc::new(DieselUserRepository::new(pool.clone())),
        }
    }
}

impl<S, U, R> Repositories<S, U, R>
where
    S: StudentRepository + 'static,
    U: UniversityRepository + 'static,
    R: UserRepository + 'static,
{
    /// Seed sample records when enabled and the store is empty.
    ///
    /// # Errors
    ///
    /// Propagates [`SampleDataSeedingError`] from the seeder.
    pub async fn seed_if(&self, enabled: bool) -> Result<(), SampleDataSeedingError> {
        if !enabled {
            return Ok(());
        }
        let seeder = SampleDataSeeder::new(
            Arc::clone(&self.universities),
            Arc::clone(&self.students),
        );
        if seeder.seed().await? == SeedOutcome::AlreadyPopulated {
            info!("records already present; sample data skipped");
        }
        Ok(())
    }

    /// Build the handler state: record services plus JWT-backed accounts.
    pub fn http_state(&self, jwt: JwtConfig, clock: Arc<dyn Clock>) -> HttpState {
        let tokens = Arc::new(JwtTokenService::new(jwt, clock));
        HttpState::new(
            Arc::new(StudentService::new(
                Arc::clone(&self.students),
                Arc::clone(&self.universities),
            )),
            Arc::new(UniversityService::new(
                Arc::clone(&self.universities),
                Arc::clone(&self.students),
            )),
            Arc::new(AccountManager::new(
                Arc::clone(&self.users),
                tokens,
                Arc::new(Argon2PasswordHasher),
            )),
        )
    }
}
