//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountService, StudentRecords, UniversityRecords};

/// Dependency bundle for Record Store handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Student records.
    pub students: Arc<dyn StudentRecords>,
    /// University records.
    pub universities: Arc<dyn UniversityRecords>,
    /// Registration, login and tokens.
    pub accounts: Arc<dyn AccountService>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use campus::domain::ports::{AccountService, StudentRecords, UniversityRecords};
    /// use campus::inbound::http::state::HttpState;
    ///
    /// fn build(
    ///     students: Arc<dyn StudentRecords>,
    ///     universities: Arc<dyn UniversityRecords>,
    ///     accounts: Arc<dyn AccountService>,
    /// ) -> HttpState {
    ///     HttpState::new(students, universities, accounts)
    /// }
    /// ```
    pub fn new(
        students: Arc<dyn StudentRecords>,
        universities: Arc<dyn UniversityRecords>,
        accounts: Arc<dyn AccountService>,
    ) -> Self {
        Self {
            students,
            universities,
            accounts,
        }
    }
}
