//! Shared Diesel error mapping for the record and account repositories.
//!
//! Each repository passes its own error constructors so the mapping stays in
//! one place while the port error types stay separate.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool failures into a repository's connection error.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    connection(error.into_message())
}

/// Name of the violated unique constraint, if `error` is a unique violation.
pub(crate) fn unique_violation(error: &DieselError) -> Option<&str> {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            Some(info.constraint_name().unwrap_or_default())
        }
        _ => None,
    }
}

/// Map Diesel failures into query or connection errors.
///
/// Unique violations are not special-cased here; repositories that care check
/// [`unique_violation`] first.
pub(crate) fn map_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::BrokenTransactionManager => connection("database connection error"),
        _ => query("database error"),
    }
}

/// Build an `ILIKE` pattern matching `fragment` anywhere, with wildcards escaped.
pub(crate) fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::StudentRepositoryError;
    use rstest::rstest;

    fn student_error(error: DieselError) -> StudentRepositoryError {
        map_diesel_error(
            error,
            StudentRepositoryError::query,
            StudentRepositoryError::connection,
        )
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let mapped = student_error(DieselError::NotFound);
        assert_eq!(mapped, StudentRepositoryError::query("record not found"));
    }

    #[rstest]
    fn broken_transaction_manager_maps_to_connection_error() {
        let mapped = student_error(DieselError::BrokenTransactionManager);
        assert!(matches!(mapped, StudentRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let mapped = map_pool_error(
            PoolError::checkout("timed out"),
            StudentRepositoryError::connection,
        );
        assert_eq!(mapped, StudentRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn other_errors_are_not_unique_violations() {
        assert_eq!(unique_violation(&DieselError::NotFound), None);
    }

    #[rstest]
    #[case("mar", "%mar%")]
    #[case("100%", "%100\\%%")]
    #[case("a_b", "%a\\_b%")]
    #[case("c:\\", "%c:\\\\%")]
    fn contains_pattern_escapes_wildcards(#[case] fragment: &str, #[case] expected: &str) {
        assert_eq!(contains_pattern(fragment), expected);
    }
}
