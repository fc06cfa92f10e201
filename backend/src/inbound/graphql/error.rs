//! Mapping of upstream client failures onto GraphQL errors.
//!
//! Every error carries an `extensions.code`:
//!
//! | Upstream failure     | `code`                 |
//! |----------------------|------------------------|
//! | `NotFound`           | `NOT_FOUND`            |
//! | `Rejected`           | `BAD_REQUEST`          |
//! | `Transport`/`Decode` | `UPSTREAM_UNAVAILABLE` |

use async_graphql::{Error, ErrorExtensions};
use tracing::warn;

use crate::domain::ports::{DeleteOutcome, UpstreamError};

pub(crate) const NOT_FOUND: &str = "NOT_FOUND";
pub(crate) const BAD_REQUEST: &str = "BAD_REQUEST";
pub(crate) const UPSTREAM_UNAVAILABLE: &str = "UPSTREAM_UNAVAILABLE";

fn coded(message: impl Into<String>, code: &'static str) -> Error {
    Error::new(message).extend_with(|_, ext| ext.set("code", code))
}

/// Entity kinds named in not-found messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    Student,
    University,
    Course,
    Enrollment,
}

impl Kind {
    const fn label(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::University => "University",
            Self::Course => "Course",
            Self::Enrollment => "Enrollment",
        }
    }
}

impl ErrorExtensions for UpstreamError {
    fn extend(&self) -> Error {
        match self {
            Self::NotFound {
                message: Some(message),
                ..
            } => coded(message.clone(), NOT_FOUND),
            Self::NotFound { resource, .. } => coded(format!("{resource} not found"), NOT_FOUND),
            Self::Rejected { message, .. } => coded(message.clone(), BAD_REQUEST),
            Self::Transport { .. } | Self::Decode { .. } => {
                warn!(kind = self.kind(), error = %self, "upstream call failed");
                coded(self.to_string(), UPSTREAM_UNAVAILABLE)
            }
        }
    }
}

/// Convert a failure from a call addressing `kind` by `id`.
///
/// An upstream not-found message wins over the label; a request can miss on a
/// referenced entity rather than the addressed one.
pub(crate) fn lookup_error(kind: Kind, id: i64, err: &UpstreamError) -> Error {
    match err {
        UpstreamError::NotFound { message: None, .. } => coded(
            format!("{} not found with id: {id}", kind.label()),
            NOT_FOUND,
        ),
        other => other.extend(),
    }
}

/// Collapse a delete-style result to the boolean GraphQL answer.
pub(crate) fn deleted(
    operation: &'static str,
    result: Result<DeleteOutcome, UpstreamError>,
) -> bool {
    match result {
        Ok(DeleteOutcome::Deleted) => true,
        Ok(DeleteOutcome::NotFound) => {
            warn!(operation, kind = "not_found", "nothing was removed");
            false
        }
        Err(error) => {
            warn!(operation, kind = error.kind(), %error, "removal failed upstream");
            false
        }
    }
}
