//! Failure and outcome types shared by the outbound HTTP client ports.

use super::define_port_error;

define_port_error! {
    /// Failures raised by clients of the Record Store, Course Store and
    /// Text-Service.
    pub enum UpstreamError {
        /// The addressed resource does not exist upstream. `message` is the
        /// upstream's own explanation when it sent a structured error body.
        NotFound { resource: String, message: Option<String> } =>
            "{resource} not found upstream",
        /// Upstream refused the request with a 4xx status.
        Rejected { status: u16, message: String } =>
            "upstream rejected the request with status {status}: {message}",
        /// Connection failure, timeout or 5xx status.
        Transport { message: String } => "upstream transport failed: {message}",
        /// The response body did not have the expected shape.
        Decode { message: String } => "upstream response could not be decoded: {message}",
    }
}

/// Result of a delete-style call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The resource existed and was removed.
    Deleted,
    /// Nothing matched, so nothing was removed.
    NotFound,
}

impl DeleteOutcome {
    /// Whether anything was removed.
    #[must_use]
    pub const fn is_deleted(self) -> bool {
        matches!(self, Self::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(UpstreamError::not_found("course 7", None), "not_found")]
    #[case(UpstreamError::rejected(400_u16, "bad"), "rejected")]
    #[case(UpstreamError::transport("refused"), "transport")]
    #[case(UpstreamError::decode("eof"), "decode")]
    fn kinds_label_each_variant(#[case] err: UpstreamError, #[case] expected: &str) {
        assert_eq!(err.kind(), expected);
    }

    #[test]
    fn rejection_keeps_upstream_message() {
        let err = UpstreamError::rejected(409_u16, "Email already exists");
        assert_eq!(
            err.to_string(),
            "upstream rejected the request with status 409: Email already exists"
        );
    }
}
