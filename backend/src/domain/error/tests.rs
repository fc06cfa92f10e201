//! Error construction and wire format.

use super::*;
use crate::domain::TraceId;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn trace_id() -> TraceId {
    TRACE_ID.parse().expect("fixture is a valid UUID")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("Invalid token"), ErrorCode::Unauthorized)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("Email already exists"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_blank_messages() {
    assert_eq!(
        Error::try_new(ErrorCode::InvalidRequest, "   "),
        Err(ErrorValidationError::EmptyMessage)
    );
}

#[rstest]
#[case(ErrorCode::NotFound, "Not found")]
#[case(ErrorCode::Conflict, "Conflict")]
fn blank_messages_fall_back_to_the_code(#[case] code: ErrorCode, #[case] expected: &str) {
    assert_eq!(Error::new(code, "").message(), expected);
}

#[rstest]
fn no_trace_id_outside_a_request() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn captures_the_trace_id_in_scope(trace_id: TraceId) {
    let error = TraceId::scope(trace_id, async { Error::not_found("Student not found with id: 3") })
        .await;

    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
#[tokio::test]
async fn decoding_keeps_the_senders_trace_id_only(trace_id: TraceId) {
    let without = json!({ "code": "not_found", "message": "gone" });
    let with = json!({ "code": "not_found", "message": "gone", "trace_id": "abc" });

    let (without, with) = TraceId::scope(trace_id, async move {
        (
            serde_json::from_value::<Error>(without).expect("decodes"),
            serde_json::from_value::<Error>(with).expect("decodes"),
        )
    })
    .await;

    assert!(without.trace_id().is_none());
    assert_eq!(with.trace_id(), Some("abc"));
}

#[rstest]
fn blank_trace_ids_are_ignored() {
    let error = Error::conflict("taken").with_trace_id("  ");
    assert!(error.trace_id().is_none());
}

#[rstest]
fn decoding_rejects_blank_messages() {
    let result = serde_json::from_value::<Error>(json!({ "code": "conflict", "message": " " }));
    assert!(result.is_err());
}

#[rstest]
fn serialises_camel_case_and_omits_absent_fields() {
    let value = serde_json::to_value(
        Error::conflict("Email already exists").with_trace_id(TRACE_ID),
    )
    .expect("error serialises");
    assert_eq!(
        value,
        json!({
            "code": "conflict",
            "message": "Email already exists",
            "traceId": TRACE_ID,
        })
    );
}
