//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain constructors report which field failed; these helpers turn those
//! failures, and actix extractor failures, into `invalid_request` errors
//! with `{ field, code }` details.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::{Error, FieldValidationError, LoginValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValidationCode {
    EmptyField,
    InvalidEmail,
    PasswordTooShort,
    MalformedBody,
    MalformedPath,
    MalformedQuery,
}

impl ValidationCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyField => "empty_field",
            Self::InvalidEmail => "invalid_email",
            Self::PasswordTooShort => "password_too_short",
            Self::MalformedBody => "malformed_body",
            Self::MalformedPath => "malformed_path",
            Self::MalformedQuery => "malformed_query",
        }
    }
}

fn field_error(message: String, field: &str, code: ValidationCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

/// Map a domain field validation failure to a `400` error.
pub(crate) fn map_field_error(err: FieldValidationError) -> Error {
    let code = match err {
        FieldValidationError::EmptyField { .. } => ValidationCode::EmptyField,
        FieldValidationError::InvalidEmail { .. } => ValidationCode::InvalidEmail,
        FieldValidationError::PasswordTooShort { .. } => ValidationCode::PasswordTooShort,
    };
    field_error(err.to_string(), err.field(), code)
}

/// Map a login validation failure to a `400` error.
pub(crate) fn map_login_error(err: LoginValidationError) -> Error {
    let field = match err {
        LoginValidationError::EmptyUsername => "username",
        LoginValidationError::EmptyPassword => "password",
    };
    field_error(err.to_string(), field, ValidationCode::EmptyField)
}

fn malformed(message: String, code: ValidationCode) -> actix_web::Error {
    Error::invalid_request(message)
        .with_details(json!({ "code": code.as_str() }))
        .into()
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    malformed(err.to_string(), ValidationCode::MalformedBody)
}

fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    malformed(err.to_string(), ValidationCode::MalformedPath)
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    malformed(err.to_string(), ValidationCode::MalformedQuery)
}

/// Register extractor configs so malformed JSON bodies, paths and queries
/// produce the standard error payload instead of actix plain text.
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FieldValidationError::EmptyField { field: "firstName" }, "firstName", "empty_field")]
    #[case(FieldValidationError::InvalidEmail { field: "email" }, "email", "invalid_email")]
    #[case(FieldValidationError::PasswordTooShort { min: 6 }, "password", "password_too_short")]
    fn field_errors_name_the_field(
        #[case] err: FieldValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let mapped = map_field_error(err);
        assert_eq!(mapped.code(), crate::domain::ErrorCode::InvalidRequest);
        assert_eq!(mapped.details(), Some(&json!({ "field": field, "code": code })));
    }

    #[test]
    fn login_errors_keep_the_domain_message() {
        let mapped = map_login_error(LoginValidationError::EmptyPassword);
        assert_eq!(mapped.message(), "password must not be empty");
    }
}
