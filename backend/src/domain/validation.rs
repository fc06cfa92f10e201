//! Validation helpers shared by record and account entities.

/// Field-level validation failures raised by entity constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldValidationError {
    /// A required text field was blank once trimmed.
    #[error("{field} must not be empty")]
    EmptyField {
        /// JSON name of the offending field.
        field: &'static str,
    },
    /// An email address did not have the `local@domain` shape.
    #[error("{field} must be a valid email address")]
    InvalidEmail {
        /// JSON name of the offending field.
        field: &'static str,
    },
    /// A password was shorter than the accepted minimum.
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted length in characters.
        min: usize,
    },
}

impl FieldValidationError {
    /// JSON name of the field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyField { field } | Self::InvalidEmail { field } => field,
            Self::PasswordTooShort { .. } => "password",
        }
    }
}

pub(crate) fn non_blank(value: &str, field: &'static str) -> Result<String, FieldValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldValidationError::EmptyField { field });
    }
    Ok(trimmed.to_owned())
}

pub(crate) fn email(value: &str, field: &'static str) -> Result<String, FieldValidationError> {
    let trimmed = non_blank(value, field)?;
    let mut parts = trimmed.split('@');
    let shape_ok = matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
    );
    if !shape_ok || trimmed.chars().any(char::is_whitespace) {
        return Err(FieldValidationError::InvalidEmail { field });
    }
    Ok(trimmed)
}

/// Validate an optional patch field, leaving absent values untouched.
pub(crate) fn optional<F>(
    value: Option<&str>,
    field: &'static str,
    check: F,
) -> Result<Option<String>, FieldValidationError>
where
    F: Fn(&str, &'static str) -> Result<String, FieldValidationError>,
{
    value.map(|raw| check(raw, field)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("john.smith@philosophe.edu", true)]
    #[case("  padded@example.org ", true)]
    #[case("no-at-sign", false)]
    #[case("@example.org", false)]
    #[case("user@", false)]
    #[case("a@b@c", false)]
    #[case("sp ace@example.org", false)]
    fn email_shape(#[case] raw: &str, #[case] accepted: bool) {
        assert_eq!(email(raw, "email").is_ok(), accepted, "{raw}");
    }

    #[rstest]
    fn non_blank_trims() {
        assert_eq!(non_blank("  Oxford ", "name"), Ok("Oxford".to_owned()));
        assert_eq!(
            non_blank("   ", "name"),
            Err(FieldValidationError::EmptyField { field: "name" })
        );
    }

    #[rstest]
    fn optional_skips_absent_values() {
        assert_eq!(optional(None, "email", email), Ok(None));
        assert!(optional(Some("bad"), "email", email).is_err());
    }
}
