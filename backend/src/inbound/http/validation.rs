//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejected request becomes an `invalid_request` error whose details
//! name the offending `field` and a stable `code`.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use serde_json::json;

use crate::domain::{AccountValidationError, DomainError, UserId};

/// Validation error codes raised by the HTTP layer itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidBody,
    InvalidId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::InvalidId => "invalid_id",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    fn with_code(self, code: &str) -> DomainError {
        DomainError::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code,
        }))
    }

    fn with_value(self, code: &str, value: impl Into<String>) -> DomainError {
        DomainError::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code,
        }))
    }
}

/// Translate a value-type rejection into a client error.
pub(crate) fn account_validation_error(err: AccountValidationError) -> DomainError {
    ValidationError::new(err.field(), err.to_string()).with_code(err.code())
}

/// Like [`account_validation_error`] but reports the failure against the
/// request field that carried the value, e.g. `email` or `oldPassword`.
pub(crate) fn validate_field<T>(
    result: Result<T, AccountValidationError>,
    field: FieldName,
) -> Result<T, DomainError> {
    result.map_err(|err| ValidationError::new(field.as_str(), err.to_string()).with_code(err.code()))
}

pub(crate) fn invalid_id_error(field: FieldName, value: &str) -> DomainError {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidId.as_str(), value)
}

pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, DomainError> {
    UserId::new(value).map_err(|_| invalid_id_error(field, value))
}

fn invalid_body_error(err: &JsonPayloadError) -> DomainError {
    DomainError::invalid_request("request body is not valid JSON for this endpoint").with_details(json!({
        "field": "body",
        "code": ErrorCode::InvalidBody.as_str(),
        "reason": err.to_string(),
    }))
}

/// JSON extractor configuration that reports malformed bodies with the
/// standard error envelope.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| invalid_body_error(&err).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode as DomainErrorCode, Password, PersonName};
    use rstest::rstest;

    #[rstest]
    fn value_type_rejection_names_field_and_code() {
        let err = PersonName::new("K").expect_err("single character name");

        let mapped = account_validation_error(err);

        assert_eq!(mapped.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(mapped.message(), "name must be at least 2 characters");
        assert_eq!(
            mapped.details(),
            Some(&json!({"field": "name", "code": "too_short"}))
        );
    }

    #[rstest]
    fn validate_field_reports_the_wire_name() {
        let err = validate_field(Password::new(""), FieldName::new("oldPassword"))
            .expect_err("empty password");

        assert_eq!(
            err.details(),
            Some(&json!({"field": "oldPassword", "code": "empty"}))
        );
    }

    #[rstest]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6", true)]
    #[case("not-a-uuid", false)]
    #[case("", false)]
    fn parse_user_id_reports_the_raw_value(#[case] raw: &str, #[case] ok: bool) {
        let result = parse_user_id(raw, FieldName::new("id"));

        match (result, ok) {
            (Ok(id), true) => assert_eq!(id.to_string(), raw),
            (Err(err), false) => assert_eq!(
                err.details(),
                Some(&json!({"field": "id", "value": raw, "code": "invalid_id"}))
            ),
            (other, _) => panic!("unexpected outcome for {raw:?}: {other:?}"),
        }
    }
}
