//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{Error, UserId, UserValidationError, Username};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUserId,
    InvalidUsername,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUserId => "invalid_user_id",
            ErrorCode::InvalidUsername => "invalid_username",
        }
    }
}

fn field_error(field: &str, code: ErrorCode, message: String, value: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "value": value.into(),
        "code": code.as_str(),
    }))
}

/// Parse a `userId` path segment.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    raw.parse::<UserId>().map_err(|err: UserValidationError| {
        field_error("userId", ErrorCode::InvalidUserId, err.to_string(), raw)
    })
}

/// Validate a `userId` taken from a JSON body.
pub(crate) fn user_id_from_body(raw: i32) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| {
        field_error("userId", ErrorCode::InvalidUserId, err.to_string(), raw.to_string())
    })
}

/// Validate an optional `username` from a JSON body.
pub(crate) fn parse_optional_username(raw: Option<String>) -> Result<Option<Username>, Error> {
    raw.map(|value| {
        Username::new(value.clone()).map_err(|err| {
            field_error("username", ErrorCode::InvalidUsername, err.to_string(), value)
        })
    })
    .transpose()
}
