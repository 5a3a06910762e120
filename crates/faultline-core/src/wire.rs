//! Wire encoding of [`StructuredError`]
//!
//! The encoding is a JSON object with exactly four fields in fixed order:
//!
//! ```text
//! {"code":404,"f_msg":"...","b_msg":"...","i_level":2}
//! ```
//!
//! It travels as the message of a gRPC status, so both peers must agree on
//! the field names and the level ordinals.

use std::str::FromStr;

use http::StatusCode;
use thiserror::Error;

use crate::StructuredError;
use crate::http_error::HttpError;

/// Failure to decode a wire string into a [`StructuredError`]
#[derive(Debug, Error)]
pub enum WireError {
    /// Input is not a well-formed encoding (bad JSON, missing field, wrong type)
    #[error("malformed structured error: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl HttpError for WireError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn client_message(&self) -> String {
        "malformed structured error payload".to_string()
    }
}

impl StructuredError {
    /// Encode for the wire
    ///
    /// # Panics
    ///
    /// Never in practice: every field is a string or an integer.
    pub fn to_wire(&self) -> String {
        serde_json::to_string(self).expect("structured error serializes to JSON")
    }

    /// Decode a wire string
    ///
    /// Extra fields are ignored; every one of the four known fields must be
    /// present with the right type.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Malformed`] if the input does not follow the encoding
    pub fn from_wire(input: &str) -> Result<Self, WireError> {
        Ok(serde_json::from_str(input)?)
    }
}

impl FromStr for StructuredError {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorCode, ErrorOptions, LogLevel};

    #[test]
    fn encodes_fields_in_fixed_order() {
        let err = StructuredError::not_found().with_internal_message("user 42");
        insta::assert_snapshot!(err.to_wire(), @r#"{"code":404,"f_msg":"没有找到资源","b_msg":"user 42","i_level":2}"#);
    }

    #[test]
    fn encodes_debug_level_as_negative_ordinal() {
        let err = ErrorOptions::default()
            .with_code(ErrorCode::new(7))
            .with_client_message("m")
            .with_level(LogLevel::Debug)
            .build();
        insta::assert_snapshot!(err.to_wire(), @r#"{"code":7,"f_msg":"m","b_msg":"","i_level":-1}"#);
    }

    #[test]
    fn round_trips() {
        let errors = [
            StructuredError::default(),
            StructuredError::conflict().with_internal_message("row version mismatch"),
            StructuredError::with_code_message_level(ErrorCode::new(9999), "custom", LogLevel::Warn),
            StructuredError::with_code_message(ErrorCode::TIMEOUT, "quote \" and \\ backslash\n")
                .with_internal_message("{\"nested\":true}"),
        ];

        for err in errors {
            assert_eq!(StructuredError::from_wire(&err.to_wire()).unwrap(), err);
        }
    }

    #[test]
    fn from_str_matches_from_wire() {
        let err = StructuredError::unauthorized();
        let parsed: StructuredError = err.to_wire().parse().unwrap();
        assert_eq!(parsed, err);
    }

    #[test]
    fn ignores_unknown_fields() {
        let parsed =
            StructuredError::from_wire(r#"{"code":400,"f_msg":"a","b_msg":"b","i_level":0,"trace":"x"}"#).unwrap();
        assert_eq!(parsed.code(), ErrorCode::BAD_REQUEST);
        assert_eq!(parsed.level(), LogLevel::Info);
    }

    #[test]
    fn rejects_malformed_input() {
        let inputs = [
            "",
            "not json",
            "rpc error: code = NotFound desc = gone",
            r#"{"code":404,"f_msg":"a","b_msg":"b"}"#,
            r#"{"code":"404","f_msg":"a","b_msg":"b","i_level":2}"#,
            r#"{"code":404,"f_msg":1,"b_msg":"b","i_level":2}"#,
            r#"{"code":404,"f_msg":"a","b_msg":"b","i_level":42}"#,
        ];

        for input in inputs {
            let err = StructuredError::from_wire(input).unwrap_err();
            assert!(err.to_string().starts_with("malformed structured error"), "{input}");
        }
    }

    #[test]
    fn decode_failure_is_a_bad_request() {
        let err = StructuredError::from_wire("{").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body()["code"], 400);
    }
}
