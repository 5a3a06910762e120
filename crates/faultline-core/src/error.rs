use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::chain::Annotated;
use crate::http_error::HttpError;
use crate::message::{self, MSG_INTERNAL};
use crate::{ErrorCode, LogLevel};

/// Error value shared by the HTTP and gRPC surfaces
///
/// Carries a machine-readable code, a message safe to show end users, a
/// diagnostic message that only ever reaches logs, and the level it should
/// be logged at. Values are immutable: annotation methods consume the error
/// and hand back a new one.
///
/// Field order matters, it is the order of the wire encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredError {
    code: ErrorCode,
    #[serde(rename = "f_msg")]
    client_message: String,
    #[serde(rename = "b_msg")]
    internal_message: String,
    #[serde(rename = "i_level")]
    level: LogLevel,
}

/// Construction settings for a [`StructuredError`]
///
/// Defaults to an internal server error logged at [`LogLevel::Error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorOptions {
    /// Error code, defaults to [`ErrorCode::INTERNAL`]
    pub code: ErrorCode,
    /// Client-facing message, defaults to the internal-error table entry
    pub client_message: String,
    /// Log severity, defaults to [`LogLevel::Error`]
    pub level: LogLevel,
}

impl Default for ErrorOptions {
    fn default() -> Self {
        Self {
            code: ErrorCode::INTERNAL,
            client_message: MSG_INTERNAL.to_owned(),
            level: LogLevel::Error,
        }
    }
}

impl ErrorOptions {
    #[must_use]
    pub const fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = code;
        self
    }

    #[must_use]
    pub fn with_client_message(mut self, message: impl Into<String>) -> Self {
        self.client_message = message.into();
        self
    }

    #[must_use]
    pub const fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Build the error
    pub fn build(self) -> StructuredError {
        StructuredError::new(self)
    }
}

impl StructuredError {
    /// Create an error from explicit options
    pub fn new(options: ErrorOptions) -> Self {
        Self {
            code: options.code,
            client_message: options.client_message,
            internal_message: String::new(),
            level: options.level,
        }
    }

    /// Create an error with a code and client message, ignoring the message table
    pub fn with_code_message(code: ErrorCode, message: impl Into<String>) -> Self {
        ErrorOptions::default().with_code(code).with_client_message(message).build()
    }

    /// Create an error with a code, client message and log level
    pub fn with_code_message_level(code: ErrorCode, message: impl Into<String>, level: LogLevel) -> Self {
        ErrorOptions::default()
            .with_code(code)
            .with_client_message(message)
            .with_level(level)
            .build()
    }

    /// Create an error whose client message comes from the message table
    ///
    /// Codes outside the enumeration get [`message::MSG_UNKNOWN`].
    pub fn from_code(code: ErrorCode) -> Self {
        Self::with_code_message(code, message::default_message(code))
    }

    pub fn bad_request() -> Self {
        Self::from_code(ErrorCode::BAD_REQUEST)
    }

    pub fn unauthorized() -> Self {
        Self::from_code(ErrorCode::UNAUTHORIZED)
    }

    pub fn forbidden() -> Self {
        Self::from_code(ErrorCode::FORBIDDEN)
    }

    pub fn not_found() -> Self {
        Self::from_code(ErrorCode::NOT_FOUND)
    }

    pub fn conflict() -> Self {
        Self::from_code(ErrorCode::CONFLICT)
    }

    pub fn too_many_requests() -> Self {
        Self::from_code(ErrorCode::TOO_MANY_REQUESTS)
    }

    pub fn client_closed() -> Self {
        Self::from_code(ErrorCode::CLIENT_CLOSED)
    }

    pub fn internal() -> Self {
        Self::from_code(ErrorCode::INTERNAL)
    }

    pub fn not_implemented() -> Self {
        Self::from_code(ErrorCode::NOT_IMPLEMENTED)
    }

    pub fn unavailable() -> Self {
        Self::from_code(ErrorCode::UNAVAILABLE)
    }

    pub fn timeout() -> Self {
        Self::from_code(ErrorCode::TIMEOUT)
    }

    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn client_message(&self) -> &str {
        &self.client_message
    }

    pub fn internal_message(&self) -> &str {
        &self.internal_message
    }

    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Replace the internal diagnostic message
    #[must_use]
    pub fn with_internal_message(mut self, message: impl Into<String>) -> Self {
        self.internal_message = message.into();
        self
    }

    /// Append to the internal diagnostic message, separated by `": "`
    #[must_use]
    pub fn append_internal_message(mut self, message: impl AsRef<str>) -> Self {
        if !self.internal_message.is_empty() {
            self.internal_message.push_str(": ");
        }
        self.internal_message.push_str(message.as_ref());
        self
    }

    /// Record `message` as the internal message and wrap the error with it
    ///
    /// The wrapper remembers the caller's source location.
    #[track_caller]
    pub fn context(self, message: impl Into<String>) -> Annotated {
        let message = message.into();
        Annotated::new(self.with_internal_message(message.clone()), message)
    }

    /// HTTP status paired with the client-safe response body
    ///
    /// The internal message is never part of the result.
    pub fn to_http_result(&self) -> (StatusCode, HttpResult) {
        (
            self.code.http_status(),
            HttpResult {
                code: self.code.as_i32(),
                msg: self.client_message.clone(),
            },
        )
    }
}

impl Default for StructuredError {
    fn default() -> Self {
        Self::new(ErrorOptions::default())
    }
}

impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.client_message)?;
        if !self.internal_message.is_empty() {
            write!(f, " ({})", self.internal_message)?;
        }
        Ok(())
    }
}

impl std::error::Error for StructuredError {}

/// Body returned to HTTP clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResult {
    pub code: i32,
    pub msg: String,
}

impl HttpError for StructuredError {
    fn status_code(&self) -> StatusCode {
        self.code.http_status()
    }

    fn client_message(&self) -> String {
        self.client_message.clone()
    }

    fn body(&self) -> serde_json::Value {
        let (_, result) = self.to_http_result();
        serde_json::json!({ "code": result.code, "msg": result.msg })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{MSG_NOT_FOUND, MSG_UNKNOWN};

    #[test]
    fn defaults_to_internal_error() {
        let err = StructuredError::default();
        assert_eq!(err.code(), ErrorCode::INTERNAL);
        assert_eq!(err.client_message(), MSG_INTERNAL);
        assert_eq!(err.internal_message(), "");
        assert_eq!(err.level(), LogLevel::Error);
    }

    #[test]
    fn options_override_defaults() {
        let err = ErrorOptions::default()
            .with_code(ErrorCode::new(50))
            .with_client_message("test_new")
            .with_level(LogLevel::Info)
            .build();

        assert_eq!(err.code(), ErrorCode::new(50));
        assert_eq!(err.client_message(), "test_new");
        assert_eq!(err.level(), LogLevel::Info);
    }

    #[test]
    fn convenience_constructors_use_table_messages() {
        let cases = [
            (StructuredError::bad_request(), ErrorCode::BAD_REQUEST),
            (StructuredError::unauthorized(), ErrorCode::UNAUTHORIZED),
            (StructuredError::forbidden(), ErrorCode::FORBIDDEN),
            (StructuredError::not_found(), ErrorCode::NOT_FOUND),
            (StructuredError::conflict(), ErrorCode::CONFLICT),
            (StructuredError::too_many_requests(), ErrorCode::TOO_MANY_REQUESTS),
            (StructuredError::client_closed(), ErrorCode::CLIENT_CLOSED),
            (StructuredError::internal(), ErrorCode::INTERNAL),
            (StructuredError::not_implemented(), ErrorCode::NOT_IMPLEMENTED),
            (StructuredError::unavailable(), ErrorCode::UNAVAILABLE),
            (StructuredError::timeout(), ErrorCode::TIMEOUT),
        ];

        for (err, code) in cases {
            assert_eq!(err.code(), code);
            assert_eq!(err.client_message(), message::default_message(code));
            assert_eq!(err.level(), LogLevel::Error);
        }
    }

    #[test]
    fn code_message_ignores_table() {
        let err = StructuredError::with_code_message(ErrorCode::NOT_FOUND, "no such user");
        assert_eq!(err.client_message(), "no such user");
        assert_eq!(err.level(), LogLevel::Error);
    }

    #[test]
    fn unregistered_code_gets_unknown_message() {
        let err = StructuredError::from_code(ErrorCode::new(9999));
        assert_eq!(err.code().as_i32(), 9999);
        assert_eq!(err.client_message(), MSG_UNKNOWN);
    }

    #[test]
    fn annotation_returns_new_value() {
        let original = StructuredError::conflict();
        let annotated = original.clone().with_internal_message("version 3 != 4");

        assert_eq!(original.internal_message(), "");
        assert_eq!(annotated.internal_message(), "version 3 != 4");
        assert_eq!(annotated.code(), original.code());
    }

    #[test]
    fn append_joins_with_separator() {
        let err = StructuredError::internal()
            .append_internal_message("db query failed")
            .append_internal_message("connection reset");

        assert_eq!(err.internal_message(), "db query failed: connection reset");
    }

    #[test]
    fn not_found_http_result() {
        let (status, body) = StructuredError::not_found().to_http_result();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            HttpResult {
                code: 404,
                msg: MSG_NOT_FOUND.to_owned()
            }
        );
    }

    #[test]
    fn http_result_hides_internal_message() {
        let err = StructuredError::forbidden().with_internal_message("role=guest");
        let body = err.body();

        assert_eq!(body["code"], 403);
        assert_eq!(body["msg"], "您没有访问权限");
        assert!(!body.to_string().contains("role=guest"));
    }

    #[test]
    fn client_closed_http_result_is_500() {
        let (status, body) = StructuredError::client_closed().to_http_result();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, 499);
    }

    #[test]
    fn display_includes_internal_message_when_set() {
        let err = StructuredError::with_code_message(ErrorCode::NOT_FOUND, "missing");
        assert_eq!(err.to_string(), "[404] missing");
        assert_eq!(err.with_internal_message("id=7").to_string(), "[404] missing (id=7)");
    }
}
