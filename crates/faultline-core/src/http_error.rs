use http::StatusCode;

/// Errors that can be rendered as HTTP responses
///
/// The server layer turns these into actual responses, keeping error types
/// decoupled from axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;

    /// JSON response body
    ///
    /// Defaults to `{"code": <status>, "msg": <client message>}`.
    fn body(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.status_code().as_u16(),
            "msg": self.client_message(),
        })
    }
}
