//! Handlers that expose the translation tables over HTTP

#![allow(clippy::unused_async)]

use axum::extract::Path;
use faultline_core::{ErrorCode, StructuredError, TracingSink, WireError};
use http::StatusCode;

use crate::HttpErrorResponse;

/// `GET /codes/{code}`: the HTTP result a service returns for `code`
pub async fn code_handler(Path(code): Path<i32>) -> HttpErrorResponse<StructuredError> {
    HttpErrorResponse(StructuredError::from_code(ErrorCode::new(code)))
}

/// `POST /decode`: render a wire-encoded error as its HTTP result
///
/// The decoded error is logged at its own level.
///
/// # Errors
///
/// Responds with 400 if the body is not a wire-encoded error
#[allow(clippy::needless_pass_by_value)]
pub async fn decode_handler(
    body: String,
) -> Result<HttpErrorResponse<StructuredError>, HttpErrorResponse<WireError>> {
    let err = StructuredError::from_wire(body.trim()).map_err(|e| {
        tracing::debug!(error = %e, "rejected wire payload");
        HttpErrorResponse(e)
    })?;

    err.log(&TracingSink);
    Ok(HttpErrorResponse(err))
}

/// Health check handler
pub async fn health_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
