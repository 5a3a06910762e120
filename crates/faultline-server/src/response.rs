use axum::Json;
use axum::response::{IntoResponse, Response};
use faultline_core::{Annotated, BoxError, HttpError, LogSink, StructuredError, TracingSink, classify};

/// Response wrapper for any [`HttpError`]
///
/// Renders the error's status code and JSON body. For a
/// [`StructuredError`] the body is `{"code": <code>, "msg": <client message>}`.
#[derive(Debug)]
pub struct HttpErrorResponse<E>(pub E);

impl<E: HttpError> From<E> for HttpErrorResponse<E> {
    fn from(err: E) -> Self {
        Self(err)
    }
}

impl<E: HttpError> IntoResponse for HttpErrorResponse<E> {
    fn into_response(self) -> Response {
        (self.0.status_code(), Json(self.0.body())).into_response()
    }
}

/// Response for an arbitrary handler error
///
/// Errors whose root cause is a [`StructuredError`] are logged and rendered
/// from it; anything else is logged and rendered as an internal error.
#[derive(Debug)]
pub struct ClassifiedResponse(pub BoxError);

impl From<BoxError> for ClassifiedResponse {
    fn from(err: BoxError) -> Self {
        Self(err)
    }
}

impl From<Annotated> for ClassifiedResponse {
    fn from(err: Annotated) -> Self {
        Self(Box::new(err))
    }
}

impl ClassifiedResponse {
    /// Structured form of the wrapped error
    ///
    /// Unclassified errors become an internal error carrying their display
    /// text as the internal message.
    pub fn structured(&self) -> StructuredError {
        classify(&*self.0).cloned().unwrap_or_else(|| {
            StructuredError::internal().with_internal_message(format!("unclassified handler error: {}", self.0))
        })
    }

    fn render(self, sink: &dyn LogSink) -> Response {
        let structured = self.structured();
        structured.log(sink);
        HttpErrorResponse(structured).into_response()
    }
}

impl IntoResponse for ClassifiedResponse {
    fn into_response(self) -> Response {
        self.render(&TracingSink)
    }
}
