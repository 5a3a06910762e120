use std::task::{Context, Poll};

use faultline_core::{BoxError, TracingSink, classify};
use futures_util::TryFutureExt;
use futures_util::future::MapErr;
use tower::{Layer, Service};

/// Convert an error leaving a gRPC service
///
/// If the root cause is a [`StructuredError`](faultline_core::StructuredError)
/// it is logged and replaced by its gRPC status. Anything else passes
/// through unchanged.
pub fn to_rpc_boundary(err: BoxError) -> BoxError {
    let Some(status) = classify(&*err).map(|structured| {
        structured.log(&TracingSink);
        structured.to_rpc_status()
    }) else {
        return err;
    };

    Box::new(status)
}

/// Layer applying [`to_rpc_boundary`] to every error of the inner service
#[derive(Debug, Clone, Copy, Default)]
pub struct RpcErrorLayer;

impl<S> Layer<S> for RpcErrorLayer {
    type Service = RpcErrorService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RpcErrorService { inner }
    }
}

/// Service produced by [`RpcErrorLayer`]
#[derive(Debug, Clone)]
pub struct RpcErrorService<S> {
    inner: S,
}

impl<S, Request> Service<Request> for RpcErrorService<S>
where
    S: Service<Request>,
    S::Error: Into<BoxError>,
{
    type Response = S::Response;
    type Error = BoxError;
    type Future = MapErr<S::Future, fn(S::Error) -> BoxError>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(convert::<S::Error>)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        self.inner
            .call(request)
            .map_err(convert::<S::Error> as fn(S::Error) -> BoxError)
    }
}

fn convert<E: Into<BoxError>>(err: E) -> BoxError {
    to_rpc_boundary(err.into())
}

#[cfg(test)]
mod tests {
    use faultline_core::{ErrorCode, StructuredError, annotate};
    use tonic::{Code, Status};
    use tower::{ServiceBuilder, ServiceExt, service_fn};

    use super::*;

    #[test]
    fn structured_error_becomes_status() {
        let err = to_rpc_boundary(Box::new(StructuredError::not_found()));
        let status = err.downcast_ref::<Status>().unwrap();

        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(
            StructuredError::from_rpc_status(status).map(|e| e.code()),
            Some(ErrorCode::NOT_FOUND)
        );
    }

    #[test]
    fn annotated_error_is_unwrapped_to_root() {
        let original = StructuredError::forbidden().with_internal_message("tenant mismatch");
        let err = to_rpc_boundary(Box::new(annotate(original.clone(), "authorize")));
        let status = err.downcast_ref::<Status>().unwrap();

        assert_eq!(status.code(), Code::PermissionDenied);
        assert_eq!(StructuredError::from_rpc_status(status), Some(original));
    }

    #[test]
    fn foreign_error_passes_through() {
        let err = to_rpc_boundary(Box::new(std::io::Error::other("broken pipe")));

        assert!(err.downcast_ref::<Status>().is_none());
        assert_eq!(err.to_string(), "broken pipe");
    }

    #[test]
    fn existing_status_passes_through() {
        let err = to_rpc_boundary(Box::new(Status::unavailable("connect failed")));
        let status = err.downcast_ref::<Status>().unwrap();

        assert_eq!(status.code(), Code::Unavailable);
        assert_eq!(status.message(), "connect failed");
    }

    #[tokio::test]
    async fn layer_converts_handler_errors() {
        let service = ServiceBuilder::new().layer(RpcErrorLayer).service(service_fn(|_: ()| async {
            Err::<(), _>(annotate(StructuredError::timeout(), "query ledger"))
        }));

        let err = service.oneshot(()).await.unwrap_err();
        let status = err.downcast_ref::<Status>().unwrap();

        assert_eq!(status.code(), Code::DeadlineExceeded);
    }

    #[tokio::test]
    async fn layer_leaves_success_untouched() {
        let service = ServiceBuilder::new()
            .layer(RpcErrorLayer)
            .service(service_fn(|n: u32| async move { Ok::<_, BoxError>(n * 2) }));

        assert_eq!(service.oneshot(21).await.unwrap(), 42);
    }
}
