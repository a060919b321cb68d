//! Request metrics middleware.
//!
//! Records request duration and response status on a `tracing` span rather
//! than through a metrics crate.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use products_core::Request;
use tower::{Layer, Service};
use tracing::{info_span, Instrument};

use crate::api::ApiResponse;

// ---------------------------------------------------------------------------
// MetricsLayer
// ---------------------------------------------------------------------------

/// Tower layer that instruments product requests with timing via `tracing` spans.
#[derive(Debug, Clone)]
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsService { inner }
    }
}

// ---------------------------------------------------------------------------
// MetricsService
// ---------------------------------------------------------------------------

/// Service wrapper that records method, status and duration per request.
#[derive(Debug, Clone)]
pub struct MetricsService<S> {
    inner: S,
}

impl<S> Service<Request> for MetricsService<S>
where
    S: Service<Request, Response = ApiResponse, Error = Infallible> + Send,
    S::Future: Send + 'static,
{
    type Response = ApiResponse;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<ApiResponse, Infallible>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let span = info_span!(
            "product_request",
            method = %request.method,
            status = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        );
        let method = request.method.clone();

        let fut = self.inner.call(request);

        Box::pin(
            async move {
                let start = Instant::now();
                let result = fut.await;

                #[allow(clippy::cast_possible_truncation)]
                let duration_ms = start.elapsed().as_millis() as u64;

                if let Ok(response) = &result {
                    let status = response.status.as_u16();
                    tracing::Span::current().record("status", status);
                    tracing::Span::current().record("duration_ms", duration_ms);
                    tracing::info!(
                        method = %method,
                        status,
                        duration_ms,
                        "product request complete"
                    );
                }

                result
            }
            .instrument(span),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use tower::ServiceExt;

    use super::*;
    use crate::service::operation::InvalidOperationError;

    /// Immediately-completing service that rejects every request.
    struct RejectingService;

    impl Service<Request> for RejectingService {
        type Response = ApiResponse;
        type Error = Infallible;
        type Future = Pin<Box<dyn Future<Output = Result<ApiResponse, Infallible>> + Send>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, request: Request) -> Self::Future {
            let err = InvalidOperationError::new(&request.method);
            Box::pin(async move { Ok(ApiResponse::from_result(Err(err.into()))) })
        }
    }

    #[tokio::test]
    async fn metrics_layer_passes_through_response() {
        let svc = MetricsLayer.layer(RejectingService);

        let response = svc.oneshot(Request::new("", "PUT")).await.unwrap();

        assert_eq!(response.status, http::StatusCode::METHOD_NOT_ALLOWED);
    }
}
