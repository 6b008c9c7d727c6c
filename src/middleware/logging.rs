//! Request/response logging middleware.
//!
//! Logs `method` and `path` when a request enters the stage and the final
//! status code when the rest of the pipeline returns, whether that status
//! came from a handler, a handler error, or an authentication rejection.
//! If a panic unwinds through this stage nothing is logged on exit; the
//! exception stage outside it reports the fault instead.
//!
//! Each line carries a `request_id` field taken from an incoming
//! `X-Request-Id` header or freshly generated. The id is only used for log
//! correlation: the stage never modifies the request or the response.

use std::task::{Context, Poll};
use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};
use tower::{Layer, Service};
use tracing::info;
use uuid::Uuid;

use crate::metrics;

/// Header consulted for an upstream correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Logging layer for the Tower middleware stack.
#[derive(Clone, Default)]
pub struct RequestLoggingLayer;

impl RequestLoggingLayer {
    /// Create a new logging layer.
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RequestLoggingLayer {
    type Service = RequestLoggingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLoggingService { inner }
    }
}

/// Logging service wrapper.
#[derive(Clone)]
pub struct RequestLoggingService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestLoggingService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let request_id = extract_or_generate_request_id(&req);
        let method = req.method().clone();
        let path = req.uri().path().to_owned();

        info!(request_id = %request_id, method = %method, path = %path, "HTTP request");

        let mut inner = self.inner.clone();
        let started = Instant::now();

        Box::pin(async move {
            let response = inner.call(req).await?;

            let status = response.status();
            let elapsed = started.elapsed();
            info!(
                request_id = %request_id,
                status = status.as_u16(),
                latency_ms = elapsed.as_millis() as u64,
                "HTTP response"
            );
            metrics::record_request(method.as_str(), status.as_u16(), elapsed.as_secs_f64());

            Ok(response)
        })
    }
}

/// Extract request ID from headers or generate a new one.
fn extract_or_generate_request_id<B>(req: &Request<B>) -> String {
    if let Some(header_value) = req.headers().get(REQUEST_ID_HEADER)
        && let Ok(value) = header_value.to_str()
        && !value.is_empty()
    {
        return value.to_string();
    }

    Uuid::new_v4().to_string()
}
