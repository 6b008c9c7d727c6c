//! Bearer token authentication middleware.
//!
//! Every request must carry the shared token in the `Authorization`
//! header:
//!
//! ```bash
//! curl -H "Authorization: Bearer TestToken" http://localhost:3000/users
//! ```
//!
//! # Matching Rules
//!
//! The check is deliberately literal:
//!
//! - Every occurrence of `"Bearer "` is removed from the header value (not
//!   only a leading one, and not case-insensitively)
//! - What remains must equal the configured token exactly (case-sensitive)
//! - Repeated `Authorization` headers are joined with `,` before matching,
//!   so a valid token followed by any second value is rejected
//! - A bare `TestToken` without the scheme is therefore accepted, while
//!   `bearer TestToken` is not
//!
//! Comparison is constant-time. There are no bypass paths: unmatched routes
//! are authenticated too.
//!
//! # Rejection
//!
//! A rejected request never reaches the inner service. The response is
//! `401` with the plain-text body `Unauthorized`.

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::{Request, Response};
use axum::response::IntoResponse;
use subtle::ConstantTimeEq;
use tower::{Layer, Service};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::metrics;

/// Scheme prefix stripped from the header value before comparison.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Bearer token authentication layer.
#[derive(Clone)]
pub struct BearerAuth {
    expected_token: Arc<str>,
}

impl BearerAuth {
    /// Create a layer accepting exactly `token`.
    pub fn new(token: impl Into<Arc<str>>) -> Self {
        Self {
            expected_token: token.into(),
        }
    }
}

impl<S> Layer<S> for BearerAuth {
    type Service = BearerAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BearerAuthService {
            inner,
            expected_token: self.expected_token.clone(),
        }
    }
}

/// Bearer token authentication service wrapper.
#[derive(Clone)]
pub struct BearerAuthService<S> {
    inner: S,
    expected_token: Arc<str>,
}

impl<S> Service<Request<Body>> for BearerAuthService<S>
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
        let expected_token = self.expected_token.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let verdict =
                extract_authorization(&req).map(|value| token_matches(&value, &expected_token));

            match verdict {
                Some(true) => {
                    debug!("Bearer token accepted");
                    inner.call(req).await
                }
                Some(false) => {
                    warn!(
                        method = %req.method(),
                        path = %req.uri().path(),
                        "Invalid bearer token"
                    );
                    metrics::record_auth_rejection();
                    Ok(AppError::Unauthorized.into_response())
                }
                None => {
                    warn!(
                        method = %req.method(),
                        path = %req.uri().path(),
                        "Missing Authorization header"
                    );
                    metrics::record_auth_rejection();
                    Ok(AppError::Unauthorized.into_response())
                }
            }
        })
    }
}

/// Read every `Authorization` header as one comma-joined text value.
///
/// A header set containing a value that is not visible ASCII is treated as
/// absent.
fn extract_authorization<B>(req: &Request<B>) -> Option<String> {
    let values = req
        .headers()
        .get_all(AUTHORIZATION)
        .iter()
        .map(|value| value.to_str().ok())
        .collect::<Option<Vec<_>>>()?;

    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}

/// Strip every `"Bearer "` from `header_value` and compare the rest to `expected`.
fn token_matches(header_value: &str, expected: &str) -> bool {
    let presented = header_value.replace(BEARER_PREFIX, "");
    constant_time_eq(&presented, expected)
}

/// Perform constant-time comparison of two strings.
fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use tower::{ServiceExt, service_fn};

    use super::*;

    #[test]
    fn test_token_matches_bearer_scheme() {
        assert!(token_matches("Bearer TestToken", "TestToken"));
    }

    #[test]
    fn test_token_matches_without_scheme() {
        assert!(token_matches("TestToken", "TestToken"));
    }

    #[test]
    fn test_token_matches_repeated_scheme() {
        assert!(token_matches("Bearer Bearer TestToken", "TestToken"));
        assert!(token_matches("TestBearer Token", "TestToken"));
    }

    #[test]
    fn test_token_is_case_sensitive() {
        assert!(!token_matches("Bearer testtoken", "TestToken"));
        assert!(!token_matches("bearer TestToken", "TestToken"));
        assert!(!token_matches("BEARER TestToken", "TestToken"));
    }

    #[test]
    fn test_token_rejects_extra_whitespace() {
        assert!(!token_matches("Bearer  TestToken", "TestToken"));
        assert!(!token_matches("Bearer TestToken ", "TestToken"));
        assert!(!token_matches("", "TestToken"));
    }

    #[test]
    fn test_extract_authorization_missing() {
        let req = Request::builder().body(Body::empty()).unwrap();
        assert!(extract_authorization(&req).is_none());
    }

    #[test]
    fn test_extract_authorization_joins_repeated_headers() {
        let req = Request::builder()
            .header(AUTHORIZATION, "Bearer TestToken")
            .header(AUTHORIZATION, "Bearer Other")
            .body(Body::empty())
            .unwrap();
        assert_eq!(
            extract_authorization(&req).as_deref(),
            Some("Bearer TestToken,Bearer Other")
        );
    }

    #[test]
    fn test_constant_time_eq_different_lengths() {
        assert!(!constant_time_eq("short", "much-longer-string"));
        assert!(constant_time_eq("same", "same"));
    }

    async fn call_with(headers: &[&str]) -> (StatusCode, String, usize) {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let inner = service_fn(move |_req: Request<Body>| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Infallible>(Response::new(Body::from("reached")))
            }
        });
        let service = BearerAuth::new("TestToken").layer(inner);

        let mut builder = Request::builder().uri("/users");
        for value in headers {
            builder = builder.header(AUTHORIZATION, *value);
        }
        let response = service
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (
            status,
            String::from_utf8(body.to_vec()).unwrap(),
            hits.load(Ordering::SeqCst),
        )
    }

    #[tokio::test]
    async fn test_valid_token_reaches_inner_service() {
        let (status, body, hits) = call_with(&["Bearer TestToken"]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "reached");
        assert_eq!(hits, 1);
    }

    #[tokio::test]
    async fn test_missing_header_short_circuits() {
        let (status, body, hits) = call_with(&[]).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, "Unauthorized");
        assert_eq!(hits, 0);
    }

    #[tokio::test]
    async fn test_wrong_token_short_circuits() {
        let (status, body, hits) = call_with(&["Bearer WrongToken"]).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, "Unauthorized");
        assert_eq!(hits, 0);
    }

    #[tokio::test]
    async fn test_second_authorization_header_short_circuits() {
        let (status, body, hits) = call_with(&["Bearer TestToken", "Bearer WrongToken"]).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, "Unauthorized");
        assert_eq!(hits, 0);

        let (status, _, hits) = call_with(&["Bearer TestToken", "Bearer TestToken"]).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(hits, 0);
    }
}
