//! Exception normalization middleware.
//!
//! The outermost stage. Handlers signal expected failures through
//! [`AppError`](crate::AppError); anything else (a division by zero, an
//! arithmetic overflow) is a panic. This stage catches such panics from
//! every inner stage, logs them, throws away whatever response was being
//! built, and answers with:
//!
//! ```text
//! HTTP/1.1 500 Internal Server Error
//! Content-Type: application/json
//!
//! {"error":"Internal server error."}
//! ```
//!
//! The panic payload is logged but never sent to the client.

use std::any::Any;

use axum::response::Response;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;

use crate::error::InternalErrorBody;
use crate::metrics;

/// Signature of the panic-to-response converter.
pub type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Layer type of the exception stage.
pub type ExceptionLayer = CatchPanicLayer<PanicHandler>;

/// Build the exception normalization layer.
pub fn exception_layer() -> ExceptionLayer {
    CatchPanicLayer::custom(normalize_panic as PanicHandler)
}

/// Convert a caught panic into the uniform 500 response.
fn normalize_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic_message(payload.as_ref());
    error!(panic = %detail, "Unhandled exception occurred");
    metrics::record_unhandled_fault();

    InternalErrorBody::response()
}

/// Best-effort text of a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else {
        "non-string panic payload"
    }
}
