//! Diagnostic endpoint for exercising the exception stage.

use axum::Json;
use axum::extract::Path;
use axum::extract::rejection::PathRejection;
use tracing::instrument;

use crate::error::AppResult;

/// Integer reciprocal of `num`: `GET /exception-test/{num}`.
///
/// `num == 0` (and `i32::MIN / -1`) panic on purpose. The fault is left
/// uncaught so that the exception stage turns it into a 500. A
/// non-integer `num` is a 400 with an empty body.
#[instrument(skip(path))]
pub async fn exception_test(path: Result<Path<i32>, PathRejection>) -> AppResult<Json<i32>> {
    let Path(num) = path?;
    Ok(Json(1 / num))
}
