use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Fixed client-facing message for rejected user payloads.
pub const INVALID_USER_DATA: &str = "Invalid user data.";

/// Fixed client-facing message for any server-side fault.
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error.";

/// Plain-text body returned by the authentication stage.
pub const UNAUTHORIZED: &str = "Unauthorized";

/// Application-wide error types with appropriate HTTP status codes.
///
/// Expected conditions (bad input, unknown id, missing credential) are
/// values of this enum. Genuinely unexpected faults are panics and never
/// pass through here; the exception stage in
/// [`crate::middleware::exception`] owns those.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid user data")]
    Validation,

    #[error("Resource not found")]
    NotFound,

    #[error("Missing or invalid bearer token")]
    Unauthorized,

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("Malformed request body: {message}")]
    MalformedBody { status: StatusCode, message: String },

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Error response body for malformed requests.
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

/// Body of every 500 response. Carries no detail about the cause.
#[derive(Serialize)]
pub(crate) struct InternalErrorBody {
    pub error: &'static str,
}

impl InternalErrorBody {
    pub(crate) fn response() -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(InternalErrorBody {
                error: INTERNAL_SERVER_ERROR,
            }),
        )
            .into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Client errors are recovered locally and are not faults
            AppError::Validation => {
                tracing::debug!("Rejected invalid user data");
                (StatusCode::BAD_REQUEST, axum::Json(INVALID_USER_DATA)).into_response()
            }
            AppError::NotFound => {
                tracing::debug!("User not found");
                StatusCode::NOT_FOUND.into_response()
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, UNAUTHORIZED).into_response(),
            AppError::InvalidPath(detail) => {
                tracing::debug!(%detail, "Rejected path parameter");
                StatusCode::BAD_REQUEST.into_response()
            }
            AppError::MalformedBody { status, message } => {
                tracing::debug!(%status, %message, "Rejected malformed request body");
                (
                    status,
                    axum::Json(ErrorResponse {
                        error: "bad_request",
                        message,
                    }),
                )
                    .into_response()
            }

            // Log the full detail server-side, expose nothing to the client
            AppError::Internal(_) | AppError::ConfigError(_) => {
                tracing::error!(error = %self, "Request failed");
                InternalErrorBody::response()
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        // Undecodable or wrongly typed bodies are plain 400s, never 422
        let status = match rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => rejection.status(),
        };
        AppError::MalformedBody {
            status,
            message: sanitize_json_rejection(&rejection),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidPath(rejection.body_text())
    }
}

/// Reduce a JSON extractor rejection to a message safe to show clients.
///
/// Serde messages name internal Rust types, so only the category of the
/// failure is reported.
fn sanitize_json_rejection(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Expected request with `Content-Type: application/json`".to_string()
        }
        JsonRejection::JsonSyntaxError(_) => "Malformed JSON in request body".to_string(),
        JsonRejection::JsonDataError(_) => "Invalid data type in request body".to_string(),
        JsonRejection::BytesRejection(_) => "Failed to read request body".to_string(),
        _ => "Invalid request format".to_string(),
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
