use std::any::Any;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::BoxError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use solace_core::error::{CoreError, ErrorCode};

/// Message returned for every unclassified failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Service name reported when a request exceeds the timeout.
pub const SERVICE_NAME: &str = "solace-api";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for classified failures. Everything else is
/// unclassified and surfaces as 500 / `INTERNAL_ERROR` with a generic
/// message. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A classified error from `solace_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An internal error with a human-readable (log-only) message.
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Any other failure bubbled up with `?`.
    #[error(transparent)]
    Unclassified(#[from] anyhow::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error_code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorBody {
    fn internal() -> Self {
        Self {
            error_code: ErrorCode::InternalError,
            message: INTERNAL_ERROR_MESSAGE.to_string(),
            details: None,
        }
    }
}

impl AppError {
    /// Resolve the HTTP status and body for this error, logging the cause.
    pub fn to_parts(&self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "Internal core error");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::internal())
            }
            AppError::Core(core) => {
                let status = StatusCode::from_u16(core.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                tracing::debug!(code = %core.code(), status = status.as_u16(), error = %core, "Request failed");
                (
                    status,
                    ErrorBody {
                        error_code: core.code(),
                        message: core.message(),
                        details: core.details().cloned(),
                    },
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::internal())
            }
            AppError::Unclassified(err) => {
                tracing::error!(error = ?err, "Unclassified error");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::internal())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_parts();
        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Core(CoreError::validation_with(
            "Invalid request body",
            json!({ "body": rejection.body_text() }),
        ))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Core(CoreError::validation_with(
            "Invalid path parameter",
            json!({ "path": rejection.body_text() }),
        ))
    }
}

/// Fallback handler for unmatched routes.
pub async fn route_not_found(uri: Uri) -> AppError {
    AppError::Core(CoreError::not_found("Route", uri.path()))
}

/// Fallback for a known path requested with an unsupported method.
///
/// The taxonomy has no 405 category, so the method/path pair is reported as
/// a missing route.
pub async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::Core(CoreError::not_found(
        "Route",
        format!("{method} {}", uri.path()),
    ))
}

/// Error handler for the request timeout layer.
pub async fn handle_timeout(err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("Request timed out");
        AppError::Core(CoreError::service_unavailable(SERVICE_NAME))
    } else {
        AppError::InternalError(format!("Unhandled middleware error: {err}"))
    }
}

/// Response for a handler panic caught by `CatchPanicLayer`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    AppError::InternalError(format!("Handler panicked: {detail}")).into_response()
}
