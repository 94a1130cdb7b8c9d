//! Domain error taxonomy.
//!
//! [`CoreError`] is a closed set of failure categories. Each variant pins its
//! HTTP status and machine-readable [`ErrorCode`]; callers only supply the
//! message, details or identifying parameters. The HTTP boundary in
//! `solace_api::error` matches on it exhaustively.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message used by [`CoreError::unauthorized`].
pub const DEFAULT_UNAUTHORIZED_MESSAGE: &str = "Unauthorized";
/// Message used by [`CoreError::forbidden`].
pub const DEFAULT_FORBIDDEN_MESSAGE: &str = "Forbidden";
/// Message used by [`CoreError::rate_limited`].
pub const DEFAULT_RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded";

/// Stable machine-readable error codes sent to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    Unauthorized,
    Forbidden,
    ValidationError,
    Conflict,
    RateLimitExceeded,
    ServiceUnavailable,
    InternalError,
}

impl ErrorCode {
    /// Every code, in declaration order.
    pub const ALL: [ErrorCode; 8] = [
        ErrorCode::NotFound,
        ErrorCode::Unauthorized,
        ErrorCode::Forbidden,
        ErrorCode::ValidationError,
        ErrorCode::Conflict,
        ErrorCode::RateLimitExceeded,
        ErrorCode::ServiceUnavailable,
        ErrorCode::InternalError,
    ];

    /// Wire representation of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    /// HTTP status code paired with this error code.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorCode::NotFound => 404,
            ErrorCode::Unauthorized => 401,
            ErrorCode::Forbidden => 403,
            ErrorCode::ValidationError => 422,
            ErrorCode::Conflict => 409,
            ErrorCode::RateLimitExceeded => 429,
            ErrorCode::ServiceUnavailable => 503,
            ErrorCode::InternalError => 500,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified domain failure.
///
/// The `Display` output of every variant is the human-readable message shown
/// to API clients (except [`CoreError::Internal`], which the boundary
/// replaces with a generic message).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("{resource} with id '{id}' not found")]
    NotFound { resource: String, id: String },

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{message}")]
    Validation {
        message: String,
        details: Option<Value>,
    },

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    RateLimited(String),

    #[error("{service} is currently unavailable")]
    ServiceUnavailable { service: String },

    /// Unclassified failure; 500 / `INTERNAL_ERROR`.
    #[error("{0}")]
    Internal(String),
}

impl CoreError {
    /// A missing resource, e.g. `not_found("User", 42)`.
    pub fn not_found(resource: impl Into<String>, id: impl fmt::Display) -> Self {
        CoreError::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }

    pub fn unauthorized() -> Self {
        CoreError::Unauthorized(DEFAULT_UNAUTHORIZED_MESSAGE.to_string())
    }

    pub fn unauthorized_with(message: impl Into<String>) -> Self {
        CoreError::Unauthorized(message.into())
    }

    pub fn forbidden() -> Self {
        CoreError::Forbidden(DEFAULT_FORBIDDEN_MESSAGE.to_string())
    }

    pub fn forbidden_with(message: impl Into<String>) -> Self {
        CoreError::Forbidden(message.into())
    }

    /// Invalid input without field-level diagnostics.
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation {
            message: message.into(),
            details: None,
        }
    }

    /// Invalid input with a structured `details` payload.
    pub fn validation_with(message: impl Into<String>, details: Value) -> Self {
        CoreError::Validation {
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        CoreError::Conflict(message.into())
    }

    pub fn rate_limited() -> Self {
        CoreError::RateLimited(DEFAULT_RATE_LIMIT_MESSAGE.to_string())
    }

    pub fn rate_limited_with(message: impl Into<String>) -> Self {
        CoreError::RateLimited(message.into())
    }

    /// A downstream dependency is down, e.g. `service_unavailable("TTS-engine")`.
    pub fn service_unavailable(service: impl Into<String>) -> Self {
        CoreError::ServiceUnavailable {
            service: service.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CoreError::Internal(message.into())
    }

    /// Machine-readable code for this error's category.
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::NotFound { .. } => ErrorCode::NotFound,
            CoreError::Unauthorized(_) => ErrorCode::Unauthorized,
            CoreError::Forbidden(_) => ErrorCode::Forbidden,
            CoreError::Validation { .. } => ErrorCode::ValidationError,
            CoreError::Conflict(_) => ErrorCode::Conflict,
            CoreError::RateLimited(_) => ErrorCode::RateLimitExceeded,
            CoreError::ServiceUnavailable { .. } => ErrorCode::ServiceUnavailable,
            CoreError::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// HTTP status code for this error's category.
    pub fn status_code(&self) -> u16 {
        self.code().status_code()
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Structured auxiliary data. Only validation errors carry any.
    pub fn details(&self) -> Option<&Value> {
        match self {
            CoreError::Validation { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}
