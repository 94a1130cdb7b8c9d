//! Tests for `AppError` → HTTP response mapping.
//!
//! Most tests call `IntoResponse` directly on `AppError` values; the last
//! ones go through a router to check the fallbacks, panics, timeouts and
//! extractor rejections.

mod common;

use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::json;
use solace_api::error::{
    handle_panic, handle_timeout, AppError, ErrorBody, INTERNAL_ERROR_MESSAGE,
};
use solace_core::error::{CoreError, ErrorCode};
use tower::timeout::TimeoutLayer;
use tower::{ServiceBuilder, ServiceExt};
use tower_http::catch_panic::CatchPanicLayer;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: every classified variant keeps its status, code and message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn classified_variants_map_to_fixed_status_and_code() {
    let cases = [
        (CoreError::not_found("Clip", 7), StatusCode::NOT_FOUND, "NOT_FOUND"),
        (CoreError::unauthorized(), StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        (CoreError::forbidden(), StatusCode::FORBIDDEN, "FORBIDDEN"),
        (
            CoreError::validation("bad"),
            StatusCode::UNPROCESSABLE_ENTITY,
            "VALIDATION_ERROR",
        ),
        (CoreError::conflict("dup"), StatusCode::CONFLICT, "CONFLICT"),
        (
            CoreError::rate_limited(),
            StatusCode::TOO_MANY_REQUESTS,
            "RATE_LIMIT_EXCEEDED",
        ),
        (
            CoreError::service_unavailable("TTS-engine"),
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
        ),
    ];

    for (err, expected_status, expected_code) in cases {
        let message = err.message();
        let (status, json) = error_to_response(AppError::Core(err)).await;

        assert_eq!(status, expected_status);
        assert_eq!(json["error_code"], expected_code);
        assert_eq!(json["message"], message);
        assert!(json.get("details").is_none(), "details must be omitted when absent");
    }
}

#[tokio::test]
async fn not_found_error_returns_404_with_canonical_message() {
    let (status, json) = error_to_response(CoreError::not_found("User", 42).into()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error_code"], "NOT_FOUND");
    assert_eq!(json["message"], "User with id '42' not found");
}

#[tokio::test]
async fn service_unavailable_returns_503() {
    let (status, json) =
        error_to_response(CoreError::service_unavailable("TTS-engine").into()).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["message"], "TTS-engine is currently unavailable");
}

// ---------------------------------------------------------------------------
// Test: validation details are serialized verbatim
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_422_with_details() {
    let err = CoreError::validation_with("bad field", json!({ "field": "email" }));

    let (status, json) = error_to_response(err.into()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error_code"], "VALIDATION_ERROR");
    assert_eq!(json["message"], "bad field");
    assert_eq!(json["details"], json!({ "field": "email" }));
}

// ---------------------------------------------------------------------------
// Test: serialized body re-reads into the same fields
// ---------------------------------------------------------------------------

#[tokio::test]
async fn error_body_round_trips() {
    let errors = [
        CoreError::not_found("User", 42),
        CoreError::unauthorized_with("custom"),
        CoreError::forbidden(),
        CoreError::validation_with("bad", json!({ "fields": { "email": ["email"] } })),
        CoreError::validation("no details"),
        CoreError::conflict("dup"),
        CoreError::rate_limited(),
        CoreError::service_unavailable("vocoder"),
    ];

    for err in errors {
        let expected = ErrorBody {
            error_code: err.code(),
            message: err.message(),
            details: err.details().cloned(),
        };
        let expected_status = err.status_code();

        let response = AppError::Core(err).into_response();
        let status = response.status().as_u16();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(status, expected_status);
        assert_eq!(body, expected);
    }
}

// ---------------------------------------------------------------------------
// Test: unclassified errors map to 500 and sanitize the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error_code"], "INTERNAL_ERROR");
    assert!(
        !json.to_string().contains("secret"),
        "Internal error response must not leak sensitive details"
    );
    assert_eq!(json["message"], INTERNAL_ERROR_MESSAGE);
}

#[tokio::test]
async fn core_internal_error_returns_500_and_sanitizes() {
    let err = AppError::Core(CoreError::internal("panic stack trace here"));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error_code"], "INTERNAL_ERROR");
    assert!(!json.to_string().contains("stack trace"));
}

#[tokio::test]
async fn anyhow_error_is_unclassified() {
    let err: AppError = anyhow::anyhow!("riva grpc: connection reset").into();

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error_code"], "INTERNAL_ERROR");
    assert_eq!(json["message"], INTERNAL_ERROR_MESSAGE);
    assert!(json.get("details").is_none());
}

#[tokio::test]
async fn panic_payload_is_not_exposed() {
    let response = handle_panic(Box::new("index out of bounds at src/tts.rs:12"));
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.error_code, ErrorCode::InternalError);
    assert_eq!(body.message, INTERNAL_ERROR_MESSAGE);
}

// ---------------------------------------------------------------------------
// Router-level boundary behaviour
// ---------------------------------------------------------------------------

#[tokio::test]
async fn panicking_handler_returns_internal_error_body() {
    async fn explode() -> &'static str {
        panic!("vocoder state corrupted")
    }

    let app = Router::new()
        .route("/explode", get(explode))
        .layer(CatchPanicLayer::custom(handle_panic));

    let response = common::get(app, "/explode").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = common::body_json(response).await;
    assert_eq!(json["error_code"], "INTERNAL_ERROR");
    assert!(!json.to_string().contains("vocoder"));
}

#[tokio::test]
async fn unknown_route_returns_not_found_body() {
    let app = common::build_test_app();
    let response = common::get(app, "/api/v1/nowhere").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = common::body_json(response).await;
    assert_eq!(json["error_code"], "NOT_FOUND");
    assert_eq!(json["message"], "Route with id '/api/v1/nowhere' not found");
}

#[tokio::test]
async fn malformed_json_body_is_a_validation_error() {
    let app = common::build_test_app();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/v1/auth/login")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = common::body_json(response).await;
    assert_eq!(json["error_code"], "VALIDATION_ERROR");
    assert_eq!(json["message"], "Invalid request body");
    assert!(json["details"]["body"].is_string());
}

#[tokio::test]
async fn unsupported_method_returns_not_found_body() {
    let app = common::build_test_app();
    let response = common::get(app, "/api/v1/auth/login").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = common::body_json(response).await;
    assert_eq!(json["error_code"], "NOT_FOUND");
    assert_eq!(json["message"], "Route with id 'GET /api/v1/auth/login' not found");
}

#[tokio::test]
async fn non_numeric_path_id_is_a_validation_error() {
    let app = common::build_test_app();
    let token = common::access_token_for(app.clone(), "admin@example.com").await;

    let response = common::get_auth(app, "/api/v1/users/abc", &token).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = common::body_json(response).await;
    assert_eq!(json["error_code"], "VALIDATION_ERROR");
    assert_eq!(json["message"], "Invalid path parameter");
    assert!(json["details"]["path"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn slow_handler_returns_service_unavailable_body() {
    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_millis(200)).await;
        "too late"
    }

    let app = Router::new().route("/slow", get(slow)).layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_timeout))
            .layer(TimeoutLayer::new(Duration::from_millis(10))),
    );

    let response = common::get(app, "/slow").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = common::body_json(response).await;
    assert_eq!(json["error_code"], "SERVICE_UNAVAILABLE");
    assert_eq!(json["message"], "solace-api is currently unavailable");
}
