//! Handlers for the `/auth` resource (register, login, refresh, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use solace_core::error::CoreError;
use solace_core::validation::{not_blank, validate};
use validator::Validate;

use crate::auth::jwt::{generate_token, validate_token, TokenSubject, TokenType};
use crate::auth::password::{hash_password, verify_password};
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::state::AppState;
use crate::store::{normalize_email, NewUser, User, UserResponse};

/// Shared message for unknown email and wrong password, so responses do not
/// reveal which accounts exist.
const INVALID_CREDENTIALS: &str = "Incorrect email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(
        length(min = 1, max = 100, message = "must be between 1 and 100 characters"),
        custom(function = "not_blank", message = "must not be blank")
    )]
    pub full_name: String,
    #[validate(length(min = 8, message = "must be at least 8 characters long"))]
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token pair returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    validate(&input)?;

    if state.users.find_by_email(&input.email).await?.is_some() {
        return Err(CoreError::conflict("User with this email already exists").into());
    }

    let password_hash = hash_password(&input.password)?;
    let user = state
        .users
        .create(NewUser {
            email: input.email,
            full_name: input.full_name.trim().to_string(),
            password_hash,
        })
        .await?;

    tracing::info!(user_id = user.id, is_admin = user.is_admin, "User registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    state.login_limiter.check(&normalize_email(&input.email))?;

    let user = state
        .users
        .find_by_email(&input.email)
        .await?
        .ok_or_else(|| CoreError::unauthorized_with(INVALID_CREDENTIALS))?;

    if !verify_password(&input.password, &user.password_hash)? {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(CoreError::unauthorized_with(INVALID_CREDENTIALS).into());
    }

    if !user.is_active {
        return Err(CoreError::forbidden_with("User account is disabled").into());
    }

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(issue_tokens(&state, &user)?))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for a new token pair.
pub async fn refresh(
    State(state): State<AppState>,
    AppJson(input): AppJson<RefreshRequest>,
) -> AppResult<Json<TokenResponse>> {
    let claims = validate_token(&input.refresh_token, &state.config.jwt)
        .map_err(|_| CoreError::unauthorized_with("Could not validate refresh token"))?;

    if claims.token_type != TokenType::Refresh {
        return Err(CoreError::unauthorized_with("Invalid token type").into());
    }

    let user = state
        .users
        .find_by_id(claims.sub)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| CoreError::unauthorized_with("User not found or inactive"))?;

    Ok(Json(issue_tokens(&state, &user)?))
}

/// POST /api/v1/auth/logout
///
/// Tokens are stateless; the client discards them.
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Successfully logged out",
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn issue_tokens(state: &AppState, user: &User) -> AppResult<TokenResponse> {
    let config = &state.config.jwt;
    let subject = TokenSubject {
        user_id: user.id,
        email: &user.email,
        is_admin: user.is_admin,
    };

    let access_token = generate_token(subject, TokenType::Access, config)
        .map_err(|e| anyhow::anyhow!("access token generation failed: {e}"))?;
    let refresh_token = generate_token(subject, TokenType::Refresh, config)
        .map_err(|e| anyhow::anyhow!("refresh token generation failed: {e}"))?;

    Ok(TokenResponse {
        access_token,
        refresh_token,
        token_type: "bearer",
        expires_in: config.access_token_expiry_secs(),
    })
}
