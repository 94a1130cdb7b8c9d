//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::Json;
use solace_core::error::CoreError;
use solace_core::types::DbId;

use crate::error::AppResult;
use crate::extract::AppPath;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;
use crate::store::UserResponse;

/// GET /api/v1/users/me
pub async fn me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<UserResponse>> {
    let account = state
        .users
        .find_by_id(user.user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", user.user_id))?;
    Ok(Json(account.into()))
}

/// GET /api/v1/users/{id} (admin only)
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<UserResponse>> {
    let account = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", id))?;
    Ok(Json(account.into()))
}

/// POST /api/v1/users/{id}/deactivate (admin only)
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<UserResponse>> {
    let account = state.users.set_active(id, false).await?;
    tracing::info!(user_id = id, admin_id = admin.user_id, "User deactivated");
    Ok(Json(account.into()))
}
