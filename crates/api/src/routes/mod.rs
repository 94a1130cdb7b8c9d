pub mod auth;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public, rate limited per email)
/// /auth/refresh                  refresh (public)
/// /auth/logout                   logout
///
/// /users/me                      current user (requires auth)
/// /users/{id}                    get user (admin only)
/// /users/{id}/deactivate         deactivate user (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
}
