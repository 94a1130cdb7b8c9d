use std::sync::Arc;

use crate::auth::limiter::LoginLimiter;
use crate::config::ServerConfig;
use crate::store::{InMemoryUserStore, UserStore};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (JWT settings are read by the auth extractors).
    pub config: Arc<ServerConfig>,
    /// Account storage.
    pub users: Arc<dyn UserStore>,
    /// Login attempt throttling, keyed by normalized email.
    pub login_limiter: LoginLimiter,
}

impl AppState {
    /// Build state backed by a fresh in-memory user store.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(config, Arc::new(InMemoryUserStore::new()))
    }

    /// Build state around an existing store.
    pub fn with_store(config: ServerConfig, users: Arc<dyn UserStore>) -> Self {
        let login_limiter = LoginLimiter::new(config.login_rate_limit_per_min);
        Self {
            config: Arc::new(config),
            users,
            login_limiter,
        }
    }
}
