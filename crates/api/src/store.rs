//! User account storage.
//!
//! Handlers talk to the [`UserStore`] trait; [`InMemoryUserStore`] is the
//! implementation the server runs with.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;
use solace_core::error::CoreError;
use solace_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;

/// A registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: Timestamp,
}

/// Input for [`UserStore::create`].
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
}

/// Public view of a [`User`] (never includes the password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            is_active: user.is_active,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

/// Canonical form of an email used for lookups and uniqueness.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new account. Fails with `Conflict` if the email is taken.
    /// The first account ever created is an admin.
    async fn create(&self, input: NewUser) -> Result<User, CoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, CoreError>;

    /// Activate or deactivate an account. Fails with `NotFound` for an unknown id.
    async fn set_active(&self, id: DbId, is_active: bool) -> Result<User, CoreError>;

    /// Check that the store can serve requests.
    async fn ping(&self) -> Result<(), CoreError>;
}

#[derive(Default)]
struct Accounts {
    users: HashMap<DbId, User>,
    by_email: HashMap<String, DbId>,
    last_id: DbId,
}

/// Process-local store guarded by a `RwLock`.
#[derive(Default)]
pub struct InMemoryUserStore {
    accounts: RwLock<Accounts>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, input: NewUser) -> Result<User, CoreError> {
        let email = normalize_email(&input.email);
        let mut accounts = self.accounts.write().await;

        if accounts.by_email.contains_key(&email) {
            return Err(CoreError::conflict("User with this email already exists"));
        }

        accounts.last_id += 1;
        let user = User {
            id: accounts.last_id,
            email: email.clone(),
            full_name: input.full_name,
            password_hash: input.password_hash,
            is_active: true,
            is_admin: accounts.users.is_empty(),
            created_at: chrono::Utc::now(),
        };
        accounts.by_email.insert(email, user.id);
        accounts.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .by_email
            .get(&normalize_email(email))
            .and_then(|id| accounts.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, CoreError> {
        Ok(self.accounts.read().await.users.get(&id).cloned())
    }

    async fn set_active(&self, id: DbId, is_active: bool) -> Result<User, CoreError> {
        let mut accounts = self.accounts.write().await;
        let user = accounts
            .users
            .get_mut(&id)
            .ok_or_else(|| CoreError::not_found("User", id))?;
        user.is_active = is_active;
        Ok(user.clone())
    }

    async fn ping(&self) -> Result<(), CoreError> {
        Ok(())
    }
}
