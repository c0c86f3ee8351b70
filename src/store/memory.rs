//! In-Memory Store
//!
//! A `HashMap`-backed [`AuthStore`] for tests and local development. Lock
//! scope per operation gives the same per-token atomicity the SQL store gets
//! from single statements.

use super::AuthStore;
use crate::error::AuthError;
use crate::models::{RefreshToken, User};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, UserRecord>>,
    tokens: RwLock<HashMap<String, RefreshToken>>,
}

struct UserRecord {
    user: User,
    password_hash: String,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user. Test/dev helper; user CRUD is otherwise not this crate's
    /// concern.
    pub async fn create_user(&self, email: &str, password_hash: &str) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            created_at: now,
            updated_at: now,
            is_upgraded: false,
        };

        self.users.write().await.insert(
            user.id,
            UserRecord {
                user: user.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        user
    }
}

#[async_trait]
impl AuthStore for MemoryStore {
    async fn create_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, AuthError> {
        let record = RefreshToken {
            token: token.to_string(),
            user_id,
            created_at: Utc::now(),
            expires_at,
            revoked_at: None,
        };

        self.tokens
            .write()
            .await
            .insert(token.to_string(), record.clone());
        Ok(record)
    }

    async fn user_id_for_valid_refresh_token(&self, token: &str) -> Result<Uuid, AuthError> {
        let tokens = self.tokens.read().await;
        let record = tokens.get(token).ok_or(AuthError::NotFound)?;

        if record.is_revoked() {
            return Err(AuthError::Revoked);
        }
        if record.is_expired() {
            return Err(AuthError::Expired);
        }
        Ok(record.user_id)
    }

    async fn revoke_refresh_token(&self, token: &str) -> Result<(), AuthError> {
        let mut tokens = self.tokens.write().await;
        let record = tokens.get_mut(token).ok_or(AuthError::NotFound)?;

        record.revoked_at.get_or_insert_with(Utc::now);
        Ok(())
    }

    async fn user_by_email(&self, email: &str) -> Result<User, AuthError> {
        self.users
            .read()
            .await
            .values()
            .find(|r| r.user.email == email)
            .map(|r| r.user.clone())
            .ok_or(AuthError::NotFound)
    }

    async fn password_hash(&self, user_id: Uuid) -> Result<String, AuthError> {
        self.users
            .read()
            .await
            .get(&user_id)
            .map(|r| r.password_hash.clone())
            .ok_or(AuthError::NotFound)
    }

    async fn reset_all_users(&self) -> Result<(), AuthError> {
        self.users.write().await.clear();
        self.tokens.write().await.clear();
        Ok(())
    }
}
