//! Refresh Tokens
//!
//! Long-lived opaque session tokens: generated here, persisted and looked up
//! through the store collaborator. A token is a random 256-bit value encoded
//! as hex; collisions are treated as negligible rather than checked.

use crate::error::AuthError;
use crate::models::RefreshToken;
use crate::store::AuthStore;

use chrono::{Duration, Utc};
use rand::Rng;
use std::sync::Arc;
use uuid::Uuid;

/// Manages the refresh-token lifecycle against a store collaborator.
#[derive(Clone)]
pub struct RefreshTokenManager {
    store: Arc<dyn AuthStore>,
    window: Duration,
}

/// Produce a fresh opaque token: 32 random bytes, hex-encoded.
pub fn generate() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}

impl RefreshTokenManager {
    /// `window_seconds` is the validity window applied at creation.
    pub fn new(store: Arc<dyn AuthStore>, window_seconds: i64) -> Self {
        Self {
            store,
            window: Duration::seconds(window_seconds),
        }
    }

    /// Mint and persist a new refresh token for `user_id`.
    pub async fn create(&self, user_id: Uuid) -> Result<RefreshToken, AuthError> {
        let token = generate();
        let expires_at = Utc::now() + self.window;

        self.store
            .create_refresh_token(&token, user_id, expires_at)
            .await
    }

    /// Resolve a token to its owning user, enforcing the validity predicate.
    pub async fn resolve(&self, token: &str) -> Result<Uuid, AuthError> {
        match self.store.user_id_for_valid_refresh_token(token).await {
            Err(AuthError::Revoked) => {
                tracing::warn!("revoked refresh token presented");
                Err(AuthError::Revoked)
            }
            other => other,
        }
    }

    /// Revoke a token. Idempotent for already-revoked tokens; `NotFound` for
    /// tokens that never existed.
    pub async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        self.store.revoke_refresh_token(token).await
    }
}
