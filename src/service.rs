//! Authentication Service
//!
//! Orchestrates the subsystem: password verification on login, access-token
//! issuance and validation, refresh-token lifecycle, and the webhook
//! shared-key check. Secrets are loaded once at construction and shared
//! immutably; nothing here reads the environment after startup.

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::extract;
use crate::models::{LoginOutcome, TokenOutcome};
use crate::password;
use crate::refresh::RefreshTokenManager;
use crate::store::AuthStore;
use crate::token;

use axum::http::HeaderMap;
use chrono::Duration;
use jsonwebtoken::{DecodingKey, EncodingKey};
use std::sync::Arc;
use uuid::Uuid;

/// Authentication service
pub struct AuthService {
    config: AuthConfig,
    store: Arc<dyn AuthStore>,
    hasher: password::Hasher,
    refresh_tokens: RefreshTokenManager,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    /// Create a new authentication service over a store collaborator.
    pub fn new(store: Arc<dyn AuthStore>, config: AuthConfig) -> Result<Self, AuthError> {
        config.validate()?;

        let hasher = password::Hasher::new(
            config.argon2_memory_cost,
            config.argon2_time_cost,
            config.argon2_parallelism,
        )?;
        let refresh_tokens =
            RefreshTokenManager::new(store.clone(), config.refresh_token_expiration);
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        Ok(Self {
            config,
            store,
            hasher,
            refresh_tokens,
            encoding_key,
            decoding_key,
        })
    }

    /// Get reference to config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    fn access_ttl(&self) -> Duration {
        Duration::seconds(self.config.access_token_expiration)
    }

    // ============================================
    // Password Hashing
    // ============================================

    /// Hash a password for storage. Used by the user-CRUD collaborator on
    /// account creation and password change.
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        self.hasher.hash(password)
    }

    /// Verify a password against a stored hash.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        self.hasher.verify(password, hash)
    }

    // ============================================
    // Login / Refresh / Logout
    // ============================================

    /// Verify an email/password pair and mint both credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let user = self.store.user_by_email(email).await?;
        let hash = self.store.password_hash(user.id).await?;

        if !self.hasher.verify(password, &hash)? {
            tracing::debug!(user_id = %user.id, "login rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = token::issue(user.id, &self.encoding_key, self.access_ttl())?;
        let refresh_token = self.refresh_tokens.create(user.id).await?;

        tracing::debug!(user_id = %user.id, "login succeeded");
        Ok(LoginOutcome {
            user,
            access_token,
            refresh_token: refresh_token.token,
        })
    }

    /// Exchange a valid refresh token for a new access token.
    ///
    /// The refresh token itself is left in place; it stays usable until it
    /// expires or is revoked.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenOutcome, AuthError> {
        let user_id = self.refresh_tokens.resolve(refresh_token).await?;
        let access_token = token::issue(user_id, &self.encoding_key, self.access_ttl())?;

        Ok(TokenOutcome { access_token })
    }

    /// Revoke a refresh token (logout).
    pub async fn revoke(&self, refresh_token: &str) -> Result<(), AuthError> {
        self.refresh_tokens.revoke(refresh_token).await
    }

    // ============================================
    // Request Authentication
    // ============================================

    /// Authenticate a user-facing request from its headers: extract the bearer
    /// token and validate it, returning the caller's user id.
    pub fn authenticate_bearer(&self, headers: &HeaderMap) -> Result<Uuid, AuthError> {
        let bearer = extract::bearer_token(headers)?;
        token::validate(bearer, &self.decoding_key)
    }

    /// Authenticate the trusted webhook caller: extract the `ApiKey`
    /// credential and compare it against the configured shared key in
    /// constant time.
    pub fn authenticate_webhook(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let key = extract::api_key(headers)?;

        if !extract::constant_time_eq(key.as_bytes(), self.config.webhook_api_key.as_bytes()) {
            tracing::warn!("webhook request with wrong API key");
            return Err(AuthError::InvalidCredentials);
        }
        Ok(())
    }

    // ============================================
    // Administration
    // ============================================

    /// Administrative reset: drop all users and their sessions. Delegated
    /// entirely to the store.
    pub async fn reset(&self) -> Result<(), AuthError> {
        tracing::info!("administrative reset: removing all users and sessions");
        self.store.reset_all_users().await
    }
}
