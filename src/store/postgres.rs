//! Postgres Store
//!
//! sqlx-backed [`AuthStore`]. Single-statement operations give the per-token
//! atomicity the contract requires; revocation uses `COALESCE` so a repeated
//! revoke keeps the original timestamp.

use super::AuthStore;
use crate::error::AuthError;
use crate::models::{RefreshToken, User};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get reference to the database pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the tables this store needs.
    pub async fn run_migrations(&self) -> Result<(), AuthError> {
        tracing::info!("Running authentication database migrations");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                email VARCHAR(255) NOT NULL UNIQUE,
                password_hash VARCHAR(255) NOT NULL,
                is_upgraded BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);")
            .execute(&self.pool)
            .await?;

        // The opaque token string is its own primary key.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS refresh_tokens (
                token TEXT PRIMARY KEY,
                user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                expires_at TIMESTAMPTZ NOT NULL,
                revoked_at TIMESTAMPTZ
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_refresh_tokens_user ON refresh_tokens(user_id);",
        )
        .execute(&self.pool)
        .await?;

        tracing::info!("Authentication migrations completed");
        Ok(())
    }
}

#[async_trait]
impl AuthStore for PgStore {
    async fn create_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, AuthError> {
        let record = sqlx::query_as::<_, RefreshToken>(
            r#"
            INSERT INTO refresh_tokens (token, user_id, expires_at)
            VALUES ($1, $2, $3)
            RETURNING token, user_id, created_at, expires_at, revoked_at
            "#,
        )
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn user_id_for_valid_refresh_token(&self, token: &str) -> Result<Uuid, AuthError> {
        let record: Option<RefreshToken> =
            sqlx::query_as("SELECT * FROM refresh_tokens WHERE token = $1")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;

        let record = record.ok_or(AuthError::NotFound)?;

        if record.is_revoked() {
            return Err(AuthError::Revoked);
        }
        if record.is_expired() {
            return Err(AuthError::Expired);
        }
        Ok(record.user_id)
    }

    async fn revoke_refresh_token(&self, token: &str) -> Result<(), AuthError> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = COALESCE(revoked_at, NOW()) WHERE token = $1",
        )
        .bind(token)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::NotFound);
        }
        Ok(())
    }

    async fn user_by_email(&self, email: &str) -> Result<User, AuthError> {
        let user: Option<User> = sqlx::query_as(
            "SELECT id, email, created_at, updated_at, is_upgraded FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or(AuthError::NotFound)
    }

    async fn password_hash(&self, user_id: Uuid) -> Result<String, AuthError> {
        let hash: Option<String> =
            sqlx::query_scalar("SELECT password_hash FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        hash.ok_or(AuthError::NotFound)
    }

    async fn reset_all_users(&self) -> Result<(), AuthError> {
        // Refresh tokens go with their owners via ON DELETE CASCADE.
        sqlx::query("DELETE FROM users").execute(&self.pool).await?;
        Ok(())
    }
}
