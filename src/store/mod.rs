//! Persistence Contract
//!
//! The narrow CRUD surface this crate requires from the persistence engine.
//! Everything else about storage (schema ownership, user CRUD, pooling) lives
//! with the collaborator implementing [`AuthStore`].
//!
//! Each operation on a given token is individually atomic: a lookup never
//! observes a half-written record, and revocation is a single statement. No
//! multi-token transactions are required. Calls never retry internally, and
//! cancellation propagates naturally: every method is a future the caller may
//! drop or wrap in a timeout.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::AuthError;
use crate::models::{RefreshToken, User};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Store collaborator consumed by the authentication subsystem.
#[async_trait]
pub trait AuthStore: Send + Sync {
    /// Persist a new refresh token with `revoked_at` unset.
    ///
    /// The expiry is computed by the caller; the store does not own the
    /// validity window.
    async fn create_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, AuthError>;

    /// Look up the owning user of a refresh token, enforcing the validity
    /// predicate `revoked_at IS NULL AND now < expires_at` atomically.
    ///
    /// Errors: `NotFound` if the token never existed, `Revoked` if it was
    /// revoked, `Expired` if past its window, `StoreUnavailable` on
    /// infrastructure failure.
    async fn user_id_for_valid_refresh_token(&self, token: &str) -> Result<Uuid, AuthError>;

    /// Revoke a refresh token. Idempotent: revoking an already-revoked token
    /// succeeds and preserves the original `revoked_at`. `NotFound` if the
    /// token never existed.
    async fn revoke_refresh_token(&self, token: &str) -> Result<(), AuthError>;

    /// Fetch a user by email. `NotFound` if no such user.
    async fn user_by_email(&self, email: &str) -> Result<User, AuthError>;

    /// Fetch the stored password hash for a user. `NotFound` if no such user.
    async fn password_hash(&self, user_id: Uuid) -> Result<String, AuthError>;

    /// Administrative reset: remove all users and, by cascade, all of their
    /// refresh tokens.
    async fn reset_all_users(&self) -> Result<(), AuthError>;
}
