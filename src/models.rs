//! Authentication Models
//!
//! Database entities and token claim structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User entity from database.
///
/// The password hash is deliberately not part of this struct; it is fetched
/// through [`crate::store::AuthStore::password_hash`] only where verification
/// needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Premium flag, flipped by the trusted billing webhook.
    pub is_upgraded: bool,
}

/// Refresh token entity from database.
///
/// The token string itself is the primary key; it carries no internal
/// structure and is meaningful only as a lookup key.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// Check if token is expired
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Check if token is revoked
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Check if token is valid
    pub fn is_valid(&self) -> bool {
        !self.is_expired() && !self.is_revoked()
    }
}

/// JWT claims for access tokens.
///
/// Reconstructed by parsing and verifying the token bytes; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Issuer, always [`crate::token::ISSUER`]
    pub iss: String,
    /// Subject (user ID rendered as a string)
    pub sub: String,
    /// Issued at timestamp (unix seconds)
    pub iat: i64,
    /// Expiration timestamp (unix seconds)
    pub exp: i64,
}

/// Result of a successful login: the user plus both credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginOutcome {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Result of a refresh exchange: a fresh access token for the session owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenOutcome {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token(expires_in: Duration, revoked: bool) -> RefreshToken {
        let now = Utc::now();
        RefreshToken {
            token: "aa".repeat(32),
            user_id: Uuid::new_v4(),
            created_at: now,
            expires_at: now + expires_in,
            revoked_at: revoked.then_some(now),
        }
    }

    #[test]
    fn fresh_token_is_valid() {
        assert!(token(Duration::days(60), false).is_valid());
    }

    #[test]
    fn expired_token_is_invalid() {
        let t = token(Duration::seconds(-1), false);
        assert!(t.is_expired());
        assert!(!t.is_valid());
    }

    #[test]
    fn revoked_token_is_invalid() {
        let t = token(Duration::days(60), true);
        assert!(t.is_revoked());
        assert!(!t.is_valid());
    }
}
