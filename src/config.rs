//! Authentication Configuration
//!
//! All configuration values are loaded from environment variables once at
//! startup and passed into components at construction. Nothing in this crate
//! reads the environment after that.

use crate::error::AuthError;
use std::env;

/// Authentication configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT secret key for signing access tokens (from JWT_SECRET env var)
    pub jwt_secret: String,

    /// Shared key presented by the trusted webhook caller (from WEBHOOK_API_KEY env var)
    pub webhook_api_key: String,

    /// Access token lifetime in seconds (from JWT_ACCESS_EXPIRATION env var)
    pub access_token_expiration: i64,

    /// Refresh token lifetime in seconds (from JWT_REFRESH_EXPIRATION env var)
    pub refresh_token_expiration: i64,

    /// Argon2 memory cost in KiB (from ARGON2_MEMORY_COST env var)
    pub argon2_memory_cost: u32,

    /// Argon2 time cost (iterations) (from ARGON2_TIME_COST env var)
    pub argon2_time_cost: u32,

    /// Argon2 parallelism (from ARGON2_PARALLELISM env var)
    pub argon2_parallelism: u32,
}

impl AuthConfig {
    /// Load configuration from environment variables.
    ///
    /// Fails with `AuthError::Config` if a required variable is missing; the
    /// rest fall back to defaults.
    pub fn from_env() -> Result<Self, AuthError> {
        let config = Self {
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| AuthError::Config("JWT_SECRET must be set".to_string()))?,

            webhook_api_key: env::var("WEBHOOK_API_KEY")
                .map_err(|_| AuthError::Config("WEBHOOK_API_KEY must be set".to_string()))?,

            access_token_expiration: env::var("JWT_ACCESS_EXPIRATION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600), // 1 hour default

            refresh_token_expiration: env::var("JWT_REFRESH_EXPIRATION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60 * 24 * 60 * 60), // 60 days default

            argon2_memory_cost: env::var("ARGON2_MEMORY_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(65536), // 64 MiB

            argon2_time_cost: env::var("ARGON2_TIME_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),

            argon2_parallelism: env::var("ARGON2_PARALLELISM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.jwt_secret.len() < 32 {
            return Err(AuthError::Config(
                "JWT_SECRET must be at least 32 characters".to_string(),
            ));
        }

        if self.webhook_api_key.is_empty() {
            return Err(AuthError::Config(
                "WEBHOOK_API_KEY must not be empty".to_string(),
            ));
        }

        if self.access_token_expiration <= 0 {
            return Err(AuthError::Config(
                "JWT_ACCESS_EXPIRATION must be positive".to_string(),
            ));
        }

        if self.refresh_token_expiration <= self.access_token_expiration {
            return Err(AuthError::Config(
                "JWT_REFRESH_EXPIRATION must be greater than JWT_ACCESS_EXPIRATION".to_string(),
            ));
        }

        Ok(())
    }
}
