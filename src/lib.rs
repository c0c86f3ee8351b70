//! Warbler Authentication Core
//!
//! Authentication and session-token subsystem for Warbler:
//! - Argon2id password hashing with self-describing hashes
//! - Short-lived HS256 JWT access tokens (stateless, unrevocable before expiry)
//! - Long-lived opaque refresh tokens (stored, resolvable, revocable)
//! - `Authorization` header extraction for `Bearer` and `ApiKey` callers
//!
//! The crate produces no HTTP responses of its own beyond the transport
//! mapping on [`AuthError`]; routing, request bodies, and user CRUD belong to
//! the calling application. Persistence is consumed through the
//! [`store::AuthStore`] trait, with a Postgres implementation
//! ([`store::PgStore`]) and an in-memory one ([`store::MemoryStore`]) included.
//!
//! # Configuration
//!
//! All configuration is loaded once at startup from environment variables:
//! - `JWT_SECRET` - Secret key for signing access tokens (required, min 32 chars)
//! - `WEBHOOK_API_KEY` - Shared key for the trusted webhook caller (required)
//! - `JWT_ACCESS_EXPIRATION` - Access token lifetime in seconds (default: 3600)
//! - `JWT_REFRESH_EXPIRATION` - Refresh token lifetime in seconds (default: 60 days)
//! - `ARGON2_MEMORY_COST` / `ARGON2_TIME_COST` / `ARGON2_PARALLELISM` - hashing cost
//!
//! # Usage
//!
//! ```rust,ignore
//! use warbler_auth::{AuthConfig, AuthService, store::PgStore};
//! use std::sync::Arc;
//!
//! let config = AuthConfig::from_env()?;
//! let store = Arc::new(PgStore::new(pool));
//! store.run_migrations().await?;
//!
//! let auth = Arc::new(AuthService::new(store, config)?);
//! let outcome = auth.login(&email, &password).await?;
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod password;
pub mod refresh;
pub mod service;
pub mod store;
pub mod token;

// Re-export commonly used types
pub use config::AuthConfig;
pub use error::AuthError;
pub use extract::AuthUser;
pub use models::{AccessTokenClaims, LoginOutcome, RefreshToken, TokenOutcome, User};
pub use refresh::RefreshTokenManager;
pub use service::AuthService;
pub use store::{AuthStore, MemoryStore, PgStore};
