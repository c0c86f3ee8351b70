//! Authentication Error Types
//!
//! Centralized error handling for all authentication operations.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Authentication errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("No credential in Authorization header")]
    MissingCredential,

    #[error("Malformed Authorization header")]
    MalformedHeader,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Unsupported signing algorithm")]
    UnsupportedAlgorithm,

    #[error("Token has expired")]
    Expired,

    #[error("Token has been revoked")]
    Revoked,

    #[error("Not found")]
    NotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Malformed password hash")]
    HashFormat,

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AuthError {
    /// True for errors that mean the caller presented a bad credential, as
    /// opposed to the subsystem being unable to decide.
    pub fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            AuthError::MissingCredential
                | AuthError::MalformedHeader
                | AuthError::InvalidSignature
                | AuthError::UnsupportedAlgorithm
                | AuthError::Expired
                | AuthError::Revoked
                | AuthError::NotFound
                | AuthError::InvalidCredentials
        )
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // Credential failures stay distinguishable internally (the variant is
        // logged) but collapse to a generic 401 body so responses leak nothing
        // about which check failed.
        let (status, error_code, message) = match &self {
            AuthError::MissingCredential
            | AuthError::MalformedHeader
            | AuthError::InvalidSignature
            | AuthError::UnsupportedAlgorithm
            | AuthError::Expired
            | AuthError::Revoked
            | AuthError::NotFound
            | AuthError::InvalidCredentials => {
                tracing::debug!(error = ?self, "rejected credential");
                (
                    StatusCode::UNAUTHORIZED,
                    "unauthorized",
                    "Invalid or missing credentials".to_string(),
                )
            }
            AuthError::Config(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "configuration_error",
                msg.clone(),
            ),
            AuthError::HashFormat | AuthError::StoreUnavailable(_) => {
                tracing::error!(error = ?self, "authentication infrastructure failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        (
            status,
            Json(serde_json::json!({
                "error": error_code,
                "message": message
            })),
        )
            .into_response()
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AuthError::NotFound,
            other => {
                tracing::error!("Database error: {:?}", other);
                AuthError::StoreUnavailable(other.to_string())
            }
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        tracing::debug!("JWT error: {:?}", err);
        match err.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                AuthError::UnsupportedAlgorithm
            }
            // Bad signature, wrong issuer, garbled segments: none of these are
            // tokens we issued.
            _ => AuthError::InvalidSignature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_failures_are_classified() {
        assert!(AuthError::Expired.is_credential_failure());
        assert!(AuthError::Revoked.is_credential_failure());
        assert!(AuthError::MalformedHeader.is_credential_failure());
        assert!(!AuthError::StoreUnavailable("down".into()).is_credential_failure());
        assert!(!AuthError::HashFormat.is_credential_failure());
    }

    #[test]
    fn store_failure_is_not_unauthorized() {
        let resp = AuthError::StoreUnavailable("connection refused".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let resp = AuthError::Revoked.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
