//! Credential Extraction
//!
//! Parses the `Authorization` header into either a bearer token (end users)
//! or a shared API key (the trusted webhook caller), plus the request
//! extractor that hands the authenticated identity to downstream handlers.
//!
//! Header parsing is strict: exactly one scheme keyword, one space, one
//! non-empty value. Anything else is `MalformedHeader`, never a panic or an
//! out-of-bounds slice.

use crate::error::AuthError;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use uuid::Uuid;

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    scheme_value(headers, "Bearer")
}

/// Extract the key from an `Authorization: ApiKey <key>` header.
pub fn api_key(headers: &HeaderMap) -> Result<&str, AuthError> {
    scheme_value(headers, "ApiKey")
}

fn scheme_value<'a>(headers: &'a HeaderMap, scheme: &str) -> Result<&'a str, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingCredential)?;

    let value = header.to_str().map_err(|_| AuthError::MalformedHeader)?;

    match value.split_once(' ') {
        Some((keyword, credential))
            if keyword == scheme && !credential.is_empty() && !credential.contains(' ') =>
        {
            Ok(credential)
        }
        _ => Err(AuthError::MalformedHeader),
    }
}

/// Constant-time byte comparison to prevent timing attacks.
///
/// Length mismatch returns early; the contents never short-circuit.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Authenticated user identity, inserted into request extensions by
/// [`crate::middleware::require_user`].
///
/// The extractor performs no validation itself; a request that skipped the
/// middleware is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or(AuthError::MissingCredential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(v) = value {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(v).unwrap());
        }
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        assert_eq!(
            bearer_token(&headers(Some("Bearer abc123"))).unwrap(),
            "abc123"
        );
    }

    #[test]
    fn missing_header_is_missing_credential() {
        assert_eq!(
            bearer_token(&headers(None)),
            Err(AuthError::MissingCredential)
        );
    }

    #[test]
    fn bare_scheme_is_malformed() {
        assert_eq!(
            bearer_token(&headers(Some("Bearer"))),
            Err(AuthError::MalformedHeader)
        );
    }

    #[test]
    fn empty_value_is_malformed() {
        assert_eq!(
            bearer_token(&headers(Some("Bearer "))),
            Err(AuthError::MalformedHeader)
        );
    }

    #[test]
    fn extra_spaces_are_malformed() {
        assert_eq!(
            bearer_token(&headers(Some("Bearer abc 123"))),
            Err(AuthError::MalformedHeader)
        );
        assert_eq!(
            bearer_token(&headers(Some("Bearer  abc123"))),
            Err(AuthError::MalformedHeader)
        );
    }

    #[test]
    fn wrong_scheme_is_malformed() {
        assert_eq!(
            bearer_token(&headers(Some("Basic dXNlcjpwYXNz"))),
            Err(AuthError::MalformedHeader)
        );
        // scheme keyword is case-sensitive
        assert_eq!(
            bearer_token(&headers(Some("bearer abc123"))),
            Err(AuthError::MalformedHeader)
        );
    }

    #[test]
    fn api_key_uses_its_own_scheme() {
        let h = headers(Some("ApiKey f271c81ff7084ee5"));

        assert_eq!(api_key(&h).unwrap(), "f271c81ff7084ee5");
        assert_eq!(bearer_token(&h), Err(AuthError::MalformedHeader));
    }

    #[test]
    fn constant_time_eq_works() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"short", b"longer"));
        assert!(constant_time_eq(b"", b""));
    }
}
