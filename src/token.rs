//! Access Tokens
//!
//! Issues and validates the short-lived signed identity assertions. Tokens are
//! compact JWTs signed with HMAC-SHA256; validity is a pure function of the
//! signature and the embedded timestamps, so no store lookup is involved and a
//! token cannot be revoked before its natural expiry. Compromise is handled by
//! rotating the signing secret, which invalidates every outstanding token at
//! once.

use crate::error::AuthError;
use crate::models::AccessTokenClaims;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

/// Fixed issuer claim identifying this service.
pub const ISSUER: &str = "warbler";

/// Issue an access token for `subject`, valid for `ttl` from now.
pub fn issue(subject: Uuid, key: &EncodingKey, ttl: Duration) -> Result<String, AuthError> {
    let now = Utc::now();

    let claims = AccessTokenClaims {
        iss: ISSUER.to_string(),
        sub: subject.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    let token = encode(&Header::default(), &claims, key)?;
    Ok(token)
}

/// Validate an access token and return its subject.
///
/// Rejects tokens whose `alg` tag is anything but HS256
/// (`UnsupportedAlgorithm`), tokens not signed by `key` or carrying the wrong
/// issuer (`InvalidSignature`), and tokens past their expiry (`Expired`).
pub fn validate(token: &str, key: &DecodingKey) -> Result<Uuid, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    // The library's exp check applies a 60s leeway; expiry here must be
    // second-exact, so it is enforced explicitly below.
    validation.validate_exp = false;

    let token_data = decode::<AccessTokenClaims>(token, key, &validation)?;
    let claims = token_data.claims;

    if Utc::now().timestamp() >= claims.exp {
        return Err(AuthError::Expired);
    }

    // A subject we cannot parse is not a token we issued.
    Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidSignature)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(secret: &str) -> (EncodingKey, DecodingKey) {
        (
            EncodingKey::from_secret(secret.as_bytes()),
            DecodingKey::from_secret(secret.as_bytes()),
        )
    }

    #[test]
    fn round_trip_returns_subject() {
        let (enc, dec) = keys("kronos");
        let subject = Uuid::new_v4();

        let token = issue(subject, &enc, Duration::minutes(10)).unwrap();
        assert_eq!(validate(&token, &dec).unwrap(), subject);
    }

    #[test]
    fn short_lived_token_expires() {
        let (enc, dec) = keys("rhea");
        let token = issue(Uuid::new_v4(), &enc, Duration::milliseconds(10)).unwrap();

        std::thread::sleep(std::time::Duration::from_millis(15));

        assert_eq!(validate(&token, &dec), Err(AuthError::Expired));
    }

    #[test]
    fn wrong_secret_is_invalid_signature() {
        let (enc, _) = keys("kronos");
        let (_, other_dec) = keys("hyperion");

        let token = issue(Uuid::new_v4(), &enc, Duration::minutes(10)).unwrap();

        assert_eq!(validate(&token, &other_dec), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn non_hs256_algorithm_is_rejected() {
        let claims = AccessTokenClaims {
            iss: ISSUER.to_string(),
            sub: Uuid::new_v4().to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::minutes(10)).timestamp(),
        };
        let (enc, dec) = keys("kronos");
        let token = encode(&Header::new(Algorithm::HS384), &claims, &enc).unwrap();

        assert_eq!(validate(&token, &dec), Err(AuthError::UnsupportedAlgorithm));
    }

    #[test]
    fn foreign_issuer_is_rejected() {
        let claims = AccessTokenClaims {
            iss: "someone-else".to_string(),
            sub: Uuid::new_v4().to_string(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::minutes(10)).timestamp(),
        };
        let (enc, dec) = keys("kronos");
        let token = encode(&Header::default(), &claims, &enc).unwrap();

        assert_eq!(validate(&token, &dec), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn garbage_is_invalid_signature() {
        let (_, dec) = keys("kronos");

        assert_eq!(validate("not.a.token", &dec), Err(AuthError::InvalidSignature));
        assert_eq!(validate("", &dec), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn concurrent_validation_agrees() {
        let (enc, dec) = keys("kronos");
        let subject = Uuid::new_v4();
        let token = issue(subject, &enc, Duration::minutes(10)).unwrap();

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..16)
                .map(|_| s.spawn(|| validate(&token, &dec).unwrap()))
                .collect();

            for handle in handles {
                assert_eq!(handle.join().unwrap(), subject);
            }
        });
    }
}
