//! Password Hashing
//!
//! Argon2id hashing and verification. Hashes are self-describing PHC strings
//! (algorithm, version, cost parameters and salt embedded), so verification
//! always uses the parameters the hash was created with, not the current
//! configuration.

use crate::error::AuthError;

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as PasswordHashError, PasswordHash, PasswordHasher,
        PasswordVerifier, SaltString,
    },
    Argon2, Params,
};

/// Argon2id password hasher built from configured cost parameters.
pub struct Hasher {
    argon2: Argon2<'static>,
}

impl Hasher {
    /// Build a hasher from cost parameters (see [`crate::config::AuthConfig`]).
    pub fn new(memory_cost: u32, time_cost: u32, parallelism: u32) -> Result<Self, AuthError> {
        let params = Params::new(memory_cost, time_cost, parallelism, None)
            .map_err(|e| AuthError::Config(format!("invalid Argon2 parameters: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params),
        })
    }

    /// Hash a password with a fresh random salt.
    ///
    /// Two calls on the same password yield different outputs.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!("Password hashing failed: {:?}", e);
                AuthError::HashFormat
            })?
            .to_string();

        Ok(hash)
    }

    /// Verify a password against a stored hash.
    ///
    /// A mismatch is `Ok(false)`; only a hash that cannot be parsed (corrupted
    /// storage) is an error.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            tracing::error!("Stored password hash is malformed: {:?}", e);
            AuthError::HashFormat
        })?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => {
                tracing::error!("Password verification failed structurally: {:?}", e);
                Err(AuthError::HashFormat)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Low-cost parameters so the test suite stays fast.
    fn hasher() -> Hasher {
        Hasher::new(8, 1, 1).expect("test parameters are valid")
    }

    #[test]
    fn hash_round_trips() {
        let h = hasher();
        let hash = h.hash("correct horse battery staple").unwrap();

        assert_ne!(hash, "correct horse battery staple");
        assert!(h.verify("correct horse battery staple", &hash).unwrap());
    }

    #[test]
    fn wrong_password_is_false_not_error() {
        let h = hasher();
        let hash = h.hash("correct horse battery staple").unwrap();

        assert!(!h.verify("Tr0ub4dor&3", &hash).unwrap());
    }

    #[test]
    fn hashing_is_salted() {
        let h = hasher();
        let first = h.hash("hunter2").unwrap();
        let second = h.hash("hunter2").unwrap();

        assert_ne!(first, second);
        assert!(h.verify("hunter2", &first).unwrap());
        assert!(h.verify("hunter2", &second).unwrap());
    }

    #[test]
    fn corrupted_hash_is_a_format_error() {
        let h = hasher();

        assert_eq!(
            h.verify("hunter2", "not-a-phc-string"),
            Err(AuthError::HashFormat)
        );
    }

    #[test]
    fn invalid_parameters_rejected() {
        // parallelism of zero is outside Argon2's allowed range
        assert!(Hasher::new(8, 1, 0).is_err());
    }
}
