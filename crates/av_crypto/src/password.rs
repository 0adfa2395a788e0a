//! Credential hashing — Argon2id with per-hash random salt.
//!
//! The PHC string returned by [`CredentialHasher::hash`] embeds the
//! algorithm, version, parameters, and salt, so verification never needs
//! external configuration. Hashing the same password twice yields two
//! different tokens (fresh salt per call).

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, SaltString},
    Argon2, Params, PasswordHasher as _, PasswordVerifier as _, Version,
};

use crate::error::CryptoError;

/// Argon2id parameters — tuned for interactive (login) use.
fn default_params() -> Params {
    Params::new(
        64 * 1024, // m_cost: 64 MiB
        3,         // t_cost: 3 iterations
        1,         // p_cost: 1 thread
        None,
    )
    .expect("static Argon2 params are always valid")
}

/// One-way password hasher with a tunable work factor.
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    /// Hasher with a custom work factor (higher t_cost/m_cost = slower).
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password into a self-describing PHC token.
    pub fn hash(&self, password: &str) -> Result<String, CryptoError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CryptoError::PasswordHash(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Verify a plaintext password against a stored token.
    ///
    /// Fails closed: a malformed token returns `false`, never an error, so
    /// callers present a uniform "bad credentials" outcome.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored) else {
            return false;
        };
        // Params come from the token itself, not from self.params.
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new(default_params())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hasher = CredentialHasher::default();
        let token = hasher.hash("correct horse battery staple").unwrap();
        assert!(hasher.verify("correct horse battery staple", &token));
        assert!(!hasher.verify("correct horse battery stable", &token));
    }

    #[test]
    fn salt_is_unique_per_hash() {
        let hasher = CredentialHasher::default();
        let a = hasher.hash("same password").unwrap();
        let b = hasher.hash("same password").unwrap();
        assert_ne!(a, b);
        assert!(hasher.verify("same password", &a));
        assert!(hasher.verify("same password", &b));
    }

    #[test]
    fn malformed_token_fails_closed() {
        let hasher = CredentialHasher::default();
        assert!(!hasher.verify("anything", "not-a-phc-string"));
        assert!(!hasher.verify("anything", ""));
        assert!(!hasher.verify("anything", "$argon2id$v=19$garbage"));
    }

    #[test]
    fn token_embeds_algorithm_and_params() {
        let hasher = CredentialHasher::default();
        let token = hasher.hash("pw").unwrap();
        assert!(token.starts_with("$argon2id$"));
        assert!(token.contains("m=65536"));
    }
}
