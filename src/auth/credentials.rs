// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing with Argon2id.
//!
//! Digests are PHC strings (`$argon2id$v=19$m=...`) with a fresh random salt
//! per call. Never compare digests with `==`; go through [`verify_secret`].

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

#[derive(Debug, thiserror::Error)]
#[error("failed to hash secret: {0}")]
pub struct CredentialError(String);

/// Hash `secret` into a PHC-format Argon2id digest.
pub fn hash_secret(secret: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CredentialError(e.to_string()))
}

/// Check `secret` against a stored digest.
///
/// A malformed or empty digest is a mismatch, not an error.
pub fn verify_secret(secret: &str, digest: &str) -> bool {
    match PasswordHash::new(digest) {
        Ok(parsed) => Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let digest = hash_secret("correct horse battery").unwrap();
        assert!(digest.starts_with("$argon2id$"));
        assert!(verify_secret("correct horse battery", &digest));
        assert!(!verify_secret("correct horse battery!", &digest));
    }

    #[test]
    fn same_secret_gets_distinct_salts() {
        let a = hash_secret("password123").unwrap();
        let b = hash_secret("password123").unwrap();
        assert_ne!(a, b);
        assert!(verify_secret("password123", &a));
        assert!(verify_secret("password123", &b));
    }

    #[test]
    fn malformed_digest_never_verifies() {
        assert!(!verify_secret("anything", ""));
        assert!(!verify_secret("anything", "not-a-phc-string"));
        assert!(!verify_secret("anything", "anything"));
    }
}
