//! # Password hashing and verification — Argon2id
//!
//! - [`hash_password`] — generates a random salt via [`OsRng`], hashes the plaintext
//!   password with the default Argon2id parameters, and returns the result as a
//!   PHC-format string (e.g. `$argon2id$v=19$m=19456,t=2,p=1$...`). This is what
//!   goes into `auth.password`.
//!
//! - [`verify_password`] — parses a PHC-format hash and checks whether the provided
//!   plaintext matches. Returns `Ok(true)` on success, `Ok(false)` on mismatch, or
//!   `Err` if the stored hash is malformed.
//!
//! - [`verify_admin_password`] — checks a login attempt against `auth.password`,
//!   which may also be a plaintext secret; that case is compared in constant time.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use subtle::ConstantTimeEq;
use tracing::warn;

/// Hash a password using Argon2id. Returns a PHC-format string.
pub fn hash_password(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| format!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Verify a password against a PHC-format hash string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| format!("Invalid password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Check a login attempt against the configured admin password.
pub fn verify_admin_password(candidate: &str, configured: &str) -> bool {
    if configured.is_empty() {
        return false;
    }
    if configured.starts_with("$argon2") {
        return verify_password(candidate, configured).unwrap_or_else(|e| {
            warn!("Configured admin password is unusable: {}", e);
            false
        });
    }
    candidate.as_bytes().ct_eq(configured.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("hunter22").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter22", &hash).unwrap());
        assert!(!verify_password("hunter23", &hash).unwrap());
        assert!(verify_password("x", "not a hash").is_err());
    }

    #[test]
    fn test_admin_password_forms() {
        let hash = hash_password("s3cret").unwrap();
        assert!(verify_admin_password("s3cret", &hash));
        assert!(!verify_admin_password("wrong", &hash));

        assert!(verify_admin_password("plain", "plain"));
        assert!(!verify_admin_password("plai", "plain"));
        assert!(!verify_admin_password("", ""));
    }
}
