//! Password hashing and verification for fsbrowse.
//!
//! Uses Argon2id for password hashing.

use std::sync::OnceLock;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};
use rand_core::OsRng;
use thiserror::Error;

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// Password hash is invalid.
    #[error("invalid password hash format")]
    InvalidHash,

    /// Password verification failed (wrong password).
    #[error("password verification failed")]
    VerificationFailed,
}

/// Input hashed once per process to produce the placeholder hash used for
/// logins against unknown users.
const PLACEHOLDER_PASSWORD: &str = "fsbrowse-placeholder-credential";

static PLACEHOLDER_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Create the Argon2 hasher.
///
/// Parameters:
/// - Memory cost: 64 MB (65536 KiB)
/// - Time cost: 3 iterations
/// - Parallelism: 4 lanes
fn create_argon2() -> Result<Argon2<'static>, PasswordError> {
    let m_cost = 65536;
    let t_cost = 3;
    let p_cost = 4;

    let params = Params::new(m_cost, t_cost, p_cost, None)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;
    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    ))
}

/// Hash a password using Argon2id.
///
/// Returns a PHC-formatted hash string that includes the salt and parameters.
///
/// # Examples
///
/// ```
/// use fsbrowse::hash_password;
///
/// let hash = hash_password("securePass!").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = create_argon2()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
///
/// # Examples
///
/// ```
/// use fsbrowse::{hash_password, verify_password};
///
/// let hash = hash_password("securePass!").unwrap();
/// assert!(verify_password("securePass!", &hash).is_ok());
/// assert!(verify_password("wrong", &hash).is_err());
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

    // Parameters come from the parsed hash, not from create_argon2().
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| PasswordError::VerificationFailed)
}

/// Check that `hash` is a parseable PHC string.
pub fn check_hash_format(hash: &str) -> Result<(), PasswordError> {
    PasswordHash::new(hash)
        .map(|_| ())
        .map_err(|_| PasswordError::InvalidHash)
}

/// Run a full verification against the process-wide placeholder hash.
///
/// Called when a login names an unknown user so that the response takes
/// roughly as long as a wrong-password attempt. The result is discarded.
pub fn verify_placeholder(password: &str) {
    if let Some(hash) = placeholder_hash() {
        let _ = verify_password(password, hash);
    }
}

/// Compute the placeholder hash ahead of the first login.
pub fn warm_placeholder() {
    let _ = placeholder_hash();
}

fn placeholder_hash() -> Option<&'static String> {
    PLACEHOLDER_HASH
        .get_or_init(|| hash_password(PLACEHOLDER_PASSWORD).ok())
        .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_success() {
        let hash = hash_password("password").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("$v=19$"));
        assert!(hash.contains("m=65536"));
        assert!(hash.contains("t=3"));
        assert!(hash.contains("p=4"));
    }

    #[test]
    fn test_hash_password_different_salts() {
        let hash1 = hash_password("same_password").unwrap();
        let hash2 = hash_password("same_password").unwrap();

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_correct_and_wrong() {
        let hash = hash_password("password123").unwrap();

        assert!(verify_password("password123", &hash).is_ok());
        assert!(matches!(
            verify_password("password124", &hash),
            Err(PasswordError::VerificationFailed)
        ));
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        let result = verify_password("any_password", "not_a_valid_hash");
        assert!(matches!(result, Err(PasswordError::InvalidHash)));
    }

    #[test]
    fn test_empty_password_round_trip() {
        let hash = hash_password("").unwrap();
        assert!(verify_password("", &hash).is_ok());
        assert!(verify_password(" ", &hash).is_err());
    }

    #[test]
    fn test_check_hash_format() {
        let hash = hash_password("password").unwrap();
        assert!(check_hash_format(&hash).is_ok());
        assert!(matches!(
            check_hash_format("plaintext-password"),
            Err(PasswordError::InvalidHash)
        ));
    }

    #[test]
    fn test_placeholder_hash_is_stable() {
        let first = placeholder_hash().cloned();
        let second = placeholder_hash().cloned();
        assert!(first.is_some());
        assert_eq!(first, second);

        // Must not panic regardless of input.
        verify_placeholder("anything");
    }
}
