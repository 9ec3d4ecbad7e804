use std::sync::LazyLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::AuthError;

/// Hash a password into a PHC string (Argon2id, random salt).
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Check a password against a stored PHC string. A malformed stored hash
/// never verifies.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        tracing::warn!("stored password hash is malformed");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Stand-in hash checked when the username is unknown.
static UNKNOWN_ACCOUNT_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password("unknown-account").unwrap_or_default());

/// Check a login attempt against the account's stored hash, if there is
/// one. An unknown account still pays for one verification and never
/// succeeds.
pub fn verify_login(password: &str, stored: Option<&str>) -> bool {
    verify_login_with(password, stored, verify_password)
}

/// [`verify_login`] with the verifier supplied by the caller.
pub fn verify_login_with(
    password: &str,
    stored: Option<&str>,
    verify: impl Fn(&str, &str) -> bool,
) -> bool {
    match stored {
        Some(hash) => verify(password, hash),
        None => {
            verify(password, &UNKNOWN_ACCOUNT_HASH);
            false
        }
    }
}
