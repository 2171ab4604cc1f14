use crate::error::{AppError, Result};

/// Work factor applied to every stored password digest.
const BCRYPT_COST: u32 = 10;

/// Hashes a plaintext password with a randomized salt.
///
/// # Arguments
///
/// * `password` - The plaintext password.
///
/// # Returns
///
/// A `Result` containing the bcrypt digest.
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))
}

/// Verifies a plaintext password against a stored digest.
///
/// A mismatch yields `Ok(false)`; an error is returned only when the
/// stored digest itself cannot be parsed.
///
/// # Arguments
///
/// * `password` - The plaintext password.
/// * `digest` - The stored bcrypt digest.
///
/// # Returns
///
/// A `Result` containing `true` when the password matches.
pub fn verify_password(password: &str, digest: &str) -> Result<bool> {
    bcrypt::verify(password, digest)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {e}")))
}
