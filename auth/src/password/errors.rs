use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Verification ran to completion and the password did not match.
    #[error("Password does not match")]
    Mismatch,

    /// Verification could not run because the stored hash is unusable.
    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}
