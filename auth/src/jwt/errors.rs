use thiserror::Error;

/// Error type for JWT operations.
///
/// `Signing` is an internal failure; the remaining variants describe why a
/// presented token was rejected and their messages are safe to show callers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("failed to sign token: {0}")]
    Signing(String),

    #[error("token is malformed: {0}")]
    Malformed(String),

    #[error("token signature is invalid")]
    SignatureInvalid,

    #[error("token is expired")]
    Expired,
}
