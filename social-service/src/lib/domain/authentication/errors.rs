use auth::AuthenticationError;
use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

use crate::user::errors::UserError;

/// Error for Password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password too long: maximum {max} bytes, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Errors raised by sign-up, sign-in and token parsing.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("user already exists: {0}")]
    DuplicateCredential(String),

    #[error("user not found")]
    UserNotFound,

    #[error("invalid password")]
    InvalidPassword,

    #[error(transparent)]
    Token(#[from] JwtError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UsernameAlreadyExists(username) => {
                AuthError::DuplicateCredential(format!("username {}", username))
            }
            UserError::EmailAlreadyExists(email) => {
                AuthError::DuplicateCredential(format!("email {}", email))
            }
            UserError::NotFound(_) => AuthError::UserNotFound,
            UserError::DatabaseError(msg) => AuthError::DatabaseError(msg),
            other => AuthError::Unknown(other.to_string()),
        }
    }
}

impl From<AuthenticationError> for AuthError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidPassword => AuthError::InvalidPassword,
            AuthenticationError::PasswordError(e) => AuthError::Password(e),
            AuthenticationError::JwtError(e) => AuthError::Token(e),
        }
    }
}
