use chrono::Duration;
use uuid::Uuid;

use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenVerifier;
use crate::keys::KeyPair;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::refresh::generate_refresh_token;

/// Authentication coordinator combining password verification and token handling.
///
/// Provides high-level authentication operations by coordinating the
/// password hasher, the token issuer and the token verifier. The private key
/// only ever reaches the issuer and the public key only the verifier.
#[derive(Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
}

/// Tokens handed out on successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Signed RS256 access token
    pub access_token: String,
    /// Opaque hex value, never validated
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("invalid password")]
    InvalidPassword,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `keys` - Loaded RSA key pair
    /// * `token_ttl` - Lifetime of issued access tokens
    pub fn new(keys: &KeyPair, token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            issuer: TokenIssuer::new(keys, token_ttl),
            verifier: TokenVerifier::new(keys),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token pair for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Account identifier placed in the access token
    ///
    /// # Errors
    /// * `InvalidPassword` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `JwtError` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: Uuid,
    ) -> Result<TokenPair, AuthenticationError> {
        match self.password_hasher.verify(password, stored_hash) {
            Ok(()) => {}
            Err(PasswordError::Mismatch) => return Err(AuthenticationError::InvalidPassword),
            Err(e) => return Err(e.into()),
        }

        let access_token = self.issuer.issue(subject)?;

        Ok(TokenPair {
            access_token,
            refresh_token: generate_refresh_token(),
        })
    }

    /// Validate an access token and return its subject.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, forged or expired
    pub fn validate_token(&self, token: &str) -> Result<Uuid, JwtError> {
        self.verifier.verify(token)
    }
}
