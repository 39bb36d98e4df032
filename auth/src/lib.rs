//! Authentication utilities library
//!
//! Provides the authentication infrastructure of the social service:
//! - RSA key pair loading (PEM, PKCS#1 / PKCS#8 / SPKI)
//! - Password hashing (Argon2id)
//! - RS256 access token issuance and verification
//! - Opaque refresh values
//! - Authentication coordination
//!
//! The service defines its own ports and maps these errors onto its domain.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! assert!(hasher.verify("other_password", &hash).is_err());
//! ```
//!
//! ## Complete Authentication Flow
//! ```no_run
//! use auth::{Authenticator, KeyPair};
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let keys = KeyPair::load("certs/private.pem", "certs/public.pem").unwrap();
//! let auth = Authenticator::new(&keys, Duration::hours(12));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue tokens
//! let user_id = Uuid::new_v4();
//! let tokens = auth.authenticate("password123", &hash, user_id).unwrap();
//!
//! // Validate token
//! assert_eq!(auth.validate_token(&tokens.access_token).unwrap(), user_id);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod keys;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::TokenIssuer;
pub use jwt::TokenVerifier;
pub use keys::KeyLoadError;
pub use keys::KeyPair;
pub use password::PasswordError;
pub use password::PasswordHasher;
