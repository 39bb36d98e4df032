use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use uuid::Uuid;

use super::claims::Claims;
use super::errors::JwtError;
use crate::keys::KeyPair;

/// Signs access tokens with the private half of a [`KeyPair`] (RS256).
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    token_ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer signing with `keys` and issuing tokens valid for `token_ttl`.
    ///
    /// # Panics
    /// Panics if `token_ttl` is not strictly positive.
    pub fn new(keys: &KeyPair, token_ttl: Duration) -> Self {
        assert!(token_ttl > Duration::zero(), "token TTL must be positive");

        Self {
            encoding_key: keys.encoding_key().clone(),
            token_ttl,
        }
    }

    /// Token lifetime applied to every issued token.
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Issue a signed access token for `subject`, valid from now.
    ///
    /// # Errors
    /// * `Signing` - The private key could not produce a signature
    pub fn issue(&self, subject: Uuid) -> Result<String, JwtError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a signed access token for `subject` as if the current time were `now`.
    pub fn issue_at(&self, subject: Uuid, now: DateTime<Utc>) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, now, self.token_ttl)
            .ok_or_else(|| JwtError::Signing("token expiration is out of range".to_string()))?;

        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::Signing(e.to_string()))
    }
}
