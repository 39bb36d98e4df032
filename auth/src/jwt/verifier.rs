use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::Claims;
use super::errors::JwtError;
use crate::keys::KeyPair;

const EXPECTED_ALGORITHM: Algorithm = Algorithm::RS256;

/// Verifies access tokens with the public half of a [`KeyPair`].
///
/// Stateless: holds only the public key and the validation rules, so a single
/// instance can be shared across any number of concurrent requests.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(keys: &KeyPair) -> Self {
        let mut validation = Validation::new(EXPECTED_ALGORITHM);
        // Expiry is checked against an explicit clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        Self {
            decoding_key: keys.decoding_key().clone(),
            validation,
        }
    }

    /// Verify `token` against the current time and return its subject.
    ///
    /// # Errors
    /// * `Malformed` - Wrong shape, foreign algorithm, missing or invalid claims
    /// * `SignatureInvalid` - Signature was not produced by the matching private key
    /// * `Expired` - The token's expiration instant has passed
    pub fn verify(&self, token: &str) -> Result<Uuid, JwtError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify `token` as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Uuid, JwtError> {
        if token.split('.').count() != 3 {
            return Err(JwtError::Malformed(
                "token contains an invalid number of segments".to_string(),
            ));
        }

        let header = decode_header(token).map_err(|e| JwtError::Malformed(e.to_string()))?;
        if header.alg != EXPECTED_ALGORITHM {
            return Err(JwtError::Malformed(format!(
                "unexpected signing algorithm {:?}",
                header.alg
            )));
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                // The header already decoded, so an undecodable segment here is the signature.
                ErrorKind::InvalidSignature | ErrorKind::Base64(_) | ErrorKind::Crypto(_) => {
                    JwtError::SignatureInvalid
                }
                _ => JwtError::Malformed(e.to_string()),
            })?
            .claims;

        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::Expired);
        }

        claims
            .subject()
            .ok_or_else(|| JwtError::Malformed("subject is not a valid identifier".to_string()))
    }
}
