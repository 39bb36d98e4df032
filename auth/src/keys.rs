use std::fs;
use std::path::Path;
use std::path::PathBuf;

use jsonwebtoken::crypto;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use thiserror::Error;

const PROBE_MESSAGE: &[u8] = b"key-pair-probe";

/// Error raised while loading signing key material.
///
/// Always fatal: the service cannot authenticate anyone without both keys.
#[derive(Debug, Error)]
pub enum KeyLoadError {
    #[error("could not read key file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse private key: {0}")]
    InvalidPrivateKey(String),

    #[error("could not parse public key: {0}")]
    InvalidPublicKey(String),

    #[error("public key does not match private key")]
    Mismatch,
}

/// RSA key pair used for RS256 token signing and verification.
///
/// Built once at startup and handed to the issuer (private half) and the
/// verifier (public half). Never mutated afterwards.
#[derive(Clone)]
pub struct KeyPair {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl KeyPair {
    /// Read and parse a PEM key pair from disk.
    ///
    /// Accepts PKCS#1 or PKCS#8 private keys and PKCS#1 or SPKI public keys.
    ///
    /// # Errors
    /// * `Read` - A file is missing or unreadable
    /// * `InvalidPrivateKey` / `InvalidPublicKey` - Not a usable PEM RSA key
    /// * `Mismatch` - The two keys do not belong together
    pub fn load(
        private_key_path: impl AsRef<Path>,
        public_key_path: impl AsRef<Path>,
    ) -> Result<Self, KeyLoadError> {
        let private_pem = read_key_file(private_key_path.as_ref())?;
        let public_pem = read_key_file(public_key_path.as_ref())?;

        Self::from_pem(&private_pem, &public_pem)
    }

    /// Parse a key pair from in-memory PEM documents.
    ///
    /// A probe signature is produced with the private key and checked with the
    /// public key, so an unusable or mismatched pair is rejected here rather
    /// than on the first sign-in.
    pub fn from_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, KeyLoadError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_pem)
            .map_err(|e| KeyLoadError::InvalidPrivateKey(e.to_string()))?;
        let decoding_key = DecodingKey::from_rsa_pem(public_pem)
            .map_err(|e| KeyLoadError::InvalidPublicKey(e.to_string()))?;

        let signature = crypto::sign(PROBE_MESSAGE, &encoding_key, Algorithm::RS256)
            .map_err(|e| KeyLoadError::InvalidPrivateKey(e.to_string()))?;
        let matches = crypto::verify(&signature, PROBE_MESSAGE, &decoding_key, Algorithm::RS256)
            .map_err(|e| KeyLoadError::InvalidPublicKey(e.to_string()))?;

        if !matches {
            return Err(KeyLoadError::Mismatch);
        }

        Ok(Self {
            encoding_key,
            decoding_key,
        })
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

fn read_key_file(path: &Path) -> Result<Vec<u8>, KeyLoadError> {
    fs::read(path).map_err(|source| KeyLoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}
