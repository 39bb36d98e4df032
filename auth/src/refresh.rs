use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;

const REFRESH_TOKEN_BYTES: usize = 32;

/// Generate an opaque refresh value: 256 random bits, hex encoded.
///
/// Nothing in this crate validates or redeems it.
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
