// src/auth/token.rs
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// 32 random bytes encode to a 43 character token.
pub const TOKEN_BYTES: usize = 32;

/// A fresh token from the OS RNG, for magic links and sessions.
pub fn new_token() -> String {
    generate_token(&mut OsRng, TOKEN_BYTES)
}

/// Base64 URL-safe without padding, so tokens can sit in query strings and cookies as-is.
pub fn generate_token<R: RngCore>(rng: &mut R, nbytes: usize) -> String {
    let mut buf = vec![0u8; nbytes];
    rng.fill_bytes(&mut buf);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&buf)
}

/// SHA-256 of the raw token. Only this is stored.
pub fn hash_token(token: &str) -> [u8; 32] {
    let digest = Sha256::digest(token.as_bytes());
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}
