// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Salted, slow password hashing (PBKDF2-HMAC-SHA256).
//!
//! Hashes are self-describing so the iteration count can be raised later
//! without invalidating existing users:
//!
//! ```text
//! pbkdf2-sha256$<iterations>$<salt, base64>$<derived key, base64>
//! ```

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use ring::rand::{SecureRandom, SystemRandom};
use ring::{digest, pbkdf2};
use std::num::NonZeroU32;

static ALGORITHM: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;
const SCHEME: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;
const CREDENTIAL_LEN: usize = digest::SHA256_OUTPUT_LEN;

/// Errors from password hashing.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Iteration count must be positive")]
    InvalidIterations,

    #[error("System random source failed")]
    Random,
}

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str, iterations: u32) -> Result<String, PasswordError> {
    let iterations = NonZeroU32::new(iterations).ok_or(PasswordError::InvalidIterations)?;

    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| PasswordError::Random)?;

    let mut credential = [0u8; CREDENTIAL_LEN];
    pbkdf2::derive(
        ALGORITHM,
        iterations,
        &salt,
        password.as_bytes(),
        &mut credential,
    );

    Ok(format!(
        "{}${}${}${}",
        SCHEME,
        iterations,
        STANDARD_NO_PAD.encode(salt),
        STANDARD_NO_PAD.encode(credential)
    ))
}

/// Decoded parts of an encoded hash.
struct EncodedHash {
    iterations: NonZeroU32,
    salt: Vec<u8>,
    credential: Vec<u8>,
}

fn decode_hash(encoded: &str) -> Option<EncodedHash> {
    let mut parts = encoded.split('$');
    let (Some(SCHEME), Some(iterations), Some(salt), Some(credential), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return None;
    };

    Some(EncodedHash {
        iterations: iterations.parse::<u32>().ok().and_then(NonZeroU32::new)?,
        salt: STANDARD_NO_PAD.decode(salt).ok()?,
        credential: STANDARD_NO_PAD.decode(credential).ok()?,
    })
}

/// Check `password` against an encoded hash.
///
/// A malformed hash never matches.
pub fn verify_password(password: &str, encoded: &str) -> bool {
    let Some(hash) = decode_hash(encoded) else {
        return false;
    };

    pbkdf2::verify(
        ALGORITHM,
        hash.iterations,
        &hash.salt,
        password.as_bytes(),
        &hash.credential,
    )
    .is_ok()
}

/// A well-formed hash that no password matches, at the given cost.
///
/// Verifying against it costs the same as verifying a real user's hash.
pub fn dummy_hash(iterations: u32) -> String {
    format!(
        "{}${}${}${}",
        SCHEME,
        iterations.max(1),
        STANDARD_NO_PAD.encode([0u8; SALT_LEN]),
        STANDARD_NO_PAD.encode([0u8; CREDENTIAL_LEN])
    )
}
