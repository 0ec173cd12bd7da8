//! # Hashing Utilities
//!
//! Two hash functions, and we refuse to support more without a very good
//! reason:
//!
//! - **SHA3-256**: what the ledger uses for authentication keys, signing
//!   salts and transaction identifiers. If it goes on-chain, it's SHA3.
//! - **SHA-256**: kept for hosts that fingerprint payloads or keys with the
//!   digest everyone else already speaks.

use sha2::Sha256;
use sha3::{Digest, Sha3_256};

/// Compute the SHA-256 digest of `data`.
///
/// # Example
///
/// ```
/// use aptos_lite_sdk::crypto::sha256;
///
/// let hash = sha256(b"aptos");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-256 rendered as lowercase hex. 64 characters, no prefix.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// Compute the SHA3-256 digest of `data`.
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash multiple byte slices together without concatenation overhead.
///
/// Feeding the parts sequentially gives the same digest as hashing their
/// concatenation, minus the temporary buffer. Used for `salt || body`
/// constructions.
pub fn sha3_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}
