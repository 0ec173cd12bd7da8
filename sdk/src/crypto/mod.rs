//! # Cryptographic Primitives
//!
//! Every signature, every address, every domain-separated digest in the SDK
//! flows through here.
//!
//! We deliberately chose boring, well-audited cryptography:
//!
//! - **Ed25519** for signatures: deterministic, 64-byte signatures, and the
//!   ledger's native single-signer scheme.
//! - **SHA3-256** for authentication keys and signing prefixes, because the
//!   ledger says so.
//! - **SHA-256** for the occasional legacy digest a host still wants.
//!
//! Randomness comes from an injected [`CryptoProvider`] so that every
//! account owns its own RNG handle. No global RNG state, no surprises when
//! two accounts live in the same process.

pub mod hash;
pub mod keys;
pub mod provider;
pub mod signatures;

use thiserror::Error;

pub use hash::{sha256, sha256_hex, sha3_256, sha3_256_multi};
pub use keys::{derive_authentication_key, Ed25519PublicKey, Ed25519Signature};
pub use provider::{CryptoProvider, OsCryptoProvider, SeededCryptoProvider};
pub use signatures::{verify, verify_raw};

/// Errors from the cryptographic layer.
///
/// Messages never include key material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// The random source could not produce key material.
    #[error("crypto initialization failed: {0}")]
    CryptoInitFailure(String),

    #[error("invalid public key: not a valid Ed25519 point")]
    InvalidPublicKey,

    #[error("invalid signature bytes: expected 64 bytes")]
    InvalidSignature,

    #[error("signature verification failed")]
    VerificationFailed,
}
