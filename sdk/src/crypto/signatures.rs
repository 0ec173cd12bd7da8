//! # Digital Signatures
//!
//! Ed25519 verification entry points for callers that hold only public
//! material. Signing lives on [`crate::account::KeyAccount`], the sole owner
//! of the seed.
//!
//! ## Strictness
//!
//! Verification goes through `ed25519-dalek`'s standard checks. Malformed
//! public keys fail closed; we never report *why* a signature was rejected
//! beyond the coarse [`CryptoError`] variant.

use ed25519_dalek::{Signature as DalekSignature, Verifier, VerifyingKey};

use super::keys::{Ed25519PublicKey, Ed25519Signature};
use super::CryptoError;
use crate::config::{PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};

/// Verify an Ed25519 signature against a public key and message.
///
/// Returns `true` if the signature is valid, `false` otherwise. "Invalid
/// signature" and "wrong public key" look the same from here on purpose.
///
/// # Example
///
/// ```
/// use aptos_lite_sdk::account::KeyAccount;
/// use aptos_lite_sdk::crypto::verify;
///
/// let mut account = KeyAccount::new();
/// account.create_random().unwrap();
/// let signature = account.sign(b"send 100 APT to alice").unwrap();
///
/// let public_key = account.public_key().unwrap();
/// assert!(verify(&public_key, b"send 100 APT to alice", &signature));
/// ```
pub fn verify(public_key: &Ed25519PublicKey, message: &[u8], signature: &Ed25519Signature) -> bool {
    public_key.verify(message, signature)
}

/// Verify a signature using raw byte components.
///
/// This is the "I got these bytes off the wire" variant: the public key is
/// parsed and checked as a curve point before verification.
pub fn verify_raw(
    public_key_bytes: &[u8; PUBLIC_KEY_LENGTH],
    message: &[u8],
    signature_bytes: &[u8; SIGNATURE_LENGTH],
) -> Result<(), CryptoError> {
    let verifying_key =
        VerifyingKey::from_bytes(public_key_bytes).map_err(|_| CryptoError::InvalidPublicKey)?;

    let signature = DalekSignature::from_bytes(signature_bytes);

    verifying_key
        .verify(message, &signature)
        .map_err(|_| CryptoError::VerificationFailed)
}
