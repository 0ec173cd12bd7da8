//! # Key Material
//!
//! Ed25519 public keys, signatures, and the handful of operations that need
//! the raw 32-byte seed.
//!
//! There is no keypair type here on purpose. The seed is owned by exactly one
//! place, [`crate::account::KeyAccount`], and these functions only borrow it
//! for the duration of a single derivation or signature. The
//! `ed25519_dalek::SigningKey` built inside them is zeroized when it drops.
//!
//! ## Security considerations
//!
//! - Key bytes are never logged. If you add logging to this module, you will
//!   be asked to leave.
//! - Public keys parsed from untrusted input are checked to be valid curve
//!   points before anything else happens to them.

use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::hash::sha3_256_multi;
use super::CryptoError;
use crate::config::{ED25519_SCHEME, PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use crate::encoding::{decode_hex, CodecError};

/// Derives the Ed25519 verifying key for a 32-byte seed.
pub fn derive_public_key(seed: &[u8; PRIVATE_KEY_LENGTH]) -> Ed25519PublicKey {
    let signing_key = SigningKey::from_bytes(seed);
    Ed25519PublicKey {
        bytes: signing_key.verifying_key().to_bytes(),
    }
}

/// Signs `message` with the key derived from `seed`.
///
/// Ed25519 is deterministic: the same (seed, message) pair always yields the
/// same 64 bytes. No nonce games.
pub fn sign_with_seed(seed: &[u8; PRIVATE_KEY_LENGTH], message: &[u8]) -> Ed25519Signature {
    let signing_key = SigningKey::from_bytes(seed);
    Ed25519Signature {
        bytes: signing_key.sign(message).to_bytes(),
    }
}

/// Authentication key for a single-signer Ed25519 account:
/// `SHA3-256(public_key || 0x00)`.
///
/// For a freshly created account this is also its address.
pub fn derive_authentication_key(public_key: &Ed25519PublicKey) -> [u8; 32] {
    sha3_256_multi(&[public_key.as_bytes(), &[ED25519_SCHEME]])
}

// ---------------------------------------------------------------------------
// Ed25519PublicKey
// ---------------------------------------------------------------------------

/// The public half of an account identity, safe to share with the world.
#[derive(Clone, PartialEq, Eq)]
pub struct Ed25519PublicKey {
    bytes: [u8; PUBLIC_KEY_LENGTH],
}

impl Ed25519PublicKey {
    /// Wraps raw bytes without validating them. Use
    /// [`try_from_slice`](Self::try_from_slice) for untrusted input.
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Validates the length and that the bytes represent a valid Ed25519 point.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, CryptoError> {
        let bytes: [u8; PUBLIC_KEY_LENGTH] =
            slice.try_into().map_err(|_| CryptoError::InvalidPublicKey)?;
        VerifyingKey::from_bytes(&bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    /// Verify a signature against this public key.
    ///
    /// Returns `true` only for a valid signature. Malformed keys fail closed.
    pub fn verify(&self, message: &[u8], signature: &Ed25519Signature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.bytes) else {
            return false;
        };
        let dalek_sig = DalekSignature::from_bytes(&signature.bytes);
        verifying_key.verify(message, &dalek_sig).is_ok()
    }

    /// Lowercase hex, no prefix. 64 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Parses prefix-tolerant hex and validates the point.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = decode_hex(s).map_err(|_| CryptoError::InvalidPublicKey)?;
        Self::try_from_slice(&bytes)
    }
}

impl Hash for Ed25519PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl fmt::Display for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519PublicKey({})", &self.to_hex()[..16])
    }
}

// ---------------------------------------------------------------------------
// Ed25519Signature
// ---------------------------------------------------------------------------

/// A 64-byte Ed25519 signature.
#[derive(Clone, PartialEq, Eq)]
pub struct Ed25519Signature {
    bytes: [u8; SIGNATURE_LENGTH],
}

impl Ed25519Signature {
    pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self { bytes }
    }

    pub fn try_from_slice(slice: &[u8]) -> Result<Self, CryptoError> {
        let bytes: [u8; SIGNATURE_LENGTH] =
            slice.try_into().map_err(|_| CryptoError::InvalidSignature)?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.bytes
    }

    /// Lowercase hex, no prefix. 128 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = decode_hex(s).map_err(|_: CodecError| CryptoError::InvalidSignature)?;
        Self::try_from_slice(&bytes)
    }
}

impl fmt::Display for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "Ed25519Signature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}
