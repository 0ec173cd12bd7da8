//! Verification of signed transactions.
//!
//! Lets anyone holding only the signed artifact check it before handing it
//! to a transport: the scheme is one we understand, the public key is a
//! real curve point, and the signature covers exactly this envelope. Checks
//! run cheapest first.

use thiserror::Error;
use tracing::debug;

use super::signing::signing_message;
use super::types::{Authenticator, SignedTransaction};
use crate::config::ED25519_SCHEME;
use crate::crypto::{verify_raw, CryptoError, Ed25519PublicKey, Ed25519Signature};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while verifying a signed transaction.
///
/// Deliberately coarse: we say which check failed, never why the curve
/// arithmetic disagreed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// The authenticator uses a scheme tag other than single Ed25519.
    #[error("unsupported signature scheme: {0:#04x}")]
    UnsupportedScheme(u8),

    /// The public key is the wrong length or not a valid point.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// The signature bytes are malformed.
    #[error("invalid signature encoding")]
    InvalidSignature,

    /// Well-formed signature that does not cover this envelope.
    #[error("signature does not match transaction")]
    SignatureMismatch,
}

impl Authenticator {
    /// Parses an authenticator from its wire parts (prefix-tolerant hex).
    pub fn from_hex_parts(
        scheme: u8,
        public_key_hex: &str,
        signature_hex: &str,
    ) -> Result<Self, VerificationError> {
        if scheme != ED25519_SCHEME {
            return Err(VerificationError::UnsupportedScheme(scheme));
        }
        let public_key = Ed25519PublicKey::from_hex(public_key_hex)
            .map_err(|_| VerificationError::InvalidPublicKey)?;
        let signature = Ed25519Signature::from_hex(signature_hex)
            .map_err(|_| VerificationError::InvalidSignature)?;
        Ok(Self {
            scheme,
            public_key,
            signature,
        })
    }
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Verifies that `signed` carries a valid signature over its own envelope.
///
/// The checks, in order:
///
/// 1. **Scheme**: must be single Ed25519.
/// 2. **Public key**: must decode to a valid Ed25519 point.
/// 3. **Signature**: must verify over the recomputed signing message.
///
/// Whether the public key is authorized for the sender account is the
/// node's business, not ours: accounts may rotate their authentication key.
pub fn verify_signed_transaction(signed: &SignedTransaction) -> Result<(), VerificationError> {
    let auth = signed.authenticator();

    if auth.scheme != ED25519_SCHEME {
        return Err(VerificationError::UnsupportedScheme(auth.scheme));
    }

    let message = signing_message(signed.raw());
    verify_raw(auth.public_key.as_bytes(), &message, auth.signature.as_bytes()).map_err(
        |e| match e {
            CryptoError::InvalidPublicKey => VerificationError::InvalidPublicKey,
            CryptoError::InvalidSignature => VerificationError::InvalidSignature,
            _ => VerificationError::SignatureMismatch,
        },
    )?;

    debug!(sender = %signed.raw().sender(), "signed transaction verified");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
