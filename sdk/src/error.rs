//! Crate-level error type.
//!
//! Each module has its own error enum. [`SdkError`] wraps them all so that
//! flows crossing modules (build, then sign, then serialize) can use `?`
//! throughout and still let the caller match on the original cause.

use thiserror::Error;

use crate::account::AccountError;
use crate::crypto::CryptoError;
use crate::encoding::CodecError;
use crate::transaction::{BuildError, VerificationError};

#[derive(Debug, Error)]
pub enum SdkError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Shorthand used across the public API.
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_module_errors_transparently() {
        let err: SdkError = BuildError::MissingField("sender").into();
        assert_eq!(err.to_string(), "sender is required");

        let err: SdkError = AccountError::Uninitialized.into();
        assert_eq!(err.to_string(), "account is not initialized");
    }

    #[test]
    fn question_mark_converts() {
        fn decode() -> Result<Vec<u8>> {
            Ok(crate::encoding::decode_hex("0xzz")?)
        }
        assert!(matches!(decode(), Err(SdkError::Codec(_))));
    }
}
