//! # Canonical Encoding
//!
//! Everything that turns values into bytes (and back) lives here:
//!
//! - **bcs**: the fixed-layout canonical encoder used for signing. Integers
//!   are little-endian, sequences carry a `u64` length prefix, addresses are
//!   raw 32 bytes. No field names, no whitespace, no ordering surprises.
//! - **hex**: lowercase hex encoding, prefix-tolerant decoding into
//!   caller-sized buffers, and address normalization.
//! - **base64**: standard-alphabet base64, for hosts that need it.
//!
//! JSON is not canonical and never touches the signing path. It only exists
//! at the wire boundary (see [`crate::transaction::types`]).

pub mod base64;
pub mod bcs;
pub mod hex;

use thiserror::Error;

pub use self::base64::{base64_to_bytes, bytes_to_base64, decode_base64};
pub use self::bcs::{
    decode_u64, encode_address, encode_bool, encode_bytes, encode_string, encode_u128,
    encode_u64, encode_u8, encode_vector, CanonicalEncode, Decoder,
};
pub use self::hex::{
    bytes_to_hex, decode_hex, hex_to_bytes, is_valid_hex_string, pad_hex_address,
    remove_hex_prefix, u64_to_hex_string,
};

/// Errors produced by the codecs.
///
/// There is deliberately a single variant: callers care that the input was
/// unusable, and the message says why.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Malformed input, truncated input, or a destination that can't hold
    /// the decoded output.
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}
