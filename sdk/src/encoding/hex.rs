//! Hex encoding and address normalization.
//!
//! Encoding is always lowercase. Decoding is case-insensitive and tolerates
//! an optional `0x`/`0X` prefix, because that's what users paste.

use super::CodecError;
use crate::config::ADDRESS_HEX_LENGTH;

/// Lowercase hex encoding. Total: every byte slice has exactly one encoding.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Strips a single leading `0x` or `0X`, if present.
pub fn remove_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Returns `true` if every character after the optional prefix is a hex digit.
///
/// The empty string counts as valid hex (it decodes to zero bytes).
pub fn is_valid_hex_string(s: &str) -> bool {
    remove_hex_prefix(s).chars().all(|c| c.is_ascii_hexdigit())
}

/// Decodes `hex` into the front of `out` and returns the number of bytes
/// written.
///
/// The capacity is `out.len()`. Fails with [`CodecError::InvalidFormat`] on
/// odd length, non-hex characters, or output that wouldn't fit. On failure
/// the contents of `out` are unspecified but nothing past the decoded length
/// is touched.
pub fn hex_to_bytes(hex: &str, out: &mut [u8]) -> Result<usize, CodecError> {
    let clean = remove_hex_prefix(hex);

    if clean.len() % 2 != 0 {
        return Err(CodecError::InvalidFormat(format!(
            "odd hex length {}",
            clean.len()
        )));
    }

    let byte_len = clean.len() / 2;
    if byte_len > out.len() {
        return Err(CodecError::InvalidFormat(format!(
            "decoded length {} exceeds capacity {}",
            byte_len,
            out.len()
        )));
    }

    hex::decode_to_slice(clean, &mut out[..byte_len])
        .map_err(|e| CodecError::InvalidFormat(e.to_string()))?;

    Ok(byte_len)
}

/// Decodes prefix-tolerant hex into a fresh vector.
pub fn decode_hex(hex: &str) -> Result<Vec<u8>, CodecError> {
    hex::decode(remove_hex_prefix(hex)).map_err(|e| CodecError::InvalidFormat(e.to_string()))
}

/// Renders an integer as `0x` + minimal lowercase hex. Zero is `0x0`.
pub fn u64_to_hex_string(value: u64) -> String {
    format!("0x{:x}", value)
}

/// Normalizes an address string to `0x` + 64 lowercase hex characters.
///
/// Strips an optional prefix, lowercases, and left-pads with zeros. The
/// function is idempotent. It does not validate: an input with non-hex
/// characters or more than 64 digits comes back prefixed and lowercased but
/// otherwise untouched, and fails later when parsed as an address.
pub fn pad_hex_address(address: &str) -> String {
    let lower = remove_hex_prefix(address).to_ascii_lowercase();
    format!("0x{:0>width$}", lower, width = ADDRESS_HEX_LENGTH)
}
