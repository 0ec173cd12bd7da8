//! Standard-alphabet base64 (RFC 4648, with padding).

use base64::{engine::general_purpose::STANDARD, Engine};

use super::CodecError;

/// Encodes bytes as padded standard base64. Total.
pub fn bytes_to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes base64 into the front of `out` and returns the number of bytes
/// written.
///
/// Fails with [`CodecError::InvalidFormat`] on corrupt input or when `out`
/// is too small for the decoded data.
pub fn base64_to_bytes(input: &str, out: &mut [u8]) -> Result<usize, CodecError> {
    STANDARD
        .decode_slice(input, out)
        .map_err(|e| CodecError::InvalidFormat(e.to_string()))
}

/// Decodes base64 into a fresh vector.
pub fn decode_base64(input: &str) -> Result<Vec<u8>, CodecError> {
    STANDARD
        .decode(input)
        .map_err(|e| CodecError::InvalidFormat(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vector() {
        assert_eq!(bytes_to_base64(b"aptos"), "YXB0b3M=");
        assert_eq!(bytes_to_base64(b""), "");
    }

    #[test]
    fn decode_into_buffer() {
        let mut buf = [0u8; 16];
        let n = base64_to_bytes("YXB0b3M=", &mut buf).unwrap();
        assert_eq!(&buf[..n], b"aptos");
    }

    #[test]
    fn corrupt_input_rejected() {
        let mut buf = [0u8; 16];
        assert!(matches!(
            base64_to_bytes("not*base64!", &mut buf),
            Err(CodecError::InvalidFormat(_))
        ));
        assert!(decode_base64("@@@@").is_err());
    }

    #[test]
    fn small_destination_rejected() {
        let mut buf = [0u8; 2];
        assert!(base64_to_bytes("YXB0b3M=", &mut buf).is_err());
    }

    #[test]
    fn vec_decode_matches_slice_decode() {
        let encoded = bytes_to_base64(&[0, 1, 2, 250, 251, 252]);
        let mut buf = [0u8; 8];
        let n = base64_to_bytes(&encoded, &mut buf).unwrap();
        assert_eq!(decode_base64(&encoded).unwrap(), buf[..n].to_vec());
    }
}
