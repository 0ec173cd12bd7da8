//! Canonical byte encoding.
//!
//! The layout is fixed and deterministic so that two independent
//! implementations produce identical bytes for identical values:
//!
//! | value    | encoding                                   |
//! |----------|--------------------------------------------|
//! | `u8`     | 1 byte                                     |
//! | `bool`   | 1 byte, `0x00` or `0x01`                   |
//! | `u64`    | 8 bytes, little-endian                     |
//! | `u128`   | 16 bytes, little-endian                    |
//! | address  | 32 raw bytes, no prefix                    |
//! | string   | `u64` byte length, then UTF-8 bytes        |
//! | bytes    | `u64` length, then raw bytes               |
//! | vector   | `u64` element count, then each element     |
//!
//! Composite types implement [`CanonicalEncode`] by encoding their fields in
//! declaration order.

use super::CodecError;
use crate::config::ADDRESS_LENGTH;

/// A value with exactly one canonical byte representation.
pub trait CanonicalEncode {
    /// Appends the canonical encoding of `self` to `out`.
    fn encode_to(&self, out: &mut Vec<u8>);

    /// Returns the canonical encoding as a fresh buffer.
    fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_to(&mut out);
        out
    }
}

pub fn encode_u8(out: &mut Vec<u8>, value: u8) {
    out.push(value);
}

pub fn encode_bool(out: &mut Vec<u8>, value: bool) {
    out.push(u8::from(value));
}

pub fn encode_u64(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_le_bytes());
}

pub fn encode_u128(out: &mut Vec<u8>, value: u128) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Raw 32 bytes. Addresses are fixed-size, so no length prefix.
pub fn encode_address(out: &mut Vec<u8>, address: &[u8; ADDRESS_LENGTH]) {
    out.extend_from_slice(address);
}

pub fn encode_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    encode_u64(out, bytes.len() as u64);
    out.extend_from_slice(bytes);
}

/// Length is the UTF-8 byte length, not the character count.
pub fn encode_string(out: &mut Vec<u8>, value: &str) {
    encode_bytes(out, value.as_bytes());
}

pub fn encode_vector<T: CanonicalEncode>(out: &mut Vec<u8>, items: &[T]) {
    encode_u64(out, items.len() as u64);
    for item in items {
        item.encode_to(out);
    }
}

impl CanonicalEncode for u8 {
    fn encode_to(&self, out: &mut Vec<u8>) {
        encode_u8(out, *self);
    }
}

impl CanonicalEncode for bool {
    fn encode_to(&self, out: &mut Vec<u8>) {
        encode_bool(out, *self);
    }
}

impl CanonicalEncode for u64 {
    fn encode_to(&self, out: &mut Vec<u8>) {
        encode_u64(out, *self);
    }
}

impl CanonicalEncode for u128 {
    fn encode_to(&self, out: &mut Vec<u8>) {
        encode_u128(out, *self);
    }
}

impl CanonicalEncode for String {
    fn encode_to(&self, out: &mut Vec<u8>) {
        encode_string(out, self);
    }
}

impl CanonicalEncode for str {
    fn encode_to(&self, out: &mut Vec<u8>) {
        encode_string(out, self);
    }
}

impl<T: CanonicalEncode> CanonicalEncode for Vec<T> {
    fn encode_to(&self, out: &mut Vec<u8>) {
        encode_vector(out, self);
    }
}

/// Decodes a standalone 8-byte little-endian `u64`.
pub fn decode_u64(bytes: &[u8]) -> Result<u64, CodecError> {
    let mut decoder = Decoder::new(bytes);
    let value = decoder.read_u64()?;
    decoder.finish()?;
    Ok(value)
}

/// Cursor over canonically encoded bytes.
///
/// Every read either consumes exactly the bytes of one value or fails with
/// [`CodecError::InvalidFormat`] without advancing.
#[derive(Debug)]
pub struct Decoder<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    /// Succeeds only if every byte has been consumed.
    pub fn finish(&self) -> Result<(), CodecError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(CodecError::InvalidFormat(format!("{} trailing bytes", n))),
        }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        if len > self.remaining() {
            return Err(CodecError::InvalidFormat(format!(
                "need {} bytes at offset {}, only {} left",
                len,
                self.pos,
                self.remaining()
            )));
        }
        let input = self.input;
        let slice = &input[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut arr = [0u8; N];
        arr.copy_from_slice(self.take(N)?);
        Ok(arr)
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_bool(&mut self) -> Result<bool, CodecError> {
        match self.input.get(self.pos).copied() {
            Some(0) => {
                self.pos += 1;
                Ok(false)
            }
            Some(1) => {
                self.pos += 1;
                Ok(true)
            }
            Some(other) => Err(CodecError::InvalidFormat(format!(
                "invalid bool byte 0x{:02x}",
                other
            ))),
            None => Err(CodecError::InvalidFormat("unexpected end of input".into())),
        }
    }

    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        Ok(u64::from_le_bytes(self.take_array::<8>()?))
    }

    pub fn read_u128(&mut self) -> Result<u128, CodecError> {
        Ok(u128::from_le_bytes(self.take_array::<16>()?))
    }

    pub fn read_address(&mut self) -> Result<[u8; ADDRESS_LENGTH], CodecError> {
        self.take_array::<ADDRESS_LENGTH>()
    }

    pub fn read_bytes(&mut self) -> Result<Vec<u8>, CodecError> {
        let start = self.pos;
        let len = self.read_u64()?;
        let len = match usize::try_from(len) {
            Ok(len) if len <= self.remaining() => len,
            _ => {
                self.pos = start;
                return Err(CodecError::InvalidFormat(format!(
                    "length prefix {} exceeds remaining input",
                    len
                )));
            }
        };
        Ok(self.take(len)?.to_vec())
    }

    pub fn read_string(&mut self) -> Result<String, CodecError> {
        let start = self.pos;
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes).map_err(|e| {
            self.pos = start;
            CodecError::InvalidFormat(e.to_string())
        })
    }
}
