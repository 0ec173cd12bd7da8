//! Core value types: addresses, the raw transaction envelope, the
//! authenticator, and the signed transaction.
//!
//! Every type here has two representations:
//!
//! - a **canonical byte encoding** ([`CanonicalEncode`]) that signatures and
//!   transaction hashes are computed over, and
//! - a **wire JSON encoding** (serde `Serialize`) that the transport layer
//!   submits to a node.
//!
//! The two are independent. Changing a JSON key never changes a signature.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

use super::payload::Payload;
use crate::config::{ADDRESS_LENGTH, ED25519_SCHEME, ED25519_SIGNATURE_TYPE};
use crate::crypto::keys::derive_authentication_key;
use crate::crypto::{Ed25519PublicKey, Ed25519Signature};
use crate::encoding::{
    encode_address, encode_bytes, encode_u64, encode_u8, hex_to_bytes, pad_hex_address,
    CanonicalEncode, CodecError,
};

// ---------------------------------------------------------------------------
// AccountAddress
// ---------------------------------------------------------------------------

/// A 32-byte account address.
///
/// Always rendered as `0x` followed by 64 lowercase hex characters, so
/// `0x1` and `0x0000…0001` are the same address and print the same way.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountAddress([u8; ADDRESS_LENGTH]);

impl AccountAddress {
    pub const ZERO: Self = Self([0u8; ADDRESS_LENGTH]);

    pub fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Address of a single-signer Ed25519 account: its authentication key.
    pub fn from_public_key(public_key: &Ed25519PublicKey) -> Self {
        Self(derive_authentication_key(public_key))
    }

    /// Parses a short or full-length hex address, with or without `0x`.
    ///
    /// Fails with [`CodecError::InvalidFormat`] for empty input, non-hex
    /// characters, or more than 64 hex digits.
    pub fn from_hex(s: &str) -> Result<Self, CodecError> {
        if crate::encoding::remove_hex_prefix(s).is_empty() {
            return Err(CodecError::InvalidFormat("empty address".into()));
        }
        let padded = pad_hex_address(s);
        let mut bytes = [0u8; ADDRESS_LENGTH];
        let written = hex_to_bytes(&padded, &mut bytes)?;
        if written != ADDRESS_LENGTH {
            return Err(CodecError::InvalidFormat(format!(
                "address decodes to {} bytes, expected {}",
                written, ADDRESS_LENGTH
            )));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// `0x` + 64 lowercase hex characters.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress({})", self.to_hex())
    }
}

impl std::str::FromStr for AccountAddress {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl CanonicalEncode for AccountAddress {
    fn encode_to(&self, out: &mut Vec<u8>) {
        encode_address(out, &self.0);
    }
}

/// Serializes a `u64` as a decimal string. JSON numbers lose precision past
/// 2^53 in most clients, so the wire format never uses them for `u64`.
pub(crate) fn serialize_u64_string<S: Serializer>(
    value: &u64,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

// ---------------------------------------------------------------------------
// RawTransaction
// ---------------------------------------------------------------------------

/// An unsigned transaction envelope, as produced by
/// [`super::TransactionBuilder::build`].
///
/// Immutable once built: to change a field, go back through the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawTransaction {
    /// Account the transaction executes as.
    pub(crate) sender: AccountAddress,
    /// Replay protection: must equal the sender's on-chain counter.
    #[serde(serialize_with = "serialize_u64_string")]
    pub(crate) sequence_number: u64,
    /// Upper bound on gas units consumed.
    #[serde(serialize_with = "serialize_u64_string")]
    pub(crate) max_gas_amount: u64,
    /// Octas paid per gas unit.
    #[serde(serialize_with = "serialize_u64_string")]
    pub(crate) gas_unit_price: u64,
    /// Unix seconds after which the node discards the transaction.
    #[serde(serialize_with = "serialize_u64_string")]
    pub(crate) expiration_timestamp_secs: u64,
    /// What the transaction does.
    pub(crate) payload: Payload,
    /// Part of the signing bytes only. Nodes know their own chain ID.
    #[serde(skip)]
    pub(crate) chain_id: u8,
}

impl RawTransaction {
    /// Account the transaction executes as.
    pub fn sender(&self) -> &AccountAddress {
        &self.sender
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn max_gas_amount(&self) -> u64 {
        self.max_gas_amount
    }

    pub fn gas_unit_price(&self) -> u64 {
        self.gas_unit_price
    }

    /// Expiry in Unix seconds.
    pub fn expiration_timestamp_secs(&self) -> u64 {
        self.expiration_timestamp_secs
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Chain ID included in the signing bytes.
    pub fn chain_id(&self) -> u8 {
        self.chain_id
    }

    /// Wire JSON for this envelope.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Field order is fixed: sender, sequence number, payload, max gas, gas
/// price, expiration, chain ID.
impl CanonicalEncode for RawTransaction {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.sender.encode_to(out);
        encode_u64(out, self.sequence_number);
        self.payload.encode_to(out);
        encode_u64(out, self.max_gas_amount);
        encode_u64(out, self.gas_unit_price);
        encode_u64(out, self.expiration_timestamp_secs);
        encode_u8(out, self.chain_id);
    }
}

// ---------------------------------------------------------------------------
// Authenticator
// ---------------------------------------------------------------------------

/// Signature wrapper attached to a signed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticator {
    /// Signature scheme tag. Only [`ED25519_SCHEME`] is produced or accepted.
    pub scheme: u8,
    pub public_key: Ed25519PublicKey,
    pub signature: Ed25519Signature,
}

impl Authenticator {
    pub fn ed25519(public_key: Ed25519PublicKey, signature: Ed25519Signature) -> Self {
        Self {
            scheme: ED25519_SCHEME,
            public_key,
            signature,
        }
    }

    /// Wire `type` string for the scheme tag.
    pub fn scheme_name(&self) -> &'static str {
        match self.scheme {
            ED25519_SCHEME => ED25519_SIGNATURE_TYPE,
            _ => "unknown_signature",
        }
    }
}

impl CanonicalEncode for Authenticator {
    fn encode_to(&self, out: &mut Vec<u8>) {
        encode_u8(out, self.scheme);
        encode_bytes(out, self.public_key.as_bytes());
        encode_bytes(out, self.signature.as_bytes());
    }
}

impl Serialize for Authenticator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("type", self.scheme_name())?;
        map.serialize_entry("public_key", &self.public_key.to_string())?;
        map.serialize_entry("signature", &self.signature.to_string())?;
        map.end()
    }
}

// ---------------------------------------------------------------------------
// SignedTransaction
// ---------------------------------------------------------------------------

/// A raw transaction plus its authenticator. Ready for a [`super::Transport`].
///
/// On the wire the envelope fields sit at the top level next to a
/// `signature` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    pub(crate) raw: RawTransaction,
    #[serde(rename = "signature")]
    pub(crate) authenticator: Authenticator,
}

impl SignedTransaction {
    pub fn new(raw: RawTransaction, authenticator: Authenticator) -> Self {
        Self { raw, authenticator }
    }

    pub fn raw(&self) -> &RawTransaction {
        &self.raw
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    pub fn into_parts(self) -> (RawTransaction, Authenticator) {
        (self.raw, self.authenticator)
    }

    /// Wire JSON for submission.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl CanonicalEncode for SignedTransaction {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.raw.encode_to(out);
        self.authenticator.encode_to(out);
    }
}
