//! # SDK Configuration & Constants
//!
//! Every magic number in the SDK lives here. If you're hardcoding a constant
//! somewhere else, you're doing it wrong and you owe the team coffee.
//!
//! Most of these values are dictated by the ledger (key sizes, well-known
//! module addresses, domain-separation salts). The rest are client-side
//! defaults that callers may override through [`BuilderDefaults`].

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Network Identifiers
// ---------------------------------------------------------------------------

/// Chain ID of mainnet. Signing with the wrong chain ID produces a signature
/// that every other network will (correctly) reject.
pub const CHAIN_ID_MAINNET: u8 = 1;

/// Chain ID of the public testnet.
pub const CHAIN_ID_TESTNET: u8 = 2;

/// Devnet chain IDs are reassigned on every reset. This is only the value
/// local tooling conventionally uses.
pub const CHAIN_ID_DEVNET: u8 = 3;

/// Fullnode REST endpoints. The core never talks to them; they are here so
/// transport implementations don't each invent their own copy.
pub const MAINNET_URL: &str = "https://fullnode.mainnet.aptoslabs.com/v1";
pub const TESTNET_URL: &str = "https://fullnode.testnet.aptoslabs.com/v1";
pub const DEVNET_URL: &str = "https://fullnode.devnet.aptoslabs.com/v1";

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 seed length in bytes.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Ed25519 verifying key length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length. Always 64 bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Account addresses are 32 bytes, rendered as `0x` + 64 hex characters.
pub const ADDRESS_LENGTH: usize = 32;

/// Number of hex characters in a normalized address (without the prefix).
pub const ADDRESS_HEX_LENGTH: usize = ADDRESS_LENGTH * 2;

/// Scheme byte appended to the public key before hashing it into an
/// authentication key. `0x00` is single-signer Ed25519.
pub const ED25519_SCHEME: u8 = 0x00;

/// Authenticator `type` tag on the wire.
pub const ED25519_SIGNATURE_TYPE: &str = "ed25519_signature";

/// Domain-separation salt prepended (as its SHA3-256 digest) to the canonical
/// bytes of a raw transaction before signing.
pub const RAW_TRANSACTION_SALT: &[u8] = b"APTOS::RawTransaction";

/// Salt used when hashing a signed transaction into its identifier.
pub const TRANSACTION_SALT: &[u8] = b"APTOS::Transaction";

// ---------------------------------------------------------------------------
// Key Persistence
// ---------------------------------------------------------------------------

/// Magic bytes marking a persisted key slot. "AP".
pub const KEY_STORE_MAGIC: [u8; 2] = [0x41, 0x50];

/// Size of one persisted key record: magic + raw private key.
pub const KEY_RECORD_LENGTH: usize = KEY_STORE_MAGIC.len() + PRIVATE_KEY_LENGTH;

/// Default capacity of an in-memory key store. Matches the 512-byte
/// emulated EEPROM window that small devices typically reserve.
pub const DEFAULT_KEY_STORE_CAPACITY: usize = 512;

// ---------------------------------------------------------------------------
// Transaction Defaults
// ---------------------------------------------------------------------------

/// Default `max_gas_amount` when the caller doesn't set one.
pub const DEFAULT_MAX_GAS_AMOUNT: u64 = 2_000;

/// Default `gas_unit_price` in octas.
pub const DEFAULT_GAS_UNIT_PRICE: u64 = 100;

/// Default distance between "now" and the expiration timestamp. Ten minutes.
pub const DEFAULT_EXPIRATION_OFFSET_SECS: u64 = 600;

/// Default chain ID baked into the signing bytes.
pub const DEFAULT_CHAIN_ID: u8 = CHAIN_ID_MAINNET;

// ---------------------------------------------------------------------------
// Well-known Modules
// ---------------------------------------------------------------------------

/// Framework account hosting `aptos_account` and `aptos_coin`.
pub const FRAMEWORK_ADDRESS: &str = "0x1";

/// Account hosting the legacy `token` module.
pub const TOKEN_ADDRESS: &str = "0x3";

/// Native coin type used by the coin transfer preset.
pub const APTOS_COIN_TYPE: &str = "0x1::aptos_coin::AptosCoin";

/// Client-side defaults applied by [`crate::transaction::TransactionBuilder::build`]
/// to fields the caller left unset.
///
/// Deserializable so that host applications can ship their own defaults in
/// a JSON config file instead of recompiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderDefaults {
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
    pub expiration_offset_secs: u64,
    pub chain_id: u8,
}

impl Default for BuilderDefaults {
    fn default() -> Self {
        Self {
            max_gas_amount: DEFAULT_MAX_GAS_AMOUNT,
            gas_unit_price: DEFAULT_GAS_UNIT_PRICE,
            expiration_offset_secs: DEFAULT_EXPIRATION_OFFSET_SECS,
            chain_id: DEFAULT_CHAIN_ID,
        }
    }
}

impl BuilderDefaults {
    /// Parse defaults from a JSON document. Missing keys keep their
    /// built-in values.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Returns the fullnode base URL for a chain ID, mainly for transport hosts.
/// Returns `None` for chains we don't know. We don't guess.
pub fn node_url_for_chain(chain_id: u8) -> Option<&'static str> {
    match chain_id {
        CHAIN_ID_MAINNET => Some(MAINNET_URL),
        CHAIN_ID_TESTNET => Some(TESTNET_URL),
        CHAIN_ID_DEVNET => Some(DEVNET_URL),
        _ => None,
    }
}

/// Returns a friendly name for a chain ID, mainly for logging.
pub fn network_name(chain_id: u8) -> String {
    match chain_id {
        CHAIN_ID_MAINNET => "mainnet".to_string(),
        CHAIN_ID_TESTNET => "testnet".to_string(),
        CHAIN_ID_DEVNET => "devnet".to_string(),
        other => format!("unknown({})", other),
    }
}
