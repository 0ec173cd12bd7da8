//! # Accounts
//!
//! The local signing identity: one Ed25519 key, its public key, and the
//! account address derived from it. [`KeyAccount`] is the only type in the
//! crate that ever holds a private key.
//!
//! ```text
//! key_account.rs  KeyAccount lifecycle, signing, verification
//! store.rs        KeyStore trait, MemoryKeyStore, fixed-layout key records
//! ```

pub mod key_account;
pub mod store;

use thiserror::Error;

pub use key_account::{verify_with_public_key, AccountState, KeyAccount};
pub use store::{KeyStore, MemoryKeyStore};

/// Errors from account operations.
///
/// None of these carry key material. The `InvalidFormat` message describes
/// the shape of the input, never its contents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// Key input could not be decoded, or a stored record is not a key.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// A read or write would run past the end of the key store.
    #[error("buffer too small: need {needed} bytes, capacity is {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },

    /// The random source failed while generating a key.
    #[error("crypto initialization failed: {0}")]
    CryptoInitFailure(String),

    /// The account holds no key.
    #[error("account is not initialized")]
    Uninitialized,
}
