//! The signing identity.
//!
//! A [`KeyAccount`] is either `Uninitialized` (holds nothing) or `Ready`
//! (holds a private key, its public key, and the derived address). It gets
//! to `Ready` by generating a key from its provider or importing one, and
//! goes back to `Uninitialized` on [`clear`](KeyAccount::clear) or drop,
//! which zero the key buffers.
//!
//! ## Security considerations
//!
//! - The private key never appears in `Debug` output or logs.
//! - Imported and generated seeds pass through [`Zeroizing`] scratch
//!   buffers, so no stray copy survives a failed import.
//! - Exporting the key is explicit ([`private_key_hex`](KeyAccount::private_key_hex))
//!   and returns a wrapper that wipes itself on drop.

use std::fmt;
use tracing::{debug, info, warn};
use zeroize::{Zeroize, Zeroizing};

use super::AccountError;
use crate::config::{PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH};
use crate::crypto::keys::{derive_public_key, sign_with_seed};
use crate::crypto::{
    CryptoError, CryptoProvider, Ed25519PublicKey, Ed25519Signature, OsCryptoProvider,
};
use crate::encoding::hex_to_bytes;
use crate::transaction::signing::signing_message;
use crate::transaction::{AccountAddress, Authenticator, RawTransaction, SignedTransaction};

/// Whether an account can sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountState {
    Uninitialized,
    Ready,
}

/// A local Ed25519 identity.
///
/// Each account owns its randomness source `P`. Use [`KeyAccount::new`]
/// for the OS RNG, or [`KeyAccount::with_provider`] to inject a
/// deterministic one in tests.
///
/// # Example
///
/// ```
/// use aptos_lite_sdk::account::{AccountState, KeyAccount};
///
/// let mut account = KeyAccount::new();
/// assert_eq!(account.state(), AccountState::Uninitialized);
///
/// account.create_random().unwrap();
/// let signature = account.sign(b"hello").unwrap();
/// assert!(account.verify(b"hello", &signature));
///
/// account.clear();
/// assert!(!account.is_ready());
/// ```
pub struct KeyAccount<P: CryptoProvider = OsCryptoProvider> {
    private_key: [u8; PRIVATE_KEY_LENGTH],
    public_key: [u8; PUBLIC_KEY_LENGTH],
    address: Option<AccountAddress>,
    state: AccountState,
    provider: P,
}

impl KeyAccount<OsCryptoProvider> {
    /// An empty account backed by the operating system RNG.
    pub fn new() -> Self {
        Self::with_provider(OsCryptoProvider)
    }

    /// An account holding the given hex-encoded private key.
    pub fn from_private_key_hex(private_key_hex: &str) -> Result<Self, AccountError> {
        let mut account = Self::new();
        account.from_private_key(private_key_hex)?;
        Ok(account)
    }
}

impl Default for KeyAccount<OsCryptoProvider> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: CryptoProvider> KeyAccount<P> {
    /// An empty account drawing randomness from `provider`.
    pub fn with_provider(provider: P) -> Self {
        Self {
            private_key: [0u8; PRIVATE_KEY_LENGTH],
            public_key: [0u8; PUBLIC_KEY_LENGTH],
            address: None,
            state: AccountState::Uninitialized,
            provider,
        }
    }

    /// Generates a fresh key from the provider, replacing any key held.
    ///
    /// # Errors
    ///
    /// [`AccountError::CryptoInitFailure`] if the provider fails. The
    /// account is then `Uninitialized` with zeroed buffers.
    pub fn create_random(&mut self) -> Result<(), AccountError> {
        self.wipe();

        let mut seed = Zeroizing::new([0u8; PRIVATE_KEY_LENGTH]);
        if let Err(e) = self.provider.fill_random(&mut *seed) {
            warn!(error = %e, "key generation failed");
            return Err(match e {
                CryptoError::CryptoInitFailure(reason) => AccountError::CryptoInitFailure(reason),
                other => AccountError::CryptoInitFailure(other.to_string()),
            });
        }

        self.install_key(&seed);
        Ok(())
    }

    /// Imports a 32-byte private key from hex (optional `0x` prefix).
    ///
    /// Deterministic: importing the same key always yields the same public
    /// key and address.
    ///
    /// # Errors
    ///
    /// [`AccountError::InvalidFormat`] unless the input decodes to exactly
    /// 32 bytes. The account is left exactly as it was.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_private_key(&mut self, private_key_hex: &str) -> Result<(), AccountError> {
        let mut seed = Zeroizing::new([0u8; PRIVATE_KEY_LENGTH]);
        // The codec error can quote the offending character; don't pass it on.
        let written = hex_to_bytes(private_key_hex, &mut *seed)
            .map_err(|_| AccountError::InvalidFormat("private key is not valid hex".into()))?;
        if written != PRIVATE_KEY_LENGTH {
            return Err(AccountError::InvalidFormat(format!(
                "private key must be {} bytes, got {}",
                PRIVATE_KEY_LENGTH, written
            )));
        }

        self.install_key(&seed);
        Ok(())
    }

    /// Copies `seed` in and derives everything else from it.
    pub(super) fn install_key(&mut self, seed: &[u8; PRIVATE_KEY_LENGTH]) {
        self.private_key.copy_from_slice(seed);
        let public_key = derive_public_key(seed);
        self.public_key = *public_key.as_bytes();
        let address = AccountAddress::from_public_key(&public_key);
        self.address = Some(address);
        self.state = AccountState::Ready;
        info!(address = %address, "account ready");
    }

    /// The raw seed, if `Ready`. Stays inside the account module.
    pub(super) fn seed(&self) -> Option<&[u8; PRIVATE_KEY_LENGTH]> {
        match self.state {
            AccountState::Ready => Some(&self.private_key),
            AccountState::Uninitialized => None,
        }
    }

    // -- signing --------------------------------------------------------------

    /// Signs `message` with Ed25519. Deterministic in (key, message).
    pub fn sign(&self, message: &[u8]) -> Result<Ed25519Signature, AccountError> {
        let seed = self.seed().ok_or(AccountError::Uninitialized)?;
        Ok(sign_with_seed(seed, message))
    }

    /// `true` if `signature` is valid for `message` under this account's
    /// key. Always `false` for an uninitialized account.
    pub fn verify(&self, message: &[u8], signature: &Ed25519Signature) -> bool {
        match self.public_key() {
            Some(public_key) => public_key.verify(message, signature),
            None => false,
        }
    }

    /// Signs a raw transaction and wraps it with an Ed25519 authenticator.
    ///
    /// The signature covers [`signing_message`] of `txn`, never a partial
    /// view of it.
    pub fn sign_transaction(&self, txn: &RawTransaction) -> Result<SignedTransaction, AccountError> {
        let public_key = self.public_key().ok_or(AccountError::Uninitialized)?;
        let signature = self.sign(&signing_message(txn))?;
        Ok(SignedTransaction::new(
            txn.clone(),
            Authenticator::ed25519(public_key, signature),
        ))
    }

    // -- accessors ------------------------------------------------------------

    pub fn state(&self) -> AccountState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == AccountState::Ready
    }

    pub fn address(&self) -> Option<AccountAddress> {
        self.address
    }

    pub fn public_key(&self) -> Option<Ed25519PublicKey> {
        self.seed()
            .map(|_| Ed25519PublicKey::from_bytes(self.public_key))
    }

    /// `0x` + 64 hex characters.
    pub fn public_key_hex(&self) -> Option<String> {
        self.public_key().map(|pk| pk.to_string())
    }

    /// Exports the private key as `0x` + 64 hex characters.
    pub fn private_key_hex(&self) -> Result<Zeroizing<String>, AccountError> {
        let seed = self.seed().ok_or(AccountError::Uninitialized)?;
        Ok(Zeroizing::new(format!("0x{}", hex::encode(seed))))
    }

    // -- lifecycle ------------------------------------------------------------

    fn wipe(&mut self) {
        self.private_key.zeroize();
        self.public_key.zeroize();
        self.address = None;
        self.state = AccountState::Uninitialized;
    }

    /// Zeroes the key buffers and returns to `Uninitialized`.
    pub fn clear(&mut self) {
        let was_ready = self.is_ready();
        self.wipe();
        if was_ready {
            debug!("account cleared");
        }
    }
}

impl<P: CryptoProvider> Drop for KeyAccount<P> {
    fn drop(&mut self) {
        self.wipe();
    }
}

impl<P: CryptoProvider> fmt::Debug for KeyAccount<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyAccount")
            .field("state", &self.state)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Verifies a signature with nothing but the signer's public key.
pub fn verify_with_public_key(
    public_key: &Ed25519PublicKey,
    message: &[u8],
    signature: &Ed25519Signature,
) -> bool {
    public_key.verify(message, signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SeededCryptoProvider;

    /// RFC 8032 section 7.1, TEST 1.
    const RFC_SEED: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
    const RFC_PUBLIC: &str = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";

    struct BrokenRng;

    impl CryptoProvider for BrokenRng {
        fn fill_random(&mut self, dest: &mut [u8]) -> Result<(), CryptoError> {
            dest.fill(0xAA);
            Err(CryptoError::CryptoInitFailure("entropy source unavailable".into()))
        }
    }

    #[test]
    fn new_account_is_uninitialized() {
        let account = KeyAccount::new();
        assert_eq!(account.state(), AccountState::Uninitialized);
        assert!(account.address().is_none());
        assert!(account.public_key().is_none());
        assert_eq!(account.private_key_hex(), Err(AccountError::Uninitialized));
    }

    #[test]
    fn create_random_becomes_ready() {
        let mut account = KeyAccount::new();
        account.create_random().unwrap();
        assert!(account.is_ready());
        assert!(account.address().is_some());
    }

    #[test]
    fn seeded_provider_is_reproducible() {
        let mut a = KeyAccount::with_provider(SeededCryptoProvider::new(9));
        let mut b = KeyAccount::with_provider(SeededCryptoProvider::new(9));
        a.create_random().unwrap();
        b.create_random().unwrap();
        assert_eq!(a.address(), b.address());
    }

    #[test]
    fn rng_failure_is_crypto_init_failure() {
        let mut account = KeyAccount::with_provider(BrokenRng);
        assert_eq!(
            account.create_random(),
            Err(AccountError::CryptoInitFailure("entropy source unavailable".into()))
        );
        assert_eq!(account.state(), AccountState::Uninitialized);
        assert_eq!(account.sign(b"x"), Err(AccountError::Uninitialized));
        assert_eq!(account.private_key, [0u8; 32]);
    }

    #[test]
    fn rng_failure_after_ready_drops_old_key() {
        let mut account = KeyAccount::with_provider(BrokenRng);
        account.from_private_key(RFC_SEED).unwrap();
        assert!(account.create_random().is_err());
        assert!(!account.is_ready());
        // Import still works after a failed generation.
        account.from_private_key(RFC_SEED).unwrap();
        assert!(account.is_ready());
    }

    #[test]
    fn import_matches_rfc8032_public_key() {
        let account = KeyAccount::from_private_key_hex(RFC_SEED).unwrap();
        assert_eq!(account.public_key_hex().unwrap(), format!("0x{}", RFC_PUBLIC));
    }

    #[test]
    fn import_is_deterministic() {
        let a = KeyAccount::from_private_key_hex(RFC_SEED).unwrap();
        let b = KeyAccount::from_private_key_hex(&format!("0X{}", RFC_SEED.to_uppercase())).unwrap();
        assert_eq!(a.public_key(), b.public_key());
        assert_eq!(a.address(), b.address());
    }

    #[test]
    fn address_is_sha3_of_public_key_and_scheme() {
        let account = KeyAccount::from_private_key_hex(RFC_SEED).unwrap();
        let mut preimage = hex::decode(RFC_PUBLIC).unwrap();
        preimage.push(0x00);
        let expected = crate::crypto::sha3_256(&preimage);
        assert_eq!(account.address().unwrap().as_bytes(), &expected);
    }

    #[test]
    fn private_key_export_roundtrip() {
        let account = KeyAccount::from_private_key_hex(RFC_SEED).unwrap();
        let exported = account.private_key_hex().unwrap();
        assert_eq!(exported.as_str(), format!("0x{}", RFC_SEED));
        let again = KeyAccount::from_private_key_hex(&exported).unwrap();
        assert_eq!(again.address(), account.address());
    }

    #[test]
    fn invalid_import_leaves_state_untouched() {
        let mut account = KeyAccount::from_private_key_hex(RFC_SEED).unwrap();
        let before = account.address();

        let too_long = "11".repeat(33);
        for bad in ["0xzz", "abc", "00", too_long.as_str(), ""] {
            assert!(matches!(
                account.from_private_key(bad),
                Err(AccountError::InvalidFormat(_))
            ));
            assert!(account.is_ready());
            assert_eq!(account.address(), before);
        }

        let mut empty = KeyAccount::new();
        assert!(empty.from_private_key("nope").is_err());
        assert!(!empty.is_ready());
    }

    #[test]
    fn sign_requires_ready() {
        let account = KeyAccount::new();
        assert_eq!(account.sign(b"msg"), Err(AccountError::Uninitialized));
    }

    #[test]
    fn verify_on_uninitialized_is_false() {
        let signer = KeyAccount::from_private_key_hex(RFC_SEED).unwrap();
        let sig = signer.sign(b"msg").unwrap();
        assert!(!KeyAccount::new().verify(b"msg", &sig));
    }

    #[test]
    fn third_party_verification() {
        let signer = KeyAccount::from_private_key_hex(RFC_SEED).unwrap();
        let sig = signer.sign(b"pay alice").unwrap();
        let pk = Ed25519PublicKey::from_hex(RFC_PUBLIC).unwrap();
        assert!(verify_with_public_key(&pk, b"pay alice", &sig));
        assert!(!verify_with_public_key(&pk, b"pay mallory", &sig));
    }

    #[test]
    fn clear_zeroes_everything() {
        let mut account = KeyAccount::from_private_key_hex(RFC_SEED).unwrap();
        account.clear();
        assert_eq!(account.state(), AccountState::Uninitialized);
        assert_eq!(account.private_key, [0u8; 32]);
        assert_eq!(account.public_key, [0u8; 32]);
        assert!(account.address().is_none());
        assert_eq!(account.sign(b"x"), Err(AccountError::Uninitialized));
    }

    #[test]
    fn debug_never_shows_secret() {
        let account = KeyAccount::from_private_key_hex(RFC_SEED).unwrap();
        let debug = format!("{:?}", account);
        assert!(!debug.contains(RFC_SEED));
        assert!(debug.contains("Ready"));
    }
}
