//! Key persistence through a byte-addressable store.
//!
//! A key record is 34 bytes at a caller-chosen offset:
//!
//! ```text
//! [magic: 0x41 0x50 ("AP")][private key: 32 bytes]
//! ```
//!
//! The store itself is the host's business (EEPROM, flash page, file). This
//! module only defines the [`KeyStore`] contract and an in-memory
//! implementation for hosts without persistence and for tests.

use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::key_account::KeyAccount;
use super::AccountError;
use crate::config::{
    DEFAULT_KEY_STORE_CAPACITY, KEY_RECORD_LENGTH, KEY_STORE_MAGIC, PRIVATE_KEY_LENGTH,
};
use crate::crypto::CryptoProvider;

/// Byte-addressable persistent storage of fixed capacity.
pub trait KeyStore {
    /// Total addressable bytes.
    fn capacity(&self) -> usize;

    /// Fills `buf` from `offset`. Fails with
    /// [`AccountError::BufferTooSmall`] if the range runs past the end.
    fn read(&self, offset: usize, buf: &mut [u8]) -> Result<(), AccountError>;

    /// Writes `bytes` at `offset`. Same bounds rule as `read`.
    fn write(&mut self, offset: usize, bytes: &[u8]) -> Result<(), AccountError>;
}

/// Checks that `[offset, offset + len)` fits in `capacity`.
fn check_range(offset: usize, len: usize, capacity: usize) -> Result<(), AccountError> {
    match offset.checked_add(len) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(AccountError::BufferTooSmall {
            needed: offset.saturating_add(len),
            capacity,
        }),
    }
}

/// A fixed-size store in RAM, zeroed on creation and on drop.
pub struct MemoryKeyStore {
    bytes: Zeroizing<Vec<u8>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_KEY_STORE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Zeroizing::new(vec![0u8; capacity]),
        }
    }

    /// Raw view of the stored bytes. Meant for tests and diagnostics.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for MemoryKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryKeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryKeyStore")
            .field("capacity", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

impl KeyStore for MemoryKeyStore {
    fn capacity(&self) -> usize {
        self.bytes.len()
    }

    fn read(&self, offset: usize, buf: &mut [u8]) -> Result<(), AccountError> {
        check_range(offset, buf.len(), self.capacity())?;
        buf.copy_from_slice(&self.bytes[offset..offset + buf.len()]);
        Ok(())
    }

    fn write(&mut self, offset: usize, bytes: &[u8]) -> Result<(), AccountError> {
        check_range(offset, bytes.len(), self.capacity())?;
        self.bytes[offset..offset + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }
}

impl<S: KeyStore + ?Sized> KeyStore for &mut S {
    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn read(&self, offset: usize, buf: &mut [u8]) -> Result<(), AccountError> {
        (**self).read(offset, buf)
    }

    fn write(&mut self, offset: usize, bytes: &[u8]) -> Result<(), AccountError> {
        (**self).write(offset, bytes)
    }
}

impl<P: CryptoProvider> KeyAccount<P> {
    /// Persists the private key as a record at `offset`.
    ///
    /// # Errors
    ///
    /// [`AccountError::Uninitialized`] if there is no key;
    /// [`AccountError::BufferTooSmall`] if the record doesn't fit.
    pub fn save_to<S: KeyStore + ?Sized>(
        &self,
        store: &mut S,
        offset: usize,
    ) -> Result<(), AccountError> {
        let seed = self.seed().ok_or(AccountError::Uninitialized)?;
        check_range(offset, KEY_RECORD_LENGTH, store.capacity())?;

        let mut record = Zeroizing::new([0u8; KEY_RECORD_LENGTH]);
        record[..KEY_STORE_MAGIC.len()].copy_from_slice(&KEY_STORE_MAGIC);
        record[KEY_STORE_MAGIC.len()..].copy_from_slice(seed);
        store.write(offset, &record[..])?;

        debug!(offset, "key saved");
        Ok(())
    }

    /// Loads a key record from `offset` and imports it.
    ///
    /// # Errors
    ///
    /// [`AccountError::BufferTooSmall`] if the record would run past the end
    /// of the store; [`AccountError::InvalidFormat`] if the magic bytes
    /// don't match. Either way the account is left exactly as it was.
    pub fn load_from<S: KeyStore + ?Sized>(
        &mut self,
        store: &S,
        offset: usize,
    ) -> Result<(), AccountError> {
        check_range(offset, KEY_RECORD_LENGTH, store.capacity())?;

        let mut record = Zeroizing::new([0u8; KEY_RECORD_LENGTH]);
        store.read(offset, &mut record[..])?;

        if record[..KEY_STORE_MAGIC.len()] != KEY_STORE_MAGIC {
            warn!(offset, "no key record at offset");
            return Err(AccountError::InvalidFormat(
                "key store magic bytes mismatch".into(),
            ));
        }

        let mut seed = Zeroizing::new([0u8; PRIVATE_KEY_LENGTH]);
        seed.copy_from_slice(&record[KEY_STORE_MAGIC.len()..]);
        self.install_key(&seed);

        debug!(offset, "key loaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountState;

    const KEY: &str = "0x4242424242424242424242424242424242424242424242424242424242424242";

    #[test]
    fn default_capacity_is_512() {
        assert_eq!(MemoryKeyStore::new().capacity(), 512);
    }

    #[test]
    fn save_writes_magic_then_key() {
        let account = KeyAccount::from_private_key_hex(KEY).unwrap();
        let mut store = MemoryKeyStore::new();
        account.save_to(&mut store, 10).unwrap();

        let bytes = store.as_bytes();
        assert_eq!(&bytes[10..12], &[0x41, 0x50]);
        assert_eq!(&bytes[12..44], &[0x42u8; 32]);
        assert!(bytes[..10].iter().all(|b| *b == 0));
        assert!(bytes[44..].iter().all(|b| *b == 0));
    }

    #[test]
    fn save_load_roundtrip() {
        let original = KeyAccount::from_private_key_hex(KEY).unwrap();
        let mut store = MemoryKeyStore::new();
        original.save_to(&mut store, 0).unwrap();

        let mut restored = KeyAccount::new();
        restored.load_from(&store, 0).unwrap();
        assert_eq!(restored.state(), AccountState::Ready);
        assert_eq!(restored.address(), original.address());
        assert_eq!(restored.public_key(), original.public_key());
    }

    #[test]
    fn save_uninitialized_fails() {
        let account = KeyAccount::new();
        let mut store = MemoryKeyStore::new();
        assert_eq!(account.save_to(&mut store, 0), Err(AccountError::Uninitialized));
    }

    #[test]
    fn save_past_end_fails() {
        let account = KeyAccount::from_private_key_hex(KEY).unwrap();
        let mut store = MemoryKeyStore::new();
        assert_eq!(
            account.save_to(&mut store, 512 - 33),
            Err(AccountError::BufferTooSmall {
                needed: 513,
                capacity: 512
            })
        );
        // Exactly at the end is fine.
        assert!(account.save_to(&mut store, 512 - 34).is_ok());
    }

    #[test]
    fn offset_overflow_is_buffer_too_small() {
        let account = KeyAccount::from_private_key_hex(KEY).unwrap();
        let mut store = MemoryKeyStore::new();
        assert!(matches!(
            account.save_to(&mut store, usize::MAX),
            Err(AccountError::BufferTooSmall { .. })
        ));
    }

    #[test]
    fn load_with_bad_magic_leaves_account_uninitialized() {
        let store = MemoryKeyStore::new();
        let mut account = KeyAccount::new();
        assert!(matches!(
            account.load_from(&store, 0),
            Err(AccountError::InvalidFormat(_))
        ));
        assert_eq!(account.state(), AccountState::Uninitialized);
    }

    #[test]
    fn load_with_bad_magic_keeps_existing_key() {
        let mut store = MemoryKeyStore::new();
        store.write(0, &[0x41, 0x51]).unwrap();
        let mut account = KeyAccount::from_private_key_hex(KEY).unwrap();
        let before = account.address();
        assert!(account.load_from(&store, 0).is_err());
        assert_eq!(account.address(), before);
    }

    #[test]
    fn load_out_of_range_fails() {
        let store = MemoryKeyStore::with_capacity(40);
        let mut account = KeyAccount::new();
        assert_eq!(
            account.load_from(&store, 10),
            Err(AccountError::BufferTooSmall {
                needed: 44,
                capacity: 40
            })
        );
        assert!(!account.is_ready());
    }

    #[test]
    fn store_read_write_bounds() {
        let mut store = MemoryKeyStore::with_capacity(4);
        assert!(store.write(2, &[1, 2]).is_ok());
        assert!(store.write(3, &[1, 2]).is_err());
        let mut buf = [0u8; 2];
        store.read(2, &mut buf).unwrap();
        assert_eq!(buf, [1, 2]);
        assert!(store.read(4, &mut buf).is_err());
    }

    #[test]
    fn multiple_slots_in_one_store() {
        let a = KeyAccount::from_private_key_hex(KEY).unwrap();
        let b = KeyAccount::from_private_key_hex(&"07".repeat(32)).unwrap();
        let mut store = MemoryKeyStore::new();
        a.save_to(&mut store, 0).unwrap();
        b.save_to(&mut store, 64).unwrap();

        let mut loaded = KeyAccount::new();
        loaded.load_from(&store, 64).unwrap();
        assert_eq!(loaded.address(), b.address());
        loaded.load_from(&store, 0).unwrap();
        assert_eq!(loaded.address(), a.address());
    }
}
