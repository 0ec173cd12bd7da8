//! Randomness sources for key generation.
//!
//! Each [`crate::account::KeyAccount`] owns its provider. There is no
//! process-wide RNG handle: two accounts in one process never share state,
//! and a test can swap in a deterministic or failing source for one account
//! without affecting any other.

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use std::fmt;

use super::CryptoError;

/// A source of cryptographically secure random bytes.
pub trait CryptoProvider {
    /// Fill `dest` entirely, or fail with [`CryptoError::CryptoInitFailure`].
    ///
    /// On failure the contents of `dest` are unspecified; callers must wipe
    /// it before reuse.
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<(), CryptoError>;
}

/// The operating system's CSPRNG. What production code should use.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsCryptoProvider;

impl CryptoProvider for OsCryptoProvider {
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<(), CryptoError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| CryptoError::CryptoInitFailure(e.to_string()))
    }
}

/// Deterministic provider seeded from a `u64`.
///
/// For tests and benchmarks only. A seeded account is exactly as secret as
/// its seed, which is to say not at all.
pub struct SeededCryptoProvider {
    rng: StdRng,
}

impl SeededCryptoProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl fmt::Debug for SeededCryptoProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeededCryptoProvider").finish_non_exhaustive()
    }
}

impl CryptoProvider for SeededCryptoProvider {
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<(), CryptoError> {
        self.rng
            .try_fill_bytes(dest)
            .map_err(|e| CryptoError::CryptoInitFailure(e.to_string()))
    }
}

impl<P: CryptoProvider + ?Sized> CryptoProvider for &mut P {
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<(), CryptoError> {
        (**self).fill_random(dest)
    }
}

impl<P: CryptoProvider + ?Sized> CryptoProvider for Box<P> {
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<(), CryptoError> {
        (**self).fill_random(dest)
    }
}
