//! The hand-off point to whatever actually talks to a node.
//!
//! This crate ships no HTTP client. A host implements [`Transport`] over
//! its own stack (blocking REST, a serial bridge to a gateway, a test
//! double) and passes signed transactions to it.

use tracing::{info, warn};

use super::types::SignedTransaction;

/// Submits signed transactions to a node.
///
/// Implementations return the node-assigned transaction identifier. The core
/// never retries or polls; that policy belongs to the implementation.
pub trait Transport {
    type Error: std::error::Error;

    fn submit(&mut self, signed: &SignedTransaction) -> Result<String, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn submit(&mut self, signed: &SignedTransaction) -> Result<String, Self::Error> {
        (**self).submit(signed)
    }
}

/// Submits through `transport`, logging the outcome.
pub fn submit<T: Transport + ?Sized>(
    transport: &mut T,
    signed: &SignedTransaction,
) -> Result<String, T::Error> {
    match transport.submit(signed) {
        Ok(hash) => {
            info!(
                sender = %signed.raw().sender(),
                sequence_number = signed.raw().sequence_number(),
                hash = %hash,
                "transaction submitted"
            );
            Ok(hash)
        }
        Err(e) => {
            warn!(
                sender = %signed.raw().sender(),
                error = %e,
                "transaction submission failed"
            );
            Err(e)
        }
    }
}
