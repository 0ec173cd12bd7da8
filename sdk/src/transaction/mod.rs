//! # Transaction Module
//!
//! Construction, signing, verification and hand-off of ledger transactions.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        AccountAddress, RawTransaction, Authenticator, SignedTransaction
//! payload.rs      Payload variants and typed Arg values
//! builder.rs      TransactionBuilder: staged, validated drafts
//! presets.rs      Well-known framework calls (coin transfer, tokens, ...)
//! signing.rs      Signing message, sign_transaction, transaction_hash
//! verification.rs Signature checks on signed transactions
//! transport.rs    The trait a host implements to reach a node
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build**: configure a [`TransactionBuilder`] and call `build()`.
//! 2. **Sign**: call [`sign_transaction`] with a ready
//!    [`crate::account::KeyAccount`].
//! 3. **Verify** (optional): [`verify_signed_transaction`].
//! 4. **Submit**: hand the result to a [`Transport`].
//!
//! ## Design Decisions
//!
//! - Signatures cover the canonical byte encoding, never JSON.
//! - All amounts and counters are `u64`, carried as decimal strings on the
//!   wire so no client rounds them through a float.
//! - The chain ID is signed over but not sent; the node knows its own.

pub mod builder;
pub mod payload;
pub mod presets;
pub mod signing;
pub mod transport;
pub mod types;
pub mod verification;

pub use builder::{BuildError, BuilderState, TransactionBuilder};
pub use payload::{Arg, EntryFunction, ModuleBundle, Payload, Script};
pub use signing::{sign_built, sign_transaction, signing_message, transaction_hash};
pub use transport::{submit, Transport};
pub use types::{AccountAddress, Authenticator, RawTransaction, SignedTransaction};
pub use verification::{verify_signed_transaction, VerificationError};
