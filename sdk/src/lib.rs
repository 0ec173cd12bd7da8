// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Aptos Lite SDK
//!
//! A small, synchronous client core for preparing, signing, and canonically
//! encoding ledger transactions, and for managing the local key that signs
//! them.
//!
//! ## Architecture
//!
//! - **encoding**: Canonical byte encoder and decoder, hex and base64.
//! - **crypto**: Ed25519, SHA3-256, SHA-256, injectable randomness.
//! - **account**: The signing identity and its persistence.
//! - **transaction**: Builder, payloads, presets, signing, verification,
//!   and the transport hand-off trait.
//! - **config**: Protocol constants and builder defaults.
//! - **logging**: Optional `tracing-subscriber` setup for hosts.
//!
//! ## Quick start
//!
//! ```
//! use aptos_lite_sdk::account::KeyAccount;
//! use aptos_lite_sdk::transaction::{sign_built, verify_signed_transaction, TransactionBuilder};
//!
//! let mut account = KeyAccount::new();
//! account.create_random()?;
//! let sender = account.address().unwrap().to_hex();
//!
//! let mut draft = TransactionBuilder::new()
//!     .sender(&sender)
//!     .sequence_number(0)
//!     .coin_transfer("0xcafe", 1_000);
//!
//! let signed = sign_built(&mut draft, &account)?;
//! verify_signed_transaction(&signed)?;
//! let _wire_json = signed.to_json()?;
//! # Ok::<(), aptos_lite_sdk::SdkError>(())
//! ```
//!
//! ## Design Philosophy
//!
//! 1. Sign canonical bytes, never JSON.
//! 2. One owner for every secret, zeroed when it's done.
//! 3. No network, no threads, no retries. The host decides those.

pub mod account;
pub mod config;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod logging;
pub mod transaction;

pub use error::{Result, SdkError};
