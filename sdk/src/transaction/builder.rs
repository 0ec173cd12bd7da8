//! Transaction construction via the builder pattern.
//!
//! The [`TransactionBuilder`] is a draft: set fields in any order, call
//! [`build`](TransactionBuilder::build), and get back an immutable
//! [`RawTransaction`]. A failed build keeps every field you already set and
//! records why it failed, so the caller can fix the one missing piece and
//! try again.
//!
//! The builder does not sign. That happens in [`super::signing`], which
//! keeps construction testable without key material.

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use super::payload::{Arg, EntryFunction, ModuleBundle, Payload, Script};
use super::types::{AccountAddress, RawTransaction};
use crate::config::BuilderDefaults;
use crate::encoding::{pad_hex_address, remove_hex_prefix};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Why a draft could not be turned into a [`RawTransaction`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A required field was never set.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// An address-typed input did not parse.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Lifecycle of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    /// Fresh or just reset. Nothing set.
    Empty,
    /// At least one field set, not yet built.
    PartiallyConfigured,
    /// Last `build()` succeeded.
    Built,
    /// Last `build()` failed; see [`TransactionBuilder::last_error`].
    Invalid,
}

pub(crate) fn parse_address(address: &str) -> Result<AccountAddress, BuildError> {
    AccountAddress::from_hex(address).map_err(|_| BuildError::InvalidAddress(address.to_string()))
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for unsigned [`RawTransaction`] instances.
///
/// # Usage
///
/// ```
/// use aptos_lite_sdk::transaction::TransactionBuilder;
///
/// let mut draft = TransactionBuilder::new()
///     .sender("0x1")
///     .sequence_number(5)
///     .coin_transfer("0xCAFE", 1_000);
///
/// let txn = draft.build().unwrap();
/// assert_eq!(txn.max_gas_amount(), 2_000);
/// assert_eq!(txn.gas_unit_price(), 100);
/// ```
///
/// Unset gas fields, expiration and chain ID are filled from
/// [`BuilderDefaults`] at build time.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    /// Normalized sender, or the raw input when it held no hex digits.
    sender: Option<String>,
    /// Sender's next sequence number, as reported by the node.
    sequence_number: Option<u64>,
    /// Upper bound on gas units this transaction may consume.
    max_gas_amount: Option<u64>,
    /// Price per gas unit, in octas.
    gas_unit_price: Option<u64>,
    /// Absolute expiry, Unix seconds.
    expiration_timestamp_secs: Option<u64>,
    /// Network the signature is bound to.
    chain_id: Option<u8>,
    /// A preset that failed to parse one of its addresses keeps the error
    /// here until `build()` reports it.
    payload: Option<Result<Payload, BuildError>>,
    defaults: BuilderDefaults,
    state: BuilderState,
    last_error: Option<String>,
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionBuilder {
    /// Creates an empty draft using the built-in defaults.
    pub fn new() -> Self {
        Self {
            sender: None,
            sequence_number: None,
            max_gas_amount: None,
            gas_unit_price: None,
            expiration_timestamp_secs: None,
            chain_id: None,
            payload: None,
            defaults: BuilderDefaults::default(),
            state: BuilderState::Empty,
            last_error: None,
        }
    }

    /// Replaces the defaults used to fill unset fields at build time.
    pub fn with_defaults(mut self, defaults: BuilderDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    fn touched(mut self) -> Self {
        self.state = BuilderState::PartiallyConfigured;
        self
    }

    /// Sets the sender. Normalized to `0x` + 64 lowercase hex characters;
    /// an unparsable or empty value is reported by `build()`.
    pub fn sender(mut self, address: &str) -> Self {
        // Padding "" or "0x" would yield the zero address.
        let sender = if remove_hex_prefix(address).is_empty() {
            address.to_string()
        } else {
            pad_hex_address(address)
        };
        self.sender = Some(sender);
        self.touched()
    }

    /// Sets the sender's sequence number. Required.
    pub fn sequence_number(mut self, sequence_number: u64) -> Self {
        self.sequence_number = Some(sequence_number);
        self.touched()
    }

    /// Caps the gas units the transaction may spend.
    pub fn max_gas_amount(mut self, max_gas_amount: u64) -> Self {
        self.max_gas_amount = Some(max_gas_amount);
        self.touched()
    }

    /// Gas price in octas per unit.
    pub fn gas_unit_price(mut self, gas_unit_price: u64) -> Self {
        self.gas_unit_price = Some(gas_unit_price);
        self.touched()
    }

    /// Absolute expiration, Unix seconds.
    ///
    /// If not called, `build()` uses now plus the configured offset.
    pub fn expiration_timestamp_secs(mut self, expiration: u64) -> Self {
        self.expiration_timestamp_secs = Some(expiration);
        self.touched()
    }

    /// Binds the signature to one network.
    pub fn chain_id(mut self, chain_id: u8) -> Self {
        self.chain_id = Some(chain_id);
        self.touched()
    }

    pub(crate) fn payload_slot(mut self, payload: Result<Payload, BuildError>) -> Self {
        self.payload = Some(payload);
        self.touched()
    }

    /// Sets an entry function payload calling
    /// `module_address::module_name::function_name`.
    pub fn entry_function(
        self,
        module_address: &str,
        module_name: &str,
        function_name: &str,
        type_args: Vec<String>,
        args: Vec<Arg>,
    ) -> Self {
        let payload = parse_address(module_address).map(|module_address| {
            Payload::EntryFunction(EntryFunction {
                module_address,
                module_name: module_name.to_string(),
                function_name: function_name.to_string(),
                type_args,
                args,
            })
        });
        self.payload_slot(payload)
    }

    /// Sets a script payload.
    pub fn script(self, code: Vec<u8>, type_args: Vec<String>, args: Vec<Arg>) -> Self {
        self.payload_slot(Ok(Payload::Script(Script {
            code,
            type_args,
            args,
        })))
    }

    /// Sets a module bundle payload.
    pub fn module_bundle(self, modules: Vec<Vec<u8>>) -> Self {
        self.payload_slot(Ok(Payload::ModuleBundle(ModuleBundle { modules })))
    }

    // -- accessors ----------------------------------------------------------

    /// Where the draft is in its lifecycle.
    pub fn state(&self) -> BuilderState {
        self.state
    }

    /// `true` only right after a successful `build()`.
    pub fn is_valid(&self) -> bool {
        self.state == BuilderState::Built
    }

    /// Human-readable reason for the last failed build.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The normalized sender, if set.
    pub fn sender_hex(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    /// Sequence number, if set.
    pub fn get_sequence_number(&self) -> Option<u64> {
        self.sequence_number
    }

    pub fn get_max_gas_amount(&self) -> Option<u64> {
        self.max_gas_amount
    }

    pub fn get_gas_unit_price(&self) -> Option<u64> {
        self.gas_unit_price
    }

    /// Expiration, if set or pinned by a successful build.
    pub fn get_expiration_timestamp_secs(&self) -> Option<u64> {
        self.expiration_timestamp_secs
    }

    /// Chain ID that will be signed over. Falls back to the default if unset.
    pub fn get_chain_id(&self) -> u8 {
        self.chain_id.unwrap_or(self.defaults.chain_id)
    }

    // -- lifecycle ----------------------------------------------------------

    /// Clears every field and the last error. Defaults are kept.
    pub fn reset(&mut self) {
        let defaults = self.defaults;
        *self = Self::new();
        self.defaults = defaults;
    }

    fn default_expiration(&self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
        now.saturating_add(self.defaults.expiration_offset_secs)
    }

    /// Pins the values a successful build used, so the next build of the
    /// same draft produces the same envelope.
    fn pin_defaults(&mut self, txn: &RawTransaction) {
        self.max_gas_amount = Some(txn.max_gas_amount);
        self.gas_unit_price = Some(txn.gas_unit_price);
        self.expiration_timestamp_secs = Some(txn.expiration_timestamp_secs);
        self.chain_id = Some(txn.chain_id);
    }

    fn validate(&self) -> Result<RawTransaction, BuildError> {
        let sender = self
            .sender
            .as_deref()
            .ok_or(BuildError::MissingField("sender"))?;
        let sender = parse_address(sender)?;
        let sequence_number = self
            .sequence_number
            .ok_or(BuildError::MissingField("sequence_number"))?;
        let payload = match &self.payload {
            None => return Err(BuildError::MissingField("payload")),
            Some(Err(e)) => return Err(e.clone()),
            Some(Ok(payload)) => payload.clone(),
        };

        Ok(RawTransaction {
            sender,
            sequence_number,
            max_gas_amount: self.max_gas_amount.unwrap_or(self.defaults.max_gas_amount),
            gas_unit_price: self.gas_unit_price.unwrap_or(self.defaults.gas_unit_price),
            expiration_timestamp_secs: self
                .expiration_timestamp_secs
                .unwrap_or_else(|| self.default_expiration()),
            payload,
            chain_id: self.get_chain_id(),
        })
    }

    /// Fills defaults for unset optional fields, validates, and produces the
    /// envelope.
    ///
    /// After a successful build the defaulted values are written back into
    /// the draft, so building it again yields the same envelope (including
    /// the expiration). A failed build writes nothing back.
    ///
    /// # Errors
    ///
    /// [`BuildError::MissingField`] if sender, sequence number or payload is
    /// absent; [`BuildError::InvalidAddress`] if the sender or an address
    /// argument of a preset did not parse. On error the draft keeps all of
    /// its fields and [`last_error`](Self::last_error) says what went wrong.
    pub fn build(&mut self) -> Result<RawTransaction, BuildError> {
        match self.validate() {
            Ok(txn) => {
                self.pin_defaults(&txn);
                self.state = BuilderState::Built;
                self.last_error = None;
                debug!(
                    sender = %txn.sender(),
                    sequence_number = txn.sequence_number(),
                    payload = txn.payload().type_name(),
                    "transaction built"
                );
                Ok(txn)
            }
            Err(e) => {
                self.state = BuilderState::Invalid;
                self.last_error = Some(e.to_string());
                warn!(error = %e, "transaction build failed");
                Err(e)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
