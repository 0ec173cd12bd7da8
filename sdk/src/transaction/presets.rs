//! Ready-made payloads for the common framework calls.
//!
//! Each preset fixes the module address, function name, and argument order
//! of one well-known entry function, so callers only supply the values.
//! Address arguments are parsed right here; a bad one is parked in the
//! draft and reported by `build()` as [`BuildError::InvalidAddress`].

use super::builder::{parse_address, BuildError, TransactionBuilder};
use super::payload::{Arg, EntryFunction, ModuleBundle, Payload};
use crate::config::{APTOS_COIN_TYPE, FRAMEWORK_ADDRESS, TOKEN_ADDRESS};

/// Builds an entry function payload against a fixed, known-good module
/// address.
fn framework_call(
    module_address: &str,
    module_name: &str,
    function_name: &str,
    type_args: Vec<String>,
    args: Result<Vec<Arg>, BuildError>,
) -> Result<Payload, BuildError> {
    Ok(Payload::EntryFunction(EntryFunction {
        module_address: parse_address(module_address)?,
        module_name: module_name.to_string(),
        function_name: function_name.to_string(),
        type_args,
        args: args?,
    }))
}

fn address_arg(address: &str) -> Result<Arg, BuildError> {
    parse_address(address).map(Arg::Address)
}

impl TransactionBuilder {
    /// `0x1::aptos_account::transfer_coins<AptosCoin>(recipient, amount)`.
    pub fn coin_transfer(self, recipient: &str, amount: u64) -> Self {
        self.coin_transfer_with_type(recipient, amount, APTOS_COIN_TYPE)
    }

    /// Same as [`coin_transfer`](Self::coin_transfer) for an arbitrary coin
    /// type.
    pub fn coin_transfer_with_type(self, recipient: &str, amount: u64, coin_type: &str) -> Self {
        let args = address_arg(recipient).map(|recipient| vec![recipient, Arg::U64(amount)]);
        self.payload_slot(framework_call(
            FRAMEWORK_ADDRESS,
            "aptos_account",
            "transfer_coins",
            vec![coin_type.to_string()],
            args,
        ))
    }

    /// `0x3::token::direct_transfer_script(creator, collection, name,
    /// recipient, amount)`.
    pub fn token_transfer(
        self,
        recipient: &str,
        creator: &str,
        collection: &str,
        token_name: &str,
        amount: u64,
    ) -> Self {
        let args = address_arg(creator).and_then(|creator| {
            Ok(vec![
                creator,
                Arg::String(collection.to_string()),
                Arg::String(token_name.to_string()),
                address_arg(recipient)?,
                Arg::U64(amount),
            ])
        });
        self.payload_slot(framework_call(
            TOKEN_ADDRESS,
            "token",
            "direct_transfer_script",
            vec![],
            args,
        ))
    }

    /// `0x1::aptos_account::create_account(auth_key)`.
    pub fn create_account(self, auth_key: &str) -> Self {
        let args = address_arg(auth_key).map(|auth_key| vec![auth_key]);
        self.payload_slot(framework_call(
            FRAMEWORK_ADDRESS,
            "aptos_account",
            "create_account",
            vec![],
            args,
        ))
    }

    /// `0x3::token::create_collection_script(name, description, uri,
    /// maximum, mutate_settings...)`.
    ///
    /// Each mutate flag becomes one trailing `bool` argument.
    pub fn create_collection(
        self,
        name: &str,
        description: &str,
        uri: &str,
        maximum: u64,
        mutate_settings: &[bool],
    ) -> Self {
        let mut args = vec![
            Arg::String(name.to_string()),
            Arg::String(description.to_string()),
            Arg::String(uri.to_string()),
            Arg::U64(maximum),
        ];
        args.extend(mutate_settings.iter().copied().map(Arg::Bool));
        self.payload_slot(framework_call(
            TOKEN_ADDRESS,
            "token",
            "create_collection_script",
            vec![],
            Ok(args),
        ))
    }

    /// `0x3::token::create_token_script(collection, name, description,
    /// supply, uri, mutate_settings...)`.
    pub fn create_token(
        self,
        collection: &str,
        name: &str,
        description: &str,
        supply: u64,
        uri: &str,
        mutate_settings: &[bool],
    ) -> Self {
        let mut args = vec![
            Arg::String(collection.to_string()),
            Arg::String(name.to_string()),
            Arg::String(description.to_string()),
            Arg::U64(supply),
            Arg::String(uri.to_string()),
        ];
        args.extend(mutate_settings.iter().copied().map(Arg::Bool));
        self.payload_slot(framework_call(
            TOKEN_ADDRESS,
            "token",
            "create_token_script",
            vec![],
            Ok(args),
        ))
    }

    /// Publishes a single compiled module.
    pub fn publish_module(self, module_code: Vec<u8>) -> Self {
        self.payload_slot(Ok(Payload::ModuleBundle(ModuleBundle {
            modules: vec![module_code],
        })))
    }

    /// Calls any entry function with no type arguments.
    pub fn call_contract(
        self,
        contract_address: &str,
        module_name: &str,
        function_name: &str,
        args: Vec<Arg>,
    ) -> Self {
        self.entry_function(contract_address, module_name, function_name, vec![], args)
    }

    /// A complete coin transfer draft in one call.
    pub fn coin_transfer_draft(
        sender: &str,
        recipient: &str,
        amount: u64,
        sequence_number: u64,
        max_gas_amount: u64,
        gas_unit_price: u64,
    ) -> Self {
        TransactionBuilder::new()
            .sender(sender)
            .sequence_number(sequence_number)
            .max_gas_amount(max_gas_amount)
            .gas_unit_price(gas_unit_price)
            .coin_transfer(recipient, amount)
    }

    /// A complete account creation draft in one call.
    pub fn create_account_draft(
        sender: &str,
        auth_key: &str,
        sequence_number: u64,
        max_gas_amount: u64,
        gas_unit_price: u64,
    ) -> Self {
        TransactionBuilder::new()
            .sender(sender)
            .sequence_number(sequence_number)
            .max_gas_amount(max_gas_amount)
            .gas_unit_price(gas_unit_price)
            .create_account(auth_key)
    }
}
