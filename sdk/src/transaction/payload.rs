//! Transaction payloads and their arguments.
//!
//! A [`Payload`] says what the transaction does: call an entry function,
//! run a one-off script, or publish modules. Arguments are an explicit
//! [`Arg`] variant rather than loosely typed JSON, so every argument has
//! exactly one canonical encoding and one wire representation.
//!
//! ## Canonical layout
//!
//! ```text
//! payload        = tag:u8 body
//!   Script (0)        = bytecode:bytes type_args:vec<string> args:vec<tagged arg>
//!   ModuleBundle (1)  = modules:vec<bytes>
//!   EntryFunction (2) = address:32 module:string function:string
//!                       type_args:vec<string> args:vec<bytes(arg value)>
//! ```
//!
//! Entry function arguments are each wrapped as a length-prefixed byte
//! string holding the argument's untagged value encoding. Script arguments
//! carry a one-byte type tag in front of the value instead.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::types::AccountAddress;
use crate::encoding::{
    encode_bool, encode_bytes, encode_string, encode_u128, encode_u64, encode_u8, encode_vector,
    CanonicalEncode,
};

/// Variant tags for [`Payload`] in the canonical encoding.
const PAYLOAD_TAG_SCRIPT: u8 = 0;
const PAYLOAD_TAG_MODULE_BUNDLE: u8 = 1;
const PAYLOAD_TAG_ENTRY_FUNCTION: u8 = 2;

// ---------------------------------------------------------------------------
// Arg
// ---------------------------------------------------------------------------

/// A single typed argument to an entry function or script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Bool(bool),
    U8(u8),
    U64(u64),
    U128(u128),
    Address(AccountAddress),
    String(String),
    Bytes(Vec<u8>),
    Vector(Vec<Arg>),
}

impl Arg {
    /// One-byte type tag used when the argument is encoded with its type.
    pub fn type_tag(&self) -> u8 {
        match self {
            Arg::U8(_) => 0,
            Arg::U64(_) => 1,
            Arg::U128(_) => 2,
            Arg::Address(_) => 3,
            Arg::Bytes(_) => 4,
            Arg::Bool(_) => 5,
            Arg::String(_) => 6,
            Arg::Vector(_) => 7,
        }
    }

    /// Appends the untagged value encoding. Vectors recurse element by
    /// element, whatever the element variant.
    pub fn encode_value(&self, out: &mut Vec<u8>) {
        match self {
            Arg::Bool(v) => encode_bool(out, *v),
            Arg::U8(v) => encode_u8(out, *v),
            Arg::U64(v) => encode_u64(out, *v),
            Arg::U128(v) => encode_u128(out, *v),
            Arg::Address(addr) => addr.encode_to(out),
            Arg::String(s) => encode_string(out, s),
            Arg::Bytes(b) => encode_bytes(out, b),
            Arg::Vector(items) => {
                encode_u64(out, items.len() as u64);
                for item in items {
                    item.encode_value(out);
                }
            }
        }
    }

    /// Untagged value encoding as a fresh buffer.
    pub fn value_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_value(&mut out);
        out
    }
}

/// The tagged form: type tag, then the value.
impl CanonicalEncode for Arg {
    fn encode_to(&self, out: &mut Vec<u8>) {
        encode_u8(out, self.type_tag());
        self.encode_value(out);
    }
}

impl Serialize for Arg {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Arg::Bool(v) => serializer.serialize_bool(*v),
            Arg::U8(v) => serializer.serialize_u8(*v),
            Arg::U64(v) => serializer.collect_str(v),
            Arg::U128(v) => serializer.collect_str(v),
            Arg::Address(addr) => serializer.serialize_str(&addr.to_hex()),
            Arg::String(s) => serializer.serialize_str(s),
            Arg::Bytes(b) => serializer.serialize_str(&format!("0x{}", hex::encode(b))),
            Arg::Vector(items) => serializer.collect_seq(items),
        }
    }
}

impl From<bool> for Arg {
    fn from(v: bool) -> Self {
        Arg::Bool(v)
    }
}

impl From<u8> for Arg {
    fn from(v: u8) -> Self {
        Arg::U8(v)
    }
}

impl From<u64> for Arg {
    fn from(v: u64) -> Self {
        Arg::U64(v)
    }
}

impl From<u128> for Arg {
    fn from(v: u128) -> Self {
        Arg::U128(v)
    }
}

impl From<AccountAddress> for Arg {
    fn from(v: AccountAddress) -> Self {
        Arg::Address(v)
    }
}

impl From<&str> for Arg {
    fn from(v: &str) -> Self {
        Arg::String(v.to_string())
    }
}

impl From<String> for Arg {
    fn from(v: String) -> Self {
        Arg::String(v)
    }
}

// ---------------------------------------------------------------------------
// Payload variants
// ---------------------------------------------------------------------------

/// A call to `address::module::function`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFunction {
    /// Account the module is published under.
    pub module_address: AccountAddress,
    pub module_name: String,
    pub function_name: String,
    /// Move type tags, e.g. `0x1::aptos_coin::AptosCoin`.
    pub type_args: Vec<String>,
    /// Positional arguments, encoded without type tags.
    pub args: Vec<Arg>,
}

impl EntryFunction {
    /// `0x<64 hex>::module::function`.
    pub fn function_id(&self) -> String {
        format!(
            "{}::{}::{}",
            self.module_address, self.module_name, self.function_name
        )
    }
}

impl CanonicalEncode for EntryFunction {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.module_address.encode_to(out);
        encode_string(out, &self.module_name);
        encode_string(out, &self.function_name);
        encode_vector(out, &self.type_args);
        encode_u64(out, self.args.len() as u64);
        for arg in &self.args {
            encode_bytes(out, &arg.value_bytes());
        }
    }
}

/// A one-off Move script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    /// Compiled script bytecode.
    pub code: Vec<u8>,
    pub type_args: Vec<String>,
    /// Arguments, each encoded with its type tag.
    pub args: Vec<Arg>,
}

impl CanonicalEncode for Script {
    fn encode_to(&self, out: &mut Vec<u8>) {
        encode_bytes(out, &self.code);
        encode_vector(out, &self.type_args);
        encode_vector(out, &self.args);
    }
}

/// One or more compiled modules to publish under the sender's account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleBundle {
    /// Compiled module bytecode, one entry per module.
    pub modules: Vec<Vec<u8>>,
}

impl CanonicalEncode for ModuleBundle {
    fn encode_to(&self, out: &mut Vec<u8>) {
        encode_u64(out, self.modules.len() as u64);
        for module in &self.modules {
            encode_bytes(out, module);
        }
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// What a transaction does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Script(Script),
    ModuleBundle(ModuleBundle),
    EntryFunction(EntryFunction),
}

impl Payload {
    /// Variant tag written before the body in canonical bytes.
    pub fn tag(&self) -> u8 {
        match self {
            Payload::Script(_) => PAYLOAD_TAG_SCRIPT,
            Payload::ModuleBundle(_) => PAYLOAD_TAG_MODULE_BUNDLE,
            Payload::EntryFunction(_) => PAYLOAD_TAG_ENTRY_FUNCTION,
        }
    }

    /// Wire `type` string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Payload::Script(_) => "script_payload",
            Payload::ModuleBundle(_) => "module_bundle_payload",
            Payload::EntryFunction(_) => "entry_function_payload",
        }
    }
}

impl CanonicalEncode for Payload {
    fn encode_to(&self, out: &mut Vec<u8>) {
        encode_u8(out, self.tag());
        match self {
            Payload::Script(script) => script.encode_to(out),
            Payload::ModuleBundle(bundle) => bundle.encode_to(out),
            Payload::EntryFunction(func) => func.encode_to(out),
        }
    }
}

/// `{"bytecode": "0x…"}`, shared by scripts and module bundles on the wire.
#[derive(Serialize)]
struct BytecodeWire {
    bytecode: String,
}

impl BytecodeWire {
    fn new(code: &[u8]) -> Self {
        Self {
            bytecode: format!("0x{}", hex::encode(code)),
        }
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Payload::EntryFunction(func) => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("type", self.type_name())?;
                map.serialize_entry("function", &func.function_id())?;
                map.serialize_entry("type_arguments", &func.type_args)?;
                map.serialize_entry("arguments", &func.args)?;
                map.end()
            }
            Payload::Script(script) => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("type", self.type_name())?;
                map.serialize_entry("code", &BytecodeWire::new(&script.code))?;
                map.serialize_entry("type_arguments", &script.type_args)?;
                map.serialize_entry("arguments", &script.args)?;
                map.end()
            }
            Payload::ModuleBundle(bundle) => {
                let modules: Vec<BytecodeWire> =
                    bundle.modules.iter().map(|m| BytecodeWire::new(m)).collect();
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", self.type_name())?;
                map.serialize_entry("modules", &modules)?;
                map.end()
            }
        }
    }
}
