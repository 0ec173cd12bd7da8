//! Walkthrough of the client-side lifecycle: create a key, persist and
//! reload it, build a coin transfer, sign it, verify it, and print the wire
//! JSON a transport would submit.
//!
//! Run with:
//!   cargo run --example demo
//!
//! Set `RUST_LOG=aptos_lite_sdk=debug` to see the SDK's own events.

use anyhow::{anyhow, Result};

use aptos_lite_sdk::account::{KeyAccount, MemoryKeyStore};
use aptos_lite_sdk::config::{network_name, CHAIN_ID_TESTNET};
use aptos_lite_sdk::logging::{init_logging, LogFormat};
use aptos_lite_sdk::transaction::{
    sign_built, transaction_hash, verify_signed_transaction, TransactionBuilder,
};

const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

fn step(n: u32, title: &str) {
    println!("\n{BOLD}[{n}] {title}{RESET}");
}

fn main() -> Result<()> {
    let format = std::env::var("LOG_FORMAT")
        .map(|s| LogFormat::from_str_lossy(&s))
        .unwrap_or(LogFormat::Pretty);
    init_logging("warn", format);

    step(1, "Create an account");
    let mut account = KeyAccount::new();
    account.create_random()?;
    let address = account.address().ok_or_else(|| anyhow!("account not ready"))?;
    println!("  address     {GREEN}{address}{RESET}");
    println!(
        "  public key  {DIM}{}{RESET}",
        account.public_key_hex().unwrap_or_default()
    );

    step(2, "Persist and reload the key");
    let mut store = MemoryKeyStore::new();
    account.save_to(&mut store, 0)?;
    let mut reloaded = KeyAccount::new();
    reloaded.load_from(&store, 0)?;
    println!(
        "  reloaded address matches: {}",
        reloaded.address() == account.address()
    );

    step(3, "Build a coin transfer");
    let mut draft = TransactionBuilder::new()
        .sender(&address.to_hex())
        .sequence_number(0)
        .chain_id(CHAIN_ID_TESTNET)
        .coin_transfer("0xcafe", 1_000);
    println!("  chain       {}", network_name(draft.get_chain_id()));

    step(4, "Sign and verify");
    let signed = sign_built(&mut draft, &reloaded)?;
    verify_signed_transaction(&signed)?;
    println!("  hash        {GREEN}{}{RESET}", transaction_hash(&signed));

    step(5, "Wire JSON");
    let json: serde_json::Value = serde_json::from_str(&signed.to_json()?)?;
    println!("{}", serde_json::to_string_pretty(&json)?);

    account.clear();
    Ok(())
}
