//! End-to-end integration tests for the Aptos Lite SDK.
//!
//! These tests exercise the full client-side lifecycle: identity creation or
//! import, key persistence, transaction construction, signing, verification,
//! and hand-off to a transport. They only use the public API.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use parking_lot::Mutex;

use aptos_lite_sdk::account::{AccountState, KeyAccount, KeyStore, MemoryKeyStore};
use aptos_lite_sdk::config::BuilderDefaults;
use aptos_lite_sdk::crypto::{verify, SeededCryptoProvider};
use aptos_lite_sdk::encoding::pad_hex_address;
use aptos_lite_sdk::transaction::{
    sign_built, sign_transaction, signing_message, submit, transaction_hash,
    verify_signed_transaction, Arg, BuildError, SignedTransaction, TransactionBuilder, Transport,
    VerificationError,
};
use aptos_lite_sdk::SdkError;

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

/// A transport that records what it was given instead of talking to a node.
#[derive(Default)]
struct MockNode {
    submitted: Vec<serde_json::Value>,
}

#[derive(Debug, thiserror::Error)]
#[error("mock node rejected transaction: {0}")]
struct Rejected(String);

impl Transport for MockNode {
    type Error = Rejected;

    fn submit(&mut self, signed: &SignedTransaction) -> std::result::Result<String, Rejected> {
        verify_signed_transaction(signed).map_err(|e| Rejected(e.to_string()))?;
        let json = signed.to_json().map_err(|e| Rejected(e.to_string()))?;
        self.submitted
            .push(serde_json::from_str(&json).map_err(|e| Rejected(e.to_string()))?);
        Ok(transaction_hash(signed))
    }
}

fn seeded_account(seed: u64) -> KeyAccount<SeededCryptoProvider> {
    let mut account = KeyAccount::with_provider(SeededCryptoProvider::new(seed));
    account.create_random().expect("seeded rng never fails");
    account
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn coin_transfer_full_lifecycle() -> Result<()> {
    let account = seeded_account(1);
    let sender = account
        .address()
        .ok_or_else(|| anyhow!("account not ready"))?
        .to_hex();

    let mut draft = TransactionBuilder::new()
        .sender(&sender)
        .sequence_number(5)
        .coin_transfer("0xCAFE", 1_000);
    let signed = sign_built(&mut draft, &account)?;
    verify_signed_transaction(&signed)?;

    let mut node = MockNode::default();
    let hash = submit(&mut node, &signed)?;
    assert_eq!(hash, transaction_hash(&signed));

    let wire = &node.submitted[0];
    assert_eq!(wire["sender"], sender);
    assert_eq!(wire["sequence_number"], "5");
    assert_eq!(wire["max_gas_amount"], "2000");
    assert_eq!(wire["gas_unit_price"], "100");
    assert_eq!(
        wire["payload"]["function"],
        format!("{}::aptos_account::transfer_coins", pad_hex_address("0x1"))
    );
    assert_eq!(
        wire["payload"]["arguments"],
        serde_json::json!([pad_hex_address("0xCAFE"), "1000"])
    );
    assert_eq!(wire["signature"]["type"], "ed25519_signature");
    assert_eq!(
        wire["signature"]["public_key"],
        account.public_key_hex().ok_or_else(|| anyhow!("no key"))?
    );
    Ok(())
}

#[test]
fn persisted_key_signs_identically_after_reload() -> Result<()> {
    let original = seeded_account(2);
    let mut store = MemoryKeyStore::new();
    original.save_to(&mut store, 128)?;

    let mut restored = KeyAccount::new();
    restored.load_from(&store, 128)?;
    assert_eq!(restored.state(), AccountState::Ready);

    let txn = TransactionBuilder::new()
        .sender("0x1")
        .sequence_number(0)
        .expiration_timestamp_secs(1_700_000_000)
        .create_account("0xabc")
        .build()?;

    let a = sign_transaction(&txn, &original)?;
    let b = sign_transaction(&txn, &restored)?;
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn corrupted_store_is_rejected() -> Result<()> {
    let mut store = MemoryKeyStore::new();
    seeded_account(3).save_to(&mut store, 0)?;
    store.write(0, &[0x00])?;

    let mut account = KeyAccount::new();
    let err = account.load_from(&store, 0).unwrap_err();
    assert!(matches!(
        err,
        aptos_lite_sdk::account::AccountError::InvalidFormat(_)
    ));
    assert_eq!(account.state(), AccountState::Uninitialized);
    Ok(())
}

#[test]
fn third_party_verifies_with_public_key_only() -> Result<()> {
    let account = seeded_account(4);
    let txn = TransactionBuilder::new()
        .sender("0x1")
        .sequence_number(9)
        .call_contract("0xdead", "game", "move_piece", vec![Arg::U8(3), Arg::Bool(true)])
        .build()?;
    let signed = sign_transaction(&txn, &account)?;

    let auth = signed.authenticator();
    assert!(verify(&auth.public_key, &signing_message(signed.raw()), &auth.signature));
    Ok(())
}

#[test]
fn tampered_transaction_is_refused_by_transport() -> Result<()> {
    let account = seeded_account(5);
    let txn = TransactionBuilder::new()
        .sender("0x1")
        .sequence_number(1)
        .coin_transfer("0x2", 10)
        .build()?;
    let signed = sign_transaction(&txn, &account)?;

    // Re-sign a different amount, then splice the old signature onto it.
    let forged_txn = TransactionBuilder::new()
        .sender("0x1")
        .sequence_number(1)
        .expiration_timestamp_secs(txn.expiration_timestamp_secs())
        .coin_transfer("0x2", 10_000)
        .build()?;
    let forged = SignedTransaction::new(forged_txn, signed.authenticator().clone());

    assert_eq!(
        verify_signed_transaction(&forged),
        Err(VerificationError::SignatureMismatch)
    );
    let mut node = MockNode::default();
    assert!(submit(&mut node, &forged).is_err());
    assert!(node.submitted.is_empty());
    Ok(())
}

#[test]
fn build_errors_surface_through_sign_built() {
    let account = seeded_account(6);
    let mut draft = TransactionBuilder::new()
        .sender("0x1")
        .coin_transfer("0x2", 1);

    match sign_built(&mut draft, &account) {
        Err(SdkError::Build(BuildError::MissingField(field))) => {
            assert_eq!(field, "sequence_number")
        }
        other => panic!("expected missing sequence number, got {:?}", other),
    }

    // Fix the draft and try again: nothing else was lost.
    let mut draft = draft.sequence_number(0);
    assert!(sign_built(&mut draft, &account).is_ok());
}

#[test]
fn custom_defaults_from_json_config() -> Result<()> {
    let defaults = BuilderDefaults::from_json(r#"{"max_gas_amount": 10000, "chain_id": 2}"#)?;
    let account = seeded_account(7);

    let mut draft = TransactionBuilder::new()
        .with_defaults(defaults)
        .sender("0x1")
        .sequence_number(0)
        .publish_module(vec![0xa1, 0x1c, 0xeb, 0x0b]);
    let signed = sign_built(&mut draft, &account)?;

    assert_eq!(signed.raw().max_gas_amount(), 10_000);
    assert_eq!(signed.raw().gas_unit_price(), 100);
    assert_eq!(signed.raw().chain_id(), 2);
    verify_signed_transaction(&signed)?;
    Ok(())
}

#[test]
fn shared_account_serialized_by_caller() -> Result<()> {
    // The SDK does no internal locking; sharing is the caller's job.
    let account = Arc::new(Mutex::new(seeded_account(8)));
    let sender = account
        .lock()
        .address()
        .ok_or_else(|| anyhow!("account not ready"))?
        .to_hex();

    let handles: Vec<_> = (0..4u64)
        .map(|seq| {
            let account = Arc::clone(&account);
            let sender = sender.clone();
            std::thread::spawn(move || -> std::result::Result<SignedTransaction, SdkError> {
                let mut draft = TransactionBuilder::new()
                    .sender(&sender)
                    .sequence_number(seq)
                    .coin_transfer("0xcafe", 1);
                let guard = account.lock();
                sign_built(&mut draft, &*guard)
            })
        })
        .collect();

    let mut seqs = Vec::new();
    for handle in handles {
        let signed = handle.join().map_err(|_| anyhow!("signing thread panicked"))??;
        verify_signed_transaction(&signed)?;
        seqs.push(signed.raw().sequence_number());
    }
    seqs.sort_unstable();
    assert_eq!(seqs, vec![0, 1, 2, 3]);
    Ok(())
}

#[test]
fn cleared_account_cannot_sign() -> Result<()> {
    let mut account = seeded_account(9);
    let txn = TransactionBuilder::new()
        .sender("0x1")
        .sequence_number(0)
        .coin_transfer("0x2", 1)
        .build()?;
    assert!(sign_transaction(&txn, &account).is_ok());

    account.clear();
    assert!(matches!(
        sign_transaction(&txn, &account),
        Err(SdkError::Account(_))
    ));
    Ok(())
}
