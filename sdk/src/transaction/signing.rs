//! Transaction signing.
//!
//! Signing is a separate step from building because the account may not be
//! available at construction time. This is the one place where a built
//! envelope and a ready [`KeyAccount`] meet. No network I/O happens here and
//! nothing is retried: errors from either side propagate to the caller.

use tracing::{info, warn};

use super::builder::TransactionBuilder;
use super::types::{RawTransaction, SignedTransaction};
use crate::account::KeyAccount;
use crate::config::{RAW_TRANSACTION_SALT, TRANSACTION_SALT};
use crate::crypto::{sha3_256, sha3_256_multi, CryptoProvider};
use crate::encoding::CanonicalEncode;
use crate::error::SdkError;

/// Variant byte of a user transaction in the signed-transaction hash.
const USER_TRANSACTION_TAG: u8 = 0x00;

/// The exact bytes an Ed25519 signature covers:
/// `SHA3-256("APTOS::RawTransaction") || canonical_bytes(txn)`.
///
/// The prefix separates transaction signatures from signatures over any
/// other message type, so a signed transaction can never be replayed as
/// something else.
pub fn signing_message(txn: &RawTransaction) -> Vec<u8> {
    let body = txn.to_canonical_bytes();
    let mut message = Vec::with_capacity(32 + body.len());
    message.extend_from_slice(&sha3_256(RAW_TRANSACTION_SALT));
    message.extend_from_slice(&body);
    message
}

/// Signs a built envelope with `account`.
///
/// The envelope's sender is kept as is. Signing with a key whose address
/// differs from the sender is allowed (rotated authentication keys) but
/// logged at `warn`.
///
/// # Example
///
/// ```
/// use aptos_lite_sdk::account::KeyAccount;
/// use aptos_lite_sdk::transaction::{sign_transaction, TransactionBuilder};
///
/// let mut account = KeyAccount::new();
/// account.create_random().unwrap();
/// let sender = account.address().unwrap().to_hex();
///
/// let mut draft = TransactionBuilder::new()
///     .sender(&sender)
///     .sequence_number(0)
///     .coin_transfer("0xcafe", 1_000);
/// let txn = draft.build().unwrap();
///
/// let signed = sign_transaction(&txn, &account).unwrap();
/// assert_eq!(signed.raw(), &txn);
/// ```
pub fn sign_transaction<P: CryptoProvider>(
    txn: &RawTransaction,
    account: &KeyAccount<P>,
) -> Result<SignedTransaction, SdkError> {
    if let Some(address) = account.address() {
        if &address != txn.sender() {
            warn!(
                sender = %txn.sender(),
                signer = %address,
                "signing account address differs from transaction sender"
            );
        }
    }

    let signed = account.sign_transaction(txn)?;
    info!(
        sender = %txn.sender(),
        sequence_number = txn.sequence_number(),
        "transaction signed"
    );
    Ok(signed)
}

/// Builds the draft and signs the result in one step.
pub fn sign_built<P: CryptoProvider>(
    builder: &mut TransactionBuilder,
    account: &KeyAccount<P>,
) -> Result<SignedTransaction, SdkError> {
    let txn = builder.build()?;
    sign_transaction(&txn, account)
}

/// Transaction identifier:
/// `0x` + hex(SHA3-256(SHA3-256("APTOS::Transaction") || 0x00 || signed bytes)).
pub fn transaction_hash(signed: &SignedTransaction) -> String {
    let salt = sha3_256(TRANSACTION_SALT);
    let body = signed.to_canonical_bytes();
    let digest = sha3_256_multi(&[&salt, &[USER_TRANSACTION_TAG], &body]);
    format!("0x{}", hex::encode(digest))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountError;
    use crate::crypto::SeededCryptoProvider;
    use crate::transaction::builder::BuildError;

    const KEY_HEX: &str = "0x9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";

    fn account() -> KeyAccount {
        KeyAccount::from_private_key_hex(KEY_HEX).unwrap()
    }

    fn draft(sender: &str) -> TransactionBuilder {
        TransactionBuilder::new()
            .sender(sender)
            .sequence_number(1)
            .expiration_timestamp_secs(1_700_000_000)
            .coin_transfer("0xcafe", 500)
    }

    #[test]
    fn signing_message_has_salt_prefix() {
        let txn = draft("0x1").build().unwrap();
        let message = signing_message(&txn);
        assert_eq!(&message[..32], &sha3_256(b"APTOS::RawTransaction"));
        assert_eq!(&message[32..], txn.to_canonical_bytes().as_slice());
    }

    #[test]
    fn signing_message_changes_with_every_field() {
        let base = draft("0x1").build().unwrap();
        let variants = [
            draft("0x2").build().unwrap(),
            draft("0x1").sequence_number(2).build().unwrap(),
            draft("0x1").max_gas_amount(1).build().unwrap(),
            draft("0x1").gas_unit_price(1).build().unwrap(),
            draft("0x1").expiration_timestamp_secs(1).build().unwrap(),
            draft("0x1").chain_id(2).build().unwrap(),
            draft("0x1").coin_transfer("0xcafe", 501).build().unwrap(),
        ];
        for variant in &variants {
            assert_ne!(signing_message(&base), signing_message(variant));
        }
    }

    #[test]
    fn signature_verifies_against_public_key() {
        let account = account();
        let sender = account.address().unwrap().to_hex();
        let txn = draft(&sender).build().unwrap();
        let signed = sign_transaction(&txn, &account).unwrap();

        let auth = signed.authenticator();
        assert_eq!(auth.public_key, account.public_key().unwrap());
        assert!(auth.public_key.verify(&signing_message(&txn), &auth.signature));
    }

    #[test]
    fn signing_is_deterministic() {
        let account = account();
        let txn = draft("0x1").build().unwrap();
        let a = sign_transaction(&txn, &account).unwrap();
        let b = sign_transaction(&txn, &account).unwrap();
        assert_eq!(a, b);
        assert_eq!(transaction_hash(&a), transaction_hash(&b));
    }

    #[test]
    fn different_accounts_produce_different_signatures() {
        let txn = draft("0x1").build().unwrap();
        let mut other = KeyAccount::with_provider(SeededCryptoProvider::new(1));
        other.create_random().unwrap();

        let a = sign_transaction(&txn, &account()).unwrap();
        let b = sign_transaction(&txn, &other).unwrap();
        assert_ne!(a.authenticator().signature, b.authenticator().signature);
    }

    #[test]
    fn sender_is_kept_even_if_it_differs_from_signer() {
        let txn = draft("0x1").build().unwrap();
        let signed = sign_transaction(&txn, &account()).unwrap();
        assert_eq!(signed.raw().sender(), txn.sender());
    }

    #[test]
    fn uninitialized_account_cannot_sign() {
        let txn = draft("0x1").build().unwrap();
        let empty = KeyAccount::new();
        let err = sign_transaction(&txn, &empty).unwrap_err();
        assert!(matches!(err, SdkError::Account(AccountError::Uninitialized)));
    }

    #[test]
    fn sign_built_propagates_build_errors() {
        let mut b = TransactionBuilder::new().sequence_number(1);
        let err = sign_built(&mut b, &account()).unwrap_err();
        assert!(matches!(
            err,
            SdkError::Build(BuildError::MissingField("sender"))
        ));
        assert!(b.last_error().is_some());
    }

    #[test]
    fn sign_built_happy_path() {
        let mut b = draft("0x1");
        let signed = sign_built(&mut b, &account()).unwrap();
        assert!(b.is_valid());
        assert_eq!(signed.raw().sequence_number(), 1);
    }

    #[test]
    fn transaction_hash_shape() {
        let signed = sign_transaction(&draft("0x1").build().unwrap(), &account()).unwrap();
        let hash = transaction_hash(&signed);
        assert!(hash.starts_with("0x"));
        assert_eq!(hash.len(), 66);
    }

    #[test]
    fn signed_json_has_wire_fields() {
        let signed = sign_transaction(&draft("0x1").build().unwrap(), &account()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&signed.to_json().unwrap()).unwrap();
        assert_eq!(value["sender"], crate::encoding::pad_hex_address("0x1"));
        assert_eq!(value["sequence_number"], "1");
        assert_eq!(value["expiration_timestamp_secs"], "1700000000");
        assert_eq!(value["payload"]["type"], "entry_function_payload");
        assert_eq!(value["signature"]["type"], "ed25519_signature");
        assert!(value.get("chain_id").is_none());
    }
}
