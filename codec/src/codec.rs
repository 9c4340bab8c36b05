//! Public encoding entry points.
//!
//! Every encoder borrows the record, never mutates it, and is
//! deterministic: the same record always yields the same hex string.
//!
//! | Function                   | Prefix      | Fields            |
//! |----------------------------|-------------|-------------------|
//! | [`encode`]                 | none        | all serialized    |
//! | [`encode_for_signing`]     | `STX\0`     | signing only      |
//! | [`encode_for_multisigning`]| `SMT\0`     | signing only + signer account |
//! | [`transaction_id`]         | `TXN\0`     | all serialized (hashed) |

use serde_json::Value;
use tracing::debug;

use crate::address::AccountId;
use crate::config::{
    HASH_PREFIX_TRANSACTION_ID, HASH_PREFIX_TRANSACTION_MULTISIGN, HASH_PREFIX_TRANSACTION_SIGN,
};
use crate::crypto::sha512_half;
use crate::error::CodecError;
use crate::serialize::{decode_fields, BinarySerializer, FieldFilter};
use crate::transaction::Transaction;

fn serialize(
    tx: &Transaction,
    prefix: &[u8],
    filter: FieldFilter,
) -> Result<BinarySerializer, CodecError> {
    let fields = tx.to_fields()?;
    let mut ser = BinarySerializer::with_prefix(prefix);
    ser.write_object(&fields, filter)?;
    debug!(
        tx_type = %tx.transaction_type(),
        fields = fields.len(),
        ?filter,
        bytes = ser.len(),
        "serialized transaction"
    );
    Ok(ser)
}

/// Canonical bytes of every serialized field, signature included.
pub fn encode_bytes(tx: &Transaction) -> Result<Vec<u8>, CodecError> {
    Ok(serialize(tx, &[], FieldFilter::All)?.into_bytes())
}

/// Bytes a single signer signs: `STX\0` followed by the signing fields.
pub fn signing_bytes(tx: &Transaction) -> Result<Vec<u8>, CodecError> {
    Ok(serialize(tx, &HASH_PREFIX_TRANSACTION_SIGN, FieldFilter::SigningOnly)?.into_bytes())
}

/// Uppercase hex of the full serialization.
pub fn encode(tx: &Transaction) -> Result<String, CodecError> {
    Ok(hex::encode_upper(encode_bytes(tx)?))
}

/// Uppercase hex of the single-signer signing blob.
///
/// `TxnSignature` is never part of the blob, so attaching a signature does
/// not change the result.
///
/// ```
/// use xrpl_codec::{encode_for_signing, sample_payment};
///
/// let tx = sample_payment().unwrap();
/// let before = encode_for_signing(&tx).unwrap();
/// let after = encode_for_signing(&tx.with_signature("ABCD")).unwrap();
/// assert_eq!(before, after);
/// ```
pub fn encode_for_signing(tx: &Transaction) -> Result<String, CodecError> {
    Ok(hex::encode_upper(signing_bytes(tx)?))
}

/// Uppercase hex of the blob one member of a multi-signer list signs:
/// `SMT\0`, the signing fields, then the signer's account ID.
pub fn encode_for_multisigning(tx: &Transaction, signer: &AccountId) -> Result<String, CodecError> {
    let mut ser = serialize(tx, &HASH_PREFIX_TRANSACTION_MULTISIGN, FieldFilter::SigningOnly)?;
    ser.write_raw(signer.as_bytes());
    Ok(hex::encode_upper(ser.into_bytes()))
}

/// SHA-512Half of the single-signer signing blob.
pub fn signing_hash(tx: &Transaction) -> Result<[u8; 32], CodecError> {
    Ok(sha512_half(&signing_bytes(tx)?))
}

/// The transaction ID: SHA-512Half of `TXN\0` and the full serialization.
pub fn transaction_id(tx: &Transaction) -> Result<[u8; 32], CodecError> {
    let ser = serialize(tx, &HASH_PREFIX_TRANSACTION_ID, FieldFilter::All)?;
    Ok(sha512_half(&ser.into_bytes()))
}

/// Decodes hex produced by [`encode`] back into ledger JSON.
///
/// Signing blobs carry a hash prefix and are not accepted here; strip the
/// first four bytes first.
pub fn decode(hex_blob: &str) -> Result<Value, CodecError> {
    let bytes = hex::decode(hex_blob.trim())?;
    debug!(bytes = bytes.len(), "decoding transaction");
    decode_fields(&bytes)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::flags::TF_FULLY_CANONICAL_SIG;
    use crate::transaction::{AccountSet, CurrencyAmount, Memo, PaymentBuilder};

    const ALICE: &str = "rU4Ai74ohgtUP8evP3qd2HuxWSFvLVt7uh";
    const BOB: &str = "rf1BiGeXwwQoi8Z2ueFYTEXSwuJYfV2Jpn";

    fn xrp_payment() -> Transaction {
        PaymentBuilder::new()
            .account(ALICE.parse().unwrap())
            .destination(BOB.parse().unwrap())
            .amount(CurrencyAmount::drops(1_000_000))
            .fee(12)
            .sequence(1)
            .flags(TF_FULLY_CANONICAL_SIG)
            .build()
            .unwrap()
            .into()
    }

    const XRP_PAYMENT_BODY: &str = "120000228000000024000000016140000000000F424068400000000000000C81147CCFE86388B264396710C29F69025DB1DFA4AE4C83144B4E9C06F24296074F7BC48F92A97916C6DC5EA9";

    #[test]
    fn signing_blob_of_native_payment() {
        let blob = encode_for_signing(&xrp_payment()).unwrap();
        assert_eq!(blob, format!("53545800{}", XRP_PAYMENT_BODY));
    }

    #[test]
    fn multisigning_appends_signer() {
        let signer: AccountId = BOB.parse().unwrap();
        let blob = encode_for_multisigning(&xrp_payment(), &signer).unwrap();
        assert_eq!(
            blob,
            format!(
                "534D5400{}4B4E9C06F24296074F7BC48F92A97916C6DC5EA9",
                XRP_PAYMENT_BODY
            )
        );
    }

    #[test]
    fn unsigned_full_encoding_has_no_prefix() {
        assert_eq!(encode(&xrp_payment()).unwrap(), XRP_PAYMENT_BODY);
    }

    #[test]
    fn signature_changes_full_encoding_only() {
        let tx = xrp_payment();
        let signed = tx.with_signature("0A0B");
        assert_eq!(
            encode_for_signing(&tx).unwrap(),
            encode_for_signing(&signed).unwrap()
        );
        assert_ne!(encode(&tx).unwrap(), encode(&signed).unwrap());
        assert_ne!(transaction_id(&tx).unwrap(), transaction_id(&signed).unwrap());
        assert_eq!(signing_hash(&tx).unwrap(), signing_hash(&signed).unwrap());
    }

    #[test]
    fn decode_reverses_encode() {
        let tx = xrp_payment();
        let decoded = decode(&encode(&tx).unwrap()).unwrap();
        assert_eq!(decoded["Account"], ALICE);
        assert_eq!(decoded["Amount"], "1000000");
        let back: Transaction = serde_json::from_value(decoded).unwrap();
        assert_eq!(back, tx);
    }

    #[test]
    fn account_set_with_memo_round_trips() {
        let mut tx = AccountSet::new(ALICE.parse().unwrap()).with_domain("example.com");
        tx.set_flag = Some(8);
        tx.common.fee = Some(CurrencyAmount::drops(10));
        tx.common.memos.push(Memo::text("text/plain", "hello"));
        let tx = Transaction::from(tx);

        let decoded = decode(&encode(&tx).unwrap()).unwrap();
        assert_eq!(decoded["TransactionType"], "AccountSet");
        assert_eq!(decoded["SetFlag"], 8);
        let back: Transaction = serde_json::from_value(decoded).unwrap();
        assert_eq!(back, tx);
    }

    #[test]
    fn bad_blob_hex_is_rejected_before_writing() {
        let tx = xrp_payment().with_signature("not hex");
        assert!(matches!(
            encode(&tx),
            Err(CodecError::InvalidHex {
                field: "TxnSignature",
                ..
            })
        ));
    }

    #[test]
    fn malformed_signing_key_json_is_rejected() {
        let mut json = xrp_payment().to_json();
        json["SigningPubKey"] = "ED00".into();
        assert!(serde_json::from_value::<Transaction>(json.clone()).is_err());

        json["SigningPubKey"] = "04".repeat(33).into();
        assert!(serde_json::from_value::<Transaction>(json).is_err());
    }

    #[test]
    fn unsupported_field_fails_encoding() {
        let mut tx = xrp_payment();
        tx.common_mut()
            .unknown_fields
            .insert("Paths".to_string(), serde_json::json!([]));
        assert!(matches!(
            encode(&tx),
            Err(CodecError::UnsupportedField(ref name)) if name == "Paths"
        ));
        assert!(encode_for_signing(&tx).is_err());
        assert!(transaction_id(&tx).is_err());
    }

    #[test]
    fn decode_rejects_bad_hex() {
        assert!(matches!(decode("XYZ"), Err(CodecError::Hex(_))));
    }
}
