//! Integration tests for the signing-blob encoders.
//!
//! The sample payment and its expected blobs are fixed vectors: any change
//! to field ordering, amount encoding, or length prefixes shows up here as
//! a byte-level mismatch.

use xrpl_codec::config::flags::TF_FULLY_CANONICAL_SIG;
use xrpl_codec::crypto::sha512_half;
use xrpl_codec::{
    decode, encode, encode_for_multisigning, encode_for_signing, preview, sample_payment,
    signing_hash, transaction_id, AccountId, CodecError, CurrencyAmount, IssuedAmount,
    PaymentBuilder, PublicKey, Transaction,
};

// ---------------------------------------------------------------------------
// Vectors
// ---------------------------------------------------------------------------

const ACCOUNT: &str = "rU4Ai74ohgtUP8evP3qd2HuxWSFvLVt7uh";
const ISSUER: &str = "rf1BiGeXwwQoi8Z2ueFYTEXSwuJYfV2Jpn";

/// Fields of the sample payment that come before `TxnSignature`.
const SAMPLE_HEAD: &str = concat!(
    "120000",
    "61D4C38D7EA4C6800000000000000000000000000055534400000000004B4E9C06F24296074F7BC48F92A97916C6DC5EA9",
    "69D4C38D7EA4C6800000000000000000000000000055534400000000004B4E9C06F24296074F7BC48F92A97916C6DC5EA9",
    "7321EDC5248F3F06990D2E694C83AF55C45206ACD4AABC1151020600ECD6B75A5FF628",
);

/// Fields of the sample payment that come after `TxnSignature`.
const SAMPLE_TAIL: &str = concat!(
    "81147CCFE86388B264396710C29F69025DB1DFA4AE4C",
    "83147CCFE86388B264396710C29F69025DB1DFA4AE4C",
);

const SAMPLE_SIGNING_HASH: &str =
    "FBEE28BB6954D5E2DA1DBB0FB932F454EA59AD0F2EEED26652B6C067456AD989";

const SAMPLE_SIGNED_TX_ID: &str =
    "8BB3B377915BCA49AFB04D669E22B46EAAD626085F888FD34685D24EFB0690FD";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sample_signing_blob() -> String {
    format!("53545800{}{}", SAMPLE_HEAD, SAMPLE_TAIL)
}

fn issued_payment(value: &str) -> Transaction {
    let usd = IssuedAmount::parse("USD", value, ISSUER).unwrap();
    PaymentBuilder::new()
        .account(ACCOUNT.parse().unwrap())
        .destination(ISSUER.parse().unwrap())
        .amount(usd)
        .fee(12)
        .sequence(7)
        .flags(TF_FULLY_CANONICAL_SIG)
        .build()
        .unwrap()
        .into()
}

// ---------------------------------------------------------------------------
// Sample scenario
// ---------------------------------------------------------------------------

#[test]
fn sample_signing_blob_matches_vector() {
    let tx = sample_payment().unwrap();
    assert_eq!(encode_for_signing(&tx).unwrap(), sample_signing_blob());
}

#[test]
fn sample_unsigned_encoding_matches_vector() {
    let tx = sample_payment().unwrap();
    assert_eq!(encode(&tx).unwrap(), format!("{}{}", SAMPLE_HEAD, SAMPLE_TAIL));
}

#[test]
fn sample_preview_matches_vectors() {
    let tx = sample_payment().unwrap();
    let result = preview(&tx).unwrap();

    let blob = sample_signing_blob();
    assert_eq!(result.unsigned, blob);
    assert_eq!(
        result.signed,
        format!("{}74B8{}{}", SAMPLE_HEAD, blob, SAMPLE_TAIL)
    );
    assert!(!result.unsigned.is_empty());
    assert_ne!(result.unsigned, result.signed);
}

#[test]
fn sample_hashes_match_vectors() {
    let tx = sample_payment().unwrap();
    assert_eq!(hex::encode_upper(signing_hash(&tx).unwrap()), SAMPLE_SIGNING_HASH);

    let signed = preview(&tx).unwrap().signed_tx;
    assert_eq!(hex::encode_upper(transaction_id(&signed).unwrap()), SAMPLE_SIGNED_TX_ID);
}

#[test]
fn signing_hash_is_sha512_half_of_blob() {
    let tx = sample_payment().unwrap();
    let blob = hex::decode(encode_for_signing(&tx).unwrap()).unwrap();
    assert_eq!(signing_hash(&tx).unwrap(), sha512_half(&blob));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn every_encoder_is_deterministic() {
    let tx = sample_payment().unwrap();
    let signer: AccountId = ISSUER.parse().unwrap();

    for _ in 0..3 {
        assert_eq!(encode(&tx).unwrap(), encode(&tx).unwrap());
        assert_eq!(encode_for_signing(&tx).unwrap(), encode_for_signing(&tx).unwrap());
        assert_eq!(
            encode_for_multisigning(&tx, &signer).unwrap(),
            encode_for_multisigning(&tx, &signer).unwrap()
        );
        assert_eq!(transaction_id(&tx).unwrap(), transaction_id(&tx).unwrap());
    }
}

#[test]
fn equal_records_built_separately_encode_identically() {
    let a = sample_payment().unwrap();
    let b = Transaction::from_json(&a.to_json().to_string()).unwrap();
    assert_eq!(encode_for_signing(&a).unwrap(), encode_for_signing(&b).unwrap());
}

#[test]
fn encoding_does_not_mutate_the_record() {
    let tx = sample_payment().unwrap();
    let snapshot = tx.clone();

    encode(&tx).unwrap();
    encode_for_signing(&tx).unwrap();
    preview(&tx).unwrap();

    assert_eq!(tx, snapshot);
}

#[test]
fn signing_blob_ignores_signature() {
    let tx = sample_payment().unwrap();
    let signed = tx.with_signature("30440220DEADBEEF");
    assert_eq!(encode_for_signing(&tx).unwrap(), encode_for_signing(&signed).unwrap());
    assert_ne!(encode(&tx).unwrap(), encode(&signed).unwrap());
}

#[test]
fn issued_amount_survives_json_round_trip() {
    let tx = sample_payment().unwrap();
    let json = tx.to_json();
    assert_eq!(json["Amount"]["currency"], "USD");
    assert_eq!(json["Amount"]["value"], "10");
    assert_eq!(json["Amount"]["issuer"], ISSUER);

    let back = Transaction::from_json(&json.to_string()).unwrap();
    assert_eq!(back, tx);
}

#[test]
fn equivalent_value_spellings_encode_identically() {
    let reference = encode(&issued_payment("0.001")).unwrap();
    for spelling in ["1e-3", "0.0010", ".001", "1E-3", "+0.001"] {
        assert_eq!(
            encode(&issued_payment(spelling)).unwrap(),
            reference,
            "spelling {}",
            spelling
        );
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

#[test]
fn decode_recovers_sample_record() {
    let tx = sample_payment().unwrap();
    let signed = preview(&tx).unwrap().signed_tx;

    let decoded = decode(&encode(&signed).unwrap()).unwrap();
    assert_eq!(decoded["TransactionType"], "Payment");
    assert_eq!(decoded["Destination"], ACCOUNT);
    assert_eq!(decoded["SendMax"]["value"], "10");

    let back: Transaction = serde_json::from_value(decoded).unwrap();
    assert_eq!(back, signed);
}

#[test]
fn decode_rejects_runaway_nesting() {
    assert!(matches!(
        decode(&"EA".repeat(20_000)),
        Err(CodecError::Malformed(_))
    ));
}

#[test]
fn decode_rejects_truncated_blob() {
    let full = encode(&sample_payment().unwrap()).unwrap();
    let cut = &full[..full.len() - 10];
    assert!(matches!(decode(cut), Err(CodecError::UnexpectedEnd(_))));
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

#[test]
fn unrepresentable_amounts_fail_to_encode() {
    for value in [
        "1e96",
        "12345678901234567",
        "abc",
        "",
        " 10",
        "10 ",
        "10e9223372036854775807",
        "1e-9223372036854775808",
    ] {
        assert!(
            matches!(
                encode(&issued_payment(value)),
                Err(CodecError::InvalidAmount { .. })
            ),
            "value {:?}",
            value
        );
    }
}

#[test]
fn native_amount_above_cap_fails() {
    let tx: Transaction = PaymentBuilder::new()
        .account(ACCOUNT.parse().unwrap())
        .destination(ISSUER.parse().unwrap())
        .amount(CurrencyAmount::drops(100_000_000_000_000_001))
        .build()
        .unwrap()
        .into();
    assert!(matches!(encode(&tx), Err(CodecError::InvalidAmount { .. })));
}

#[test]
fn corrupted_address_is_rejected() {
    let mut chars: Vec<char> = ACCOUNT.chars().collect();
    let last = chars.len() - 1;
    chars[last] = if chars[last] == 'h' { 'j' } else { 'h' };
    let corrupted: String = chars.into_iter().collect();
    assert!(IssuedAmount::parse("USD", "1", &corrupted).is_err());
}

#[test]
fn payment_json_with_unencodable_keys_is_rejected() {
    let json = serde_json::json!({
        "TransactionType": "Payment",
        "Account": ACCOUNT,
        "Destination": ISSUER,
        "Amount": { "currency": "USD", "value": "10", "issuer": ISSUER },
        "SendMax": { "currency": "USD", "value": "10", "issuer": ISSUER },
        "Paths": [[{ "account": ISSUER }]],
        "DestinatonTag": 42,
        "Fee": "12",
        "Sequence": 1
    });
    assert!(matches!(
        Transaction::from_json(&json.to_string()),
        Err(CodecError::UnsupportedField(_))
    ));

    // Deserialized directly, the record still refuses to encode.
    let tx: Transaction = serde_json::from_value(json).unwrap();
    assert!(matches!(
        encode_for_signing(&tx),
        Err(CodecError::UnsupportedField(_))
    ));
}

#[test]
fn sample_signing_key_is_typed() {
    let tx = sample_payment().unwrap();
    let key = tx.common().signing_pub_key.unwrap();
    assert!(key.is_ed25519());
    assert_eq!(
        key.to_account_base58(),
        "aKGGGUyqTPjkgbKTs7BHrbhcxbQFSWbvXJwd7SinJPfTZ2FWcE9a"
    );
    assert_eq!(PublicKey::from_account_base58(&key.to_account_base58()).unwrap(), key);
}
