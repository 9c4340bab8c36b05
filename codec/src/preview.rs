//! Before/after view of a payment's signing blob.
//!
//! [`preview`] encodes a record for signing, attaches that blob to a copy
//! of the record as a stand-in `TxnSignature`, and encodes the copy again.
//! No key material is involved; the point is to see what changes once a
//! signature is present.

use serde::Serialize;
use tracing::debug;

use crate::address::{AccountId, PublicKey};
use crate::codec::{encode, encode_for_signing};
use crate::error::CodecError;
use crate::transaction::{IssuedAmount, PaymentBuilder, Transaction};

// ---------------------------------------------------------------------------
// Sample scenario
// ---------------------------------------------------------------------------

/// Sender and receiver of the sample payment.
pub const SAMPLE_ACCOUNT: &str = "rU4Ai74ohgtUP8evP3qd2HuxWSFvLVt7uh";

/// Issuer of the sample currency.
pub const SAMPLE_ISSUER: &str = "rf1BiGeXwwQoi8Z2ueFYTEXSwuJYfV2Jpn";

pub const SAMPLE_CURRENCY: &str = "USD";

pub const SAMPLE_VALUE: &str = "10";

/// Ed25519 public key (`ED` prefix) carried as `SigningPubKey`.
pub const SAMPLE_SIGNING_PUB_KEY: &str =
    "EDC5248F3F06990D2E694C83AF55C45206ACD4AABC1151020600ECD6B75A5FF628";

/// Builds the sample payment: 10 USD from the sample account to itself,
/// with the same amount as `SendMax`.
pub fn sample_payment() -> Result<Transaction, CodecError> {
    let account: AccountId = SAMPLE_ACCOUNT.parse()?;
    let key: PublicKey = SAMPLE_SIGNING_PUB_KEY.parse()?;
    let usd = IssuedAmount::parse(SAMPLE_CURRENCY, SAMPLE_VALUE, SAMPLE_ISSUER)?;

    let payment = PaymentBuilder::new()
        .account(account)
        .destination(account)
        .amount(usd.clone())
        .send_max(usd)
        .signing_pub_key(key)
        .build()?;
    Ok(payment.into())
}

// ---------------------------------------------------------------------------
// Preview
// ---------------------------------------------------------------------------

/// The two encodings of a record and the signed copy they came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SigningPreview {
    /// Signing blob of the unsigned record.
    pub unsigned: String,
    /// Full encoding of the record with the signature attached.
    pub signed: String,
    /// The signed copy.
    pub signed_tx: Transaction,
}

/// Encodes `tx` for signing, attaches the blob as its signature, and
/// encodes the signed copy.
///
/// The second encoding is the full serialization: `TxnSignature` is not a
/// signing field, so a second signing blob would equal the first.
pub fn preview(tx: &Transaction) -> Result<SigningPreview, CodecError> {
    let unsigned = encode_for_signing(tx)?;
    let signed_tx = tx.with_signature(unsigned.clone());
    let signed = encode(&signed_tx)?;

    debug!(
        unsigned_len = unsigned.len() / 2,
        signed_len = signed.len() / 2,
        "built signing preview"
    );

    Ok(SigningPreview {
        unsigned,
        signed,
        signed_tx,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
