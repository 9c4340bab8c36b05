//! Fields every transaction type carries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::types::{memo_list, CurrencyAmount, Memo};
use crate::address::{AccountId, PublicKey};
use crate::error::CodecError;
use crate::serialize::field::{defs, Field, FieldValue};

/// The common transaction fields.
///
/// Only `Account` is required. `TxnSignature` is a hex string checked when
/// the record is encoded.
///
/// Keys no record type knows (a `Paths` set, a misspelled tag) are kept in
/// [`unknown_fields`](Self::unknown_fields) and make the record fail to
/// parse or encode. They are never dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommonFields {
    /// Sending account.
    pub account: AccountId,

    /// Transaction cost in drops.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<CurrencyAmount>,

    /// Account sequence number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,

    /// Flag bits, see [`crate::config::flags`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u32>,

    /// Last ledger index in which the transaction may be included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_ledger_sequence: Option<u32>,

    /// Sender-side tag, typically identifying a hosted user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_tag: Option<u32>,

    /// Attached memos.
    #[serde(default, skip_serializing_if = "Vec::is_empty", with = "memo_list")]
    pub memos: Vec<Memo>,

    /// Public key of the signer, hex in JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_pub_key: Option<PublicKey>,

    /// Hex signature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txn_signature: Option<String>,

    /// Keys not claimed by any typed member. Must stay empty.
    #[serde(flatten)]
    pub unknown_fields: Map<String, Value>,
}

impl CommonFields {
    /// Common fields with only the account set.
    pub fn new(account: AccountId) -> Self {
        Self {
            account,
            fee: None,
            sequence: None,
            flags: None,
            last_ledger_sequence: None,
            source_tag: None,
            memos: Vec::new(),
            signing_pub_key: None,
            txn_signature: None,
            unknown_fields: Map::new(),
        }
    }

    /// Fails on the first key the codec cannot encode.
    pub fn ensure_supported(&self) -> Result<(), CodecError> {
        match self.unknown_fields.keys().next() {
            Some(name) => Err(CodecError::UnsupportedField(name.clone())),
            None => Ok(()),
        }
    }

    /// Appends the wire fields for every populated member.
    pub(crate) fn push_fields(&self, out: &mut Vec<Field>) -> Result<(), CodecError> {
        self.ensure_supported()?;
        out.push(Field::new(
            &defs::ACCOUNT,
            FieldValue::AccountId(self.account),
        ));

        if let Some(fee) = &self.fee {
            if !fee.is_native() {
                return Err(CodecError::amount(fee.to_string(), "fee must be in drops"));
            }
            out.push(Field::new(&defs::FEE, FieldValue::Amount(fee.clone())));
        }
        if let Some(sequence) = self.sequence {
            out.push(Field::new(&defs::SEQUENCE, FieldValue::UInt32(sequence)));
        }
        if let Some(flags) = self.flags {
            out.push(Field::new(&defs::FLAGS, FieldValue::UInt32(flags)));
        }
        if let Some(last) = self.last_ledger_sequence {
            out.push(Field::new(
                &defs::LAST_LEDGER_SEQUENCE,
                FieldValue::UInt32(last),
            ));
        }
        if let Some(tag) = self.source_tag {
            out.push(Field::new(&defs::SOURCE_TAG, FieldValue::UInt32(tag)));
        }
        if !self.memos.is_empty() {
            let entries = self
                .memos
                .iter()
                .map(memo_field)
                .collect::<Result<Vec<_>, _>>()?;
            out.push(Field::new(&defs::MEMOS, FieldValue::Array(entries)));
        }
        if let Some(key) = &self.signing_pub_key {
            out.push(Field::new(
                &defs::SIGNING_PUB_KEY,
                FieldValue::Blob(key.as_bytes().to_vec()),
            ));
        }
        if let Some(signature) = &self.txn_signature {
            out.push(Field::blob_hex(&defs::TXN_SIGNATURE, signature)?);
        }
        Ok(())
    }
}

fn memo_field(memo: &Memo) -> Result<Field, CodecError> {
    let mut inner = Vec::with_capacity(3);
    if let Some(memo_type) = &memo.memo_type {
        inner.push(Field::blob_hex(&defs::MEMO_TYPE, memo_type)?);
    }
    if let Some(data) = &memo.memo_data {
        inner.push(Field::blob_hex(&defs::MEMO_DATA, data)?);
    }
    if let Some(format) = &memo.memo_format {
        inner.push(Field::blob_hex(&defs::MEMO_FORMAT, format)?);
    }
    Ok(Field::new(&defs::MEMO, FieldValue::Object(inner)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
