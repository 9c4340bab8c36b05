//! Payment records and their builder.
//!
//! [`PaymentBuilder`] follows the usual fluent flow: set fields, call
//! `.build()`, get back an unsigned [`Payment`]. Building never touches key
//! material; the signature is attached later as a plain field.

use serde::{Deserialize, Serialize};

use super::common::CommonFields;
use super::types::{CurrencyAmount, Memo};
use crate::address::{AccountId, PublicKey};
use crate::error::CodecError;
use crate::serialize::field::{defs, Field, FieldValue};

// ---------------------------------------------------------------------------
// Payment
// ---------------------------------------------------------------------------

/// A `Payment` transaction.
///
/// JSON field names follow the ledger's PascalCase convention, so a record
/// read from `{"TransactionType": "Payment", "Account": ..., ...}` maps
/// directly onto this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Payment {
    /// Account, fee, sequence, signature fields.
    #[serde(flatten)]
    pub common: CommonFields,

    /// Amount to deliver.
    pub amount: CurrencyAmount,

    /// Receiving account.
    pub destination: AccountId,

    /// Upper bound on what the sender spends, source currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_max: Option<CurrencyAmount>,

    /// Lower bound on what a partial payment delivers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deliver_min: Option<CurrencyAmount>,

    /// Receiver-side tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<u32>,

    /// 256-bit hex identifier for the reason of the payment.
    #[serde(rename = "InvoiceID", default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
}

impl Payment {
    pub(crate) fn push_fields(&self, out: &mut Vec<Field>) -> Result<(), CodecError> {
        self.common.push_fields(out)?;

        out.push(Field::new(
            &defs::AMOUNT,
            FieldValue::Amount(self.amount.clone()),
        ));
        out.push(Field::new(
            &defs::DESTINATION,
            FieldValue::AccountId(self.destination),
        ));
        if let Some(send_max) = &self.send_max {
            out.push(Field::new(
                &defs::SEND_MAX,
                FieldValue::Amount(send_max.clone()),
            ));
        }
        if let Some(deliver_min) = &self.deliver_min {
            out.push(Field::new(
                &defs::DELIVER_MIN,
                FieldValue::Amount(deliver_min.clone()),
            ));
        }
        if let Some(tag) = self.destination_tag {
            out.push(Field::new(&defs::DESTINATION_TAG, FieldValue::UInt32(tag)));
        }
        if let Some(invoice) = &self.invoice_id {
            out.push(Field::hash256_hex(&defs::INVOICE_ID, invoice)?);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PaymentBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for unsigned [`Payment`] records.
///
/// ```
/// use xrpl_codec::{AccountId, CurrencyAmount, PaymentBuilder};
///
/// let alice = AccountId::from_classic("rU4Ai74ohgtUP8evP3qd2HuxWSFvLVt7uh").unwrap();
/// let bob = AccountId::from_classic("rf1BiGeXwwQoi8Z2ueFYTEXSwuJYfV2Jpn").unwrap();
///
/// let payment = PaymentBuilder::new()
///     .account(alice)
///     .destination(bob)
///     .amount(CurrencyAmount::drops(1_000_000))
///     .fee(12)
///     .sequence(1)
///     .build()
///     .unwrap();
/// assert!(payment.common.txn_signature.is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PaymentBuilder {
    account: Option<AccountId>,
    destination: Option<AccountId>,
    amount: Option<CurrencyAmount>,
    send_max: Option<CurrencyAmount>,
    deliver_min: Option<CurrencyAmount>,
    destination_tag: Option<u32>,
    source_tag: Option<u32>,
    invoice_id: Option<String>,
    fee: Option<u64>,
    sequence: Option<u32>,
    flags: Option<u32>,
    last_ledger_sequence: Option<u32>,
    memos: Vec<Memo>,
    signing_pub_key: Option<PublicKey>,
}

impl PaymentBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sending account.
    pub fn account(mut self, account: AccountId) -> Self {
        self.account = Some(account);
        self
    }

    /// Sets the receiving account.
    pub fn destination(mut self, destination: AccountId) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Sets the amount to deliver.
    pub fn amount(mut self, amount: impl Into<CurrencyAmount>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    /// Sets the maximum amount to spend.
    pub fn send_max(mut self, send_max: impl Into<CurrencyAmount>) -> Self {
        self.send_max = Some(send_max.into());
        self
    }

    /// Sets the minimum amount a partial payment must deliver.
    pub fn deliver_min(mut self, deliver_min: impl Into<CurrencyAmount>) -> Self {
        self.deliver_min = Some(deliver_min.into());
        self
    }

    pub fn destination_tag(mut self, tag: u32) -> Self {
        self.destination_tag = Some(tag);
        self
    }

    pub fn source_tag(mut self, tag: u32) -> Self {
        self.source_tag = Some(tag);
        self
    }

    /// Sets the invoice ID (64 hex characters).
    pub fn invoice_id(mut self, invoice_id: &str) -> Self {
        self.invoice_id = Some(invoice_id.to_string());
        self
    }

    /// Sets the fee in drops.
    pub fn fee(mut self, drops: u64) -> Self {
        self.fee = Some(drops);
        self
    }

    pub fn sequence(mut self, sequence: u32) -> Self {
        self.sequence = Some(sequence);
        self
    }

    pub fn flags(mut self, flags: u32) -> Self {
        self.flags = Some(flags);
        self
    }

    pub fn last_ledger_sequence(mut self, ledger_index: u32) -> Self {
        self.last_ledger_sequence = Some(ledger_index);
        self
    }

    /// Appends a memo.
    pub fn memo(mut self, memo: Memo) -> Self {
        self.memos.push(memo);
        self
    }

    /// Sets the public key of the signer.
    pub fn signing_pub_key(mut self, key: PublicKey) -> Self {
        self.signing_pub_key = Some(key);
        self
    }

    /// Consumes the builder and produces an unsigned [`Payment`].
    ///
    /// Fails with [`CodecError::MissingField`] if `Account`, `Destination`,
    /// or `Amount` was never set.
    pub fn build(self) -> Result<Payment, CodecError> {
        let account = self.account.ok_or(CodecError::MissingField("Account"))?;
        let destination = self
            .destination
            .ok_or(CodecError::MissingField("Destination"))?;
        let amount = self.amount.ok_or(CodecError::MissingField("Amount"))?;

        let mut common = CommonFields::new(account);
        common.fee = self.fee.map(CurrencyAmount::Xrp);
        common.sequence = self.sequence;
        common.flags = self.flags;
        common.last_ledger_sequence = self.last_ledger_sequence;
        common.source_tag = self.source_tag;
        common.memos = self.memos;
        common.signing_pub_key = self.signing_pub_key;

        Ok(Payment {
            common,
            amount,
            destination,
            send_max: self.send_max,
            deliver_min: self.deliver_min,
            destination_tag: self.destination_tag,
            invoice_id: self.invoice_id,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
