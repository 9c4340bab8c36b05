//! # Transaction Records
//!
//! Typed records for the transaction types the codec understands, and the
//! helpers that turn them into ordered wire fields.
//!
//! ```text
//! types.rs       — TransactionType, CurrencyCode, amounts, memos
//! common.rs      — Fields shared by every transaction
//! payment.rs     — Payment and PaymentBuilder
//! account_set.rs — AccountSet
//! signing.rs     — Attaching signature material to a copy of a record
//! ```
//!
//! A [`Transaction`] is what every codec entry point accepts. Its JSON form
//! is the ledger's own: an object with a `TransactionType` discriminator
//! and PascalCase field names.

pub mod account_set;
pub mod common;
pub mod payment;
pub mod signing;
pub mod types;

use serde::{Deserialize, Serialize};

pub use account_set::AccountSet;
pub use common::CommonFields;
pub use payment::{Payment, PaymentBuilder};
pub use signing::{attach_public_key, attach_signature};
pub use types::{CurrencyAmount, CurrencyCode, IssuedAmount, Memo, TransactionType};

use crate::error::CodecError;
use crate::serialize::field::{defs, Field, FieldValue};

/// Any supported transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "TransactionType")]
pub enum Transaction {
    Payment(Payment),
    AccountSet(AccountSet),
}

impl Transaction {
    /// Parses a transaction from its ledger JSON form.
    ///
    /// Keys that no member of the record claims are an error, so a field
    /// the codec cannot encode never drops out of the blob unnoticed.
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        let tx: Self = serde_json::from_str(json)?;
        tx.common().ensure_supported()?;
        Ok(tx)
    }

    /// Renders the ledger JSON form.
    pub fn to_json(&self) -> serde_json::Value {
        // Every member serializes to a string, number, or object, none of
        // which can fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// The discriminator of this record.
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Payment(_) => TransactionType::Payment,
            Self::AccountSet(_) => TransactionType::AccountSet,
        }
    }

    /// Fields shared by all transaction types.
    pub fn common(&self) -> &CommonFields {
        match self {
            Self::Payment(tx) => &tx.common,
            Self::AccountSet(tx) => &tx.common,
        }
    }

    /// Mutable access to the shared fields.
    pub fn common_mut(&mut self) -> &mut CommonFields {
        match self {
            Self::Payment(tx) => &mut tx.common,
            Self::AccountSet(tx) => &mut tx.common,
        }
    }

    /// Every populated field as a wire field, in no particular order.
    ///
    /// Hex members are decoded here, so malformed blobs surface as errors
    /// before any bytes are written.
    pub fn to_fields(&self) -> Result<Vec<Field>, CodecError> {
        let mut fields = Vec::with_capacity(16);
        fields.push(Field::new(
            &defs::TRANSACTION_TYPE,
            FieldValue::UInt16(self.transaction_type().code()),
        ));
        match self {
            Self::Payment(tx) => tx.push_fields(&mut fields)?,
            Self::AccountSet(tx) => tx.push_fields(&mut fields)?,
        }
        Ok(fields)
    }
}

impl From<Payment> for Transaction {
    fn from(payment: Payment) -> Self {
        Self::Payment(payment)
    }
}

impl From<AccountSet> for Transaction {
    fn from(tx: AccountSet) -> Self {
        Self::AccountSet(tx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
