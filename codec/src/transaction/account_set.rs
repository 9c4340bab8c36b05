//! `AccountSet` records.

use serde::{Deserialize, Serialize};

use super::common::CommonFields;
use crate::address::AccountId;
use crate::error::CodecError;
use crate::serialize::field::{defs, Field, FieldValue};

/// An `AccountSet` transaction: changes flags and settings on the sending
/// account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountSet {
    #[serde(flatten)]
    pub common: CommonFields,

    /// Account flag to enable (an `asf*` value).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_flag: Option<u32>,

    /// Account flag to disable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear_flag: Option<u32>,

    /// Hex-encoded lower-case domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Fee charged on transfers of this account's issued currencies, in
    /// billionths above 1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_rate: Option<u32>,
}

impl AccountSet {
    /// An `AccountSet` that changes nothing but carries the account.
    pub fn new(account: AccountId) -> Self {
        Self {
            common: CommonFields::new(account),
            set_flag: None,
            clear_flag: None,
            domain: None,
            transfer_rate: None,
        }
    }

    /// Sets the domain from plain text.
    pub fn with_domain(mut self, domain: &str) -> Self {
        self.domain = Some(hex::encode_upper(domain.to_ascii_lowercase()));
        self
    }

    pub(crate) fn push_fields(&self, out: &mut Vec<Field>) -> Result<(), CodecError> {
        self.common.push_fields(out)?;

        if let Some(flag) = self.set_flag {
            out.push(Field::new(&defs::SET_FLAG, FieldValue::UInt32(flag)));
        }
        if let Some(flag) = self.clear_flag {
            out.push(Field::new(&defs::CLEAR_FLAG, FieldValue::UInt32(flag)));
        }
        if let Some(domain) = &self.domain {
            out.push(Field::blob_hex(&defs::DOMAIN, domain)?);
        }
        if let Some(rate) = self.transfer_rate {
            out.push(Field::new(&defs::TRANSFER_RATE, FieldValue::UInt32(rate)));
        }
        Ok(())
    }
}
