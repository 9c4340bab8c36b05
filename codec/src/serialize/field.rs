//! The field table.
//!
//! Each wire field is identified by its type code and its field code
//! ("nth"). Together they decide both the header bytes and the canonical
//! order: fields are written sorted by `(type code, nth)`.

use std::fmt;

use crate::address::AccountId;
use crate::error::CodecError;
use crate::transaction::CurrencyAmount;

// ---------------------------------------------------------------------------
// TypeCode
// ---------------------------------------------------------------------------

/// Serialized type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TypeCode {
    UInt16 = 1,
    UInt32 = 2,
    Hash256 = 5,
    Amount = 6,
    Blob = 7,
    AccountId = 8,
    StObject = 14,
    StArray = 15,
}

impl TypeCode {
    /// The numeric type code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Maps a numeric code back to a known type.
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            1 => Self::UInt16,
            2 => Self::UInt32,
            5 => Self::Hash256,
            6 => Self::Amount,
            7 => Self::Blob,
            8 => Self::AccountId,
            14 => Self::StObject,
            15 => Self::StArray,
            _ => return None,
        })
    }
}

// ---------------------------------------------------------------------------
// FieldDef
// ---------------------------------------------------------------------------

/// Static description of one field.
#[derive(Debug, PartialEq, Eq)]
pub struct FieldDef {
    /// Ledger JSON name.
    pub name: &'static str,
    /// Serialized type.
    pub type_code: TypeCode,
    /// Field code within the type.
    pub nth: u8,
    /// Whether the value carries a length prefix.
    pub is_vl_encoded: bool,
    /// Whether the field is written at all.
    pub is_serialized: bool,
    /// Whether the field is part of the data that gets signed.
    pub is_signing_field: bool,
}

impl FieldDef {
    const fn new(name: &'static str, type_code: TypeCode, nth: u8) -> Self {
        Self {
            name,
            type_code,
            nth,
            is_vl_encoded: matches!(type_code, TypeCode::Blob | TypeCode::AccountId),
            is_serialized: true,
            is_signing_field: true,
        }
    }

    const fn not_signed(mut self) -> Self {
        self.is_signing_field = false;
        self
    }

    /// Sort key for canonical ordering.
    pub fn ordinal(&self) -> (u8, u8) {
        (self.type_code.code(), self.nth)
    }

    /// The field ID bytes written before the value.
    ///
    /// ```text
    /// type < 16, nth < 16   ->  [type << 4 | nth]
    /// type >= 16, nth < 16  ->  [nth, type]
    /// type < 16, nth >= 16  ->  [type << 4, nth]
    /// both >= 16            ->  [0, type, nth]
    /// ```
    pub fn header(&self) -> Vec<u8> {
        let type_code = self.type_code.code();
        match (type_code >= 16, self.nth >= 16) {
            (false, false) => vec![type_code << 4 | self.nth],
            (true, false) => vec![self.nth, type_code],
            (false, true) => vec![type_code << 4, self.nth],
            (true, true) => vec![0, type_code, self.nth],
        }
    }
}

impl fmt::Display for FieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Definitions of every field the codec reads or writes.
pub mod defs {
    use super::{FieldDef, TypeCode};

    pub static TRANSACTION_TYPE: FieldDef = FieldDef::new("TransactionType", TypeCode::UInt16, 2);

    pub static FLAGS: FieldDef = FieldDef::new("Flags", TypeCode::UInt32, 2);
    pub static SOURCE_TAG: FieldDef = FieldDef::new("SourceTag", TypeCode::UInt32, 3);
    pub static SEQUENCE: FieldDef = FieldDef::new("Sequence", TypeCode::UInt32, 4);
    pub static TRANSFER_RATE: FieldDef = FieldDef::new("TransferRate", TypeCode::UInt32, 11);
    pub static DESTINATION_TAG: FieldDef = FieldDef::new("DestinationTag", TypeCode::UInt32, 14);
    pub static LAST_LEDGER_SEQUENCE: FieldDef =
        FieldDef::new("LastLedgerSequence", TypeCode::UInt32, 27);
    pub static SET_FLAG: FieldDef = FieldDef::new("SetFlag", TypeCode::UInt32, 33);
    pub static CLEAR_FLAG: FieldDef = FieldDef::new("ClearFlag", TypeCode::UInt32, 34);

    pub static INVOICE_ID: FieldDef = FieldDef::new("InvoiceID", TypeCode::Hash256, 17);

    pub static AMOUNT: FieldDef = FieldDef::new("Amount", TypeCode::Amount, 1);
    pub static FEE: FieldDef = FieldDef::new("Fee", TypeCode::Amount, 8);
    pub static SEND_MAX: FieldDef = FieldDef::new("SendMax", TypeCode::Amount, 9);
    pub static DELIVER_MIN: FieldDef = FieldDef::new("DeliverMin", TypeCode::Amount, 10);

    pub static SIGNING_PUB_KEY: FieldDef = FieldDef::new("SigningPubKey", TypeCode::Blob, 3);
    pub static TXN_SIGNATURE: FieldDef =
        FieldDef::new("TxnSignature", TypeCode::Blob, 4).not_signed();
    pub static DOMAIN: FieldDef = FieldDef::new("Domain", TypeCode::Blob, 7);
    pub static MEMO_TYPE: FieldDef = FieldDef::new("MemoType", TypeCode::Blob, 12);
    pub static MEMO_DATA: FieldDef = FieldDef::new("MemoData", TypeCode::Blob, 13);
    pub static MEMO_FORMAT: FieldDef = FieldDef::new("MemoFormat", TypeCode::Blob, 14);

    pub static ACCOUNT: FieldDef = FieldDef::new("Account", TypeCode::AccountId, 1);
    pub static DESTINATION: FieldDef = FieldDef::new("Destination", TypeCode::AccountId, 3);

    pub static OBJECT_END_MARKER: FieldDef =
        FieldDef::new("ObjectEndMarker", TypeCode::StObject, 1);
    pub static MEMO: FieldDef = FieldDef::new("Memo", TypeCode::StObject, 10);

    pub static ARRAY_END_MARKER: FieldDef = FieldDef::new("ArrayEndMarker", TypeCode::StArray, 1);
    pub static MEMOS: FieldDef = FieldDef::new("Memos", TypeCode::StArray, 9);

    /// Every definition, end markers included.
    pub static ALL: &[&FieldDef] = &[
        &TRANSACTION_TYPE,
        &FLAGS,
        &SOURCE_TAG,
        &SEQUENCE,
        &TRANSFER_RATE,
        &DESTINATION_TAG,
        &LAST_LEDGER_SEQUENCE,
        &SET_FLAG,
        &CLEAR_FLAG,
        &INVOICE_ID,
        &AMOUNT,
        &FEE,
        &SEND_MAX,
        &DELIVER_MIN,
        &SIGNING_PUB_KEY,
        &TXN_SIGNATURE,
        &DOMAIN,
        &MEMO_TYPE,
        &MEMO_DATA,
        &MEMO_FORMAT,
        &ACCOUNT,
        &DESTINATION,
        &OBJECT_END_MARKER,
        &MEMO,
        &ARRAY_END_MARKER,
        &MEMOS,
    ];
}

/// Looks a definition up by its JSON name.
pub fn by_name(name: &str) -> Option<&'static FieldDef> {
    defs::ALL.iter().copied().find(|def| def.name == name)
}

/// Looks a definition up by its type and field codes.
pub fn by_code(type_code: u8, nth: u8) -> Option<&'static FieldDef> {
    defs::ALL
        .iter()
        .copied()
        .find(|def| def.type_code.code() == type_code && def.nth == nth)
}

// ---------------------------------------------------------------------------
// Field values
// ---------------------------------------------------------------------------

/// A value ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    UInt16(u16),
    UInt32(u32),
    Hash256([u8; 32]),
    Amount(CurrencyAmount),
    Blob(Vec<u8>),
    AccountId(AccountId),
    /// Inner object: its own fields, closed by an end marker.
    Object(Vec<Field>),
    /// Array of wrapped objects, closed by an end marker.
    Array(Vec<Field>),
}

/// A definition paired with its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub def: &'static FieldDef,
    pub value: FieldValue,
}

impl Field {
    pub fn new(def: &'static FieldDef, value: FieldValue) -> Self {
        Self { def, value }
    }

    /// A blob field from a hex string.
    pub fn blob_hex(def: &'static FieldDef, hex_value: &str) -> Result<Self, CodecError> {
        let bytes = hex::decode(hex_value).map_err(|source| CodecError::InvalidHex {
            field: def.name,
            source,
        })?;
        Ok(Self::new(def, FieldValue::Blob(bytes)))
    }

    /// A 256-bit hash field from 64 hex characters.
    pub fn hash256_hex(def: &'static FieldDef, hex_value: &str) -> Result<Self, CodecError> {
        let bytes = hex::decode(hex_value).map_err(|source| CodecError::InvalidHex {
            field: def.name,
            source,
        })?;
        let hash: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| CodecError::InvalidLength {
                field: def.name,
                expected: 32,
                got: bytes.len(),
            })?;
        Ok(Self::new(def, FieldValue::Hash256(hash)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
