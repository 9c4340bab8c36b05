//! Binary serializer.
//!
//! Writes fields in canonical order. The caller hands over fields in any
//! order; [`BinarySerializer::write_object`] filters and sorts them before
//! anything is written, so two records with the same content always
//! produce the same bytes.

use crate::config::{ACCOUNT_ID_LENGTH, VL_ONE_BYTE_MAX, VL_THREE_BYTE_MAX, VL_TWO_BYTE_MAX};
use crate::error::CodecError;
use crate::serialize::amount::encode_amount;
use crate::serialize::field::{defs, Field, FieldValue, TypeCode};

/// Which fields of a record get written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFilter {
    /// Every serialized field.
    All,
    /// Only fields covered by a signature.
    SigningOnly,
}

impl FieldFilter {
    fn admits(self, field: &Field) -> bool {
        field.def.is_serialized
            && match self {
                Self::All => true,
                Self::SigningOnly => field.def.is_signing_field,
            }
    }
}

/// Accumulates the canonical byte form of a record.
#[derive(Debug, Default)]
pub struct BinarySerializer {
    buf: Vec<u8>,
}

impl BinarySerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the output with a hash prefix.
    pub fn with_prefix(prefix: &[u8]) -> Self {
        Self {
            buf: prefix.to_vec(),
        }
    }

    /// Appends bytes verbatim.
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Appends a variable-length prefix for `len` bytes.
    pub fn write_vl_length(&mut self, len: usize) -> Result<(), CodecError> {
        let prefix = encode_vl_length(len)?;
        self.write_raw(&prefix);
        Ok(())
    }

    /// Writes the admitted fields sorted by `(type code, nth)`.
    ///
    /// No end marker is written: the top-level object has none, and
    /// nested objects get theirs from [`Self::write_field`].
    pub fn write_object(&mut self, fields: &[Field], filter: FieldFilter) -> Result<(), CodecError> {
        let mut ordered: Vec<&Field> = fields.iter().filter(|f| filter.admits(f)).collect();
        ordered.sort_by_key(|f| f.def.ordinal());

        for field in ordered {
            self.write_field(field, filter)?;
        }
        Ok(())
    }

    /// Writes one field: header, then value.
    pub fn write_field(&mut self, field: &Field, filter: FieldFilter) -> Result<(), CodecError> {
        check_type(field)?;
        self.write_raw(&field.def.header());

        match &field.value {
            FieldValue::UInt16(v) => self.write_raw(&v.to_be_bytes()),
            FieldValue::UInt32(v) => self.write_raw(&v.to_be_bytes()),
            FieldValue::Hash256(hash) => self.write_raw(hash),
            FieldValue::Amount(amount) => self.write_raw(&encode_amount(amount)?),
            FieldValue::Blob(bytes) => {
                self.write_vl_length(bytes.len())?;
                self.write_raw(bytes);
            }
            FieldValue::AccountId(account) => {
                self.write_vl_length(ACCOUNT_ID_LENGTH)?;
                self.write_raw(account.as_bytes());
            }
            FieldValue::Object(inner) => {
                self.write_object(inner, filter)?;
                self.write_raw(&defs::OBJECT_END_MARKER.header());
            }
            FieldValue::Array(entries) => {
                for entry in entries.iter().filter(|e| filter.admits(e)) {
                    self.write_field(entry, filter)?;
                }
                self.write_raw(&defs::ARRAY_END_MARKER.header());
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

fn check_type(field: &Field) -> Result<(), CodecError> {
    let actual = match field.value {
        FieldValue::UInt16(_) => TypeCode::UInt16,
        FieldValue::UInt32(_) => TypeCode::UInt32,
        FieldValue::Hash256(_) => TypeCode::Hash256,
        FieldValue::Amount(_) => TypeCode::Amount,
        FieldValue::Blob(_) => TypeCode::Blob,
        FieldValue::AccountId(_) => TypeCode::AccountId,
        FieldValue::Object(_) => TypeCode::StObject,
        FieldValue::Array(_) => TypeCode::StArray,
    };
    if actual != field.def.type_code {
        return Err(CodecError::Malformed(format!(
            "{} expects {:?}, got {:?}",
            field.def, field.def.type_code, actual
        )));
    }
    Ok(())
}

/// Variable-length prefix for a payload of `len` bytes.
///
/// ```text
/// 0 ..= 192          [len]
/// 193 ..= 12480      [193 + (len-193) >> 8, (len-193) & 0xff]
/// 12481 ..= 918744   [241 + (len-12481) >> 16, ..., ...]
/// ```
pub fn encode_vl_length(len: usize) -> Result<Vec<u8>, CodecError> {
    if len <= VL_ONE_BYTE_MAX {
        Ok(vec![len as u8])
    } else if len <= VL_TWO_BYTE_MAX {
        let rest = len - (VL_ONE_BYTE_MAX + 1);
        Ok(vec![193 + (rest >> 8) as u8, (rest & 0xff) as u8])
    } else if len <= VL_THREE_BYTE_MAX {
        let rest = len - (VL_TWO_BYTE_MAX + 1);
        Ok(vec![
            241 + (rest >> 16) as u8,
            ((rest >> 8) & 0xff) as u8,
            (rest & 0xff) as u8,
        ])
    } else {
        Err(CodecError::LengthOverflow {
            len,
            max: VL_THREE_BYTE_MAX,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
