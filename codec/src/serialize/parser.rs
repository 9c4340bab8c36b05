//! Binary parser.
//!
//! Reads a serialized record back into its ledger JSON form. The output
//! uses the same shapes the record types deserialize from, so a decoded
//! blob can be fed straight into [`crate::Transaction::from_json`].

use serde_json::{Map, Value};

use crate::address::AccountId;
use crate::config::{
    ACCOUNT_ID_LENGTH, ISSUED_AMOUNT_LENGTH, MAX_NESTING_DEPTH, NATIVE_AMOUNT_LENGTH,
};
use crate::error::CodecError;
use crate::serialize::amount::{decode_amount, is_issued};
use crate::serialize::field::{by_code, defs, FieldDef, TypeCode};
use crate::transaction::TransactionType;

/// Cursor over serialized bytes.
#[derive(Debug)]
pub struct BinaryParser<'a> {
    data: &'a [u8],
    pos: usize,
    /// Objects and arrays currently open below the top level.
    depth: usize,
}

impl<'a> BinaryParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            depth: 0,
        }
    }

    /// Returns `true` once every byte has been consumed.
    pub fn is_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn read(&mut self, n: usize, what: &'static str) -> Result<&'a [u8], CodecError> {
        if self.remaining() < n {
            return Err(CodecError::UnexpectedEnd(what));
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn read_u8(&mut self, what: &'static str) -> Result<u8, CodecError> {
        Ok(self.read(1, what)?[0])
    }

    fn peek_u8(&self, what: &'static str) -> Result<u8, CodecError> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or(CodecError::UnexpectedEnd(what))
    }

    fn enter(&mut self) -> Result<(), CodecError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(CodecError::Malformed(format!(
                "nesting deeper than {} levels",
                MAX_NESTING_DEPTH
            )));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Reads a field ID and resolves it against the field table.
    pub fn read_field_header(&mut self) -> Result<&'static FieldDef, CodecError> {
        let first = self.read_u8("field header")?;
        let mut type_code = first >> 4;
        let mut field_code = first & 0x0F;
        if type_code == 0 {
            type_code = self.read_u8("field type code")?;
        }
        if field_code == 0 {
            field_code = self.read_u8("field code")?;
        }
        by_code(type_code, field_code).ok_or(CodecError::UnknownField {
            type_code,
            field_code,
        })
    }

    /// Reads a variable-length prefix.
    pub fn read_vl_length(&mut self) -> Result<usize, CodecError> {
        let b1 = self.read_u8("length prefix")? as usize;
        match b1 {
            0..=192 => Ok(b1),
            193..=240 => {
                let b2 = self.read_u8("length prefix")? as usize;
                Ok(193 + (b1 - 193) * 256 + b2)
            }
            241..=254 => {
                let b2 = self.read_u8("length prefix")? as usize;
                let b3 = self.read_u8("length prefix")? as usize;
                Ok(12_481 + (b1 - 241) * 65_536 + b2 * 256 + b3)
            }
            _ => Err(CodecError::Malformed(format!(
                "invalid length prefix byte {:#04x}",
                b1
            ))),
        }
    }

    /// Reads the value of `def` as JSON.
    pub fn read_value(&mut self, def: &'static FieldDef) -> Result<Value, CodecError> {
        match def.type_code {
            TypeCode::UInt16 => {
                let bytes = self.read(2, def.name)?;
                let code = u16::from_be_bytes([bytes[0], bytes[1]]);
                if def == &defs::TRANSACTION_TYPE {
                    let tx_type = TransactionType::from_code(code).ok_or_else(|| {
                        CodecError::Malformed(format!("unsupported transaction type {}", code))
                    })?;
                    Ok(Value::String(tx_type.to_string()))
                } else {
                    Ok(Value::from(code))
                }
            }
            TypeCode::UInt32 => {
                let bytes = self.read(4, def.name)?;
                Ok(Value::from(u32::from_be_bytes([
                    bytes[0], bytes[1], bytes[2], bytes[3],
                ])))
            }
            TypeCode::Hash256 => Ok(Value::String(hex::encode_upper(self.read(32, def.name)?))),
            TypeCode::Amount => {
                let len = if is_issued(self.peek_u8(def.name)?) {
                    ISSUED_AMOUNT_LENGTH
                } else {
                    NATIVE_AMOUNT_LENGTH
                };
                let amount = decode_amount(self.read(len, def.name)?)?;
                Ok(serde_json::to_value(&amount)?)
            }
            TypeCode::Blob => {
                let len = self.read_vl_length()?;
                Ok(Value::String(hex::encode_upper(self.read(len, def.name)?)))
            }
            TypeCode::AccountId => {
                let len = self.read_vl_length()?;
                if len != ACCOUNT_ID_LENGTH {
                    return Err(CodecError::InvalidLength {
                        field: def.name,
                        expected: ACCOUNT_ID_LENGTH,
                        got: len,
                    });
                }
                let account = AccountId::from_slice(self.read(len, def.name)?)?;
                Ok(Value::String(account.to_classic()))
            }
            TypeCode::StObject => {
                self.enter()?;
                let object = self.read_object(true)?;
                self.leave();
                Ok(Value::Object(object))
            }
            TypeCode::StArray => {
                self.enter()?;
                let array = self.read_array()?;
                self.leave();
                Ok(array)
            }
        }
    }

    /// Reads fields until the end marker (`nested`) or the end of input.
    pub fn read_object(&mut self, nested: bool) -> Result<Map<String, Value>, CodecError> {
        let mut object = Map::new();
        loop {
            if self.is_end() {
                if nested {
                    return Err(CodecError::UnexpectedEnd("object end marker"));
                }
                break;
            }
            let def = self.read_field_header()?;
            if def == &defs::OBJECT_END_MARKER {
                if nested {
                    break;
                }
                return Err(CodecError::Malformed(
                    "object end marker at top level".to_string(),
                ));
            }
            if def == &defs::ARRAY_END_MARKER {
                return Err(CodecError::Malformed(
                    "array end marker outside an array".to_string(),
                ));
            }
            let value = self.read_value(def)?;
            object.insert(def.name.to_string(), value);
        }
        Ok(object)
    }

    fn read_array(&mut self) -> Result<Value, CodecError> {
        let mut entries = Vec::new();
        loop {
            if self.is_end() {
                return Err(CodecError::UnexpectedEnd("array end marker"));
            }
            let def = self.read_field_header()?;
            if def == &defs::ARRAY_END_MARKER {
                break;
            }
            if def.type_code != TypeCode::StObject || def == &defs::OBJECT_END_MARKER {
                return Err(CodecError::Malformed(format!(
                    "array entry {} is not an object",
                    def
                )));
            }
            self.enter()?;
            let entry = self.read_object(true)?;
            self.leave();
            let mut wrapper = Map::new();
            wrapper.insert(def.name.to_string(), Value::Object(entry));
            entries.push(Value::Object(wrapper));
        }
        Ok(Value::Array(entries))
    }
}

/// Decodes a complete top-level record.
pub fn decode_fields(bytes: &[u8]) -> Result<Value, CodecError> {
    let mut parser = BinaryParser::new(bytes);
    Ok(Value::Object(parser.read_object(false)?))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
