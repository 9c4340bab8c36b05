//! Error types for the codec.
//!
//! Every fallible operation in the crate returns a [`CodecError`]. Address
//! problems keep their own [`AddressError`](crate::address::AddressError)
//! and are wrapped here.

use thiserror::Error;

use crate::address::AddressError;

/// Errors raised while building, encoding, or decoding a transaction.
#[derive(Debug, Error)]
pub enum CodecError {
    /// An account field does not hold a valid classic address, or a key
    /// field does not hold a valid public key.
    #[error("invalid address or key: {0}")]
    Address(#[from] AddressError),

    /// An amount cannot be represented on the ledger.
    #[error("invalid amount {value:?}: {reason}")]
    InvalidAmount {
        /// The offending value as written.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A currency code is neither a three-character code nor 40 hex chars.
    #[error("invalid currency code {0:?}")]
    InvalidCurrency(String),

    /// A blob or hash field holds something other than hex.
    #[error("field {field} is not valid hex: {source}")]
    InvalidHex {
        /// Name of the field.
        field: &'static str,
        /// Underlying decode failure.
        #[source]
        source: hex::FromHexError,
    },

    /// A fixed-width field has the wrong number of bytes.
    #[error("field {field} must be {expected} bytes, got {got}")]
    InvalidLength {
        /// Name of the field.
        field: &'static str,
        /// Required width.
        expected: usize,
        /// Actual width.
        got: usize,
    },

    /// A variable-length field is longer than the prefix can describe.
    #[error("{len} bytes exceeds the variable-length limit of {max}")]
    LengthOverflow {
        /// Payload length.
        len: usize,
        /// Largest encodable length.
        max: usize,
    },

    /// A required field was never set.
    #[error("missing required field {0}")]
    MissingField(&'static str),

    /// A JSON record carries a key the codec cannot encode.
    #[error("field {0} is not supported")]
    UnsupportedField(String),

    /// The binary input names a field the codec does not know.
    #[error("unknown field (type code {type_code}, field code {field_code})")]
    UnknownField {
        /// Type code read from the header.
        type_code: u8,
        /// Field code read from the header.
        field_code: u8,
    },

    /// The binary input ended in the middle of a value.
    #[error("unexpected end of input while reading {0}")]
    UnexpectedEnd(&'static str),

    /// The binary input is structurally wrong.
    #[error("malformed binary: {0}")]
    Malformed(String),

    /// The top-level hex string could not be decoded.
    #[error("invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),

    /// A JSON transaction could not be parsed.
    #[error("invalid transaction JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodecError {
    pub(crate) fn amount(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            value: value.into(),
            reason: reason.into(),
        }
    }
}
