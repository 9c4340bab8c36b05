//! # Binary Serialization
//!
//! ```text
//! field.rs      — Field table: type codes, field codes, headers, ordering
//! amount.rs     — Native and issued amount encoding
//! serializer.rs — Canonical writer and length prefixes
//! parser.rs     — Reader back to ledger JSON
//! ```

pub mod amount;
pub mod field;
pub mod parser;
pub mod serializer;

pub use field::{Field, FieldDef, FieldValue, TypeCode};
pub use parser::{decode_fields, BinaryParser};
pub use serializer::{encode_vl_length, BinarySerializer, FieldFilter};
