// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # XRPL Codec — Canonical Transaction Serialization
//!
//! Builds XRP Ledger transaction records and turns them into the exact byte
//! sequence the ledger signs, hashes, and stores. Nothing here talks to a
//! network or touches key material: a record goes in, hex comes out.
//!
//! ## Architecture
//!
//! - **address** — Classic `r...` addresses to and from 20-byte account IDs,
//!   and typed signing public keys.
//! - **transaction** — Typed records (`Payment`, `AccountSet`), amounts,
//!   currency codes, memos, and the builder.
//! - **serialize** — Field table, amount codec, binary serializer and parser.
//! - **codec** — The public entry points: `encode`, `encode_for_signing`,
//!   `encode_for_multisigning`, hashes, and `decode`.
//! - **preview** — The before/after signing-blob preview of a payment.
//! - **crypto** — SHA-256 checksums and SHA-512Half.
//! - **config** — Hash prefixes, amount limits, transaction flags.
//!
//! ## Quick start
//!
//! ```
//! use xrpl_codec::{encode_for_signing, sample_payment};
//!
//! let tx = sample_payment().unwrap();
//! let blob = encode_for_signing(&tx).unwrap();
//! assert!(blob.starts_with("53545800"));
//! ```

pub mod address;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod preview;
pub mod serialize;
pub mod transaction;

pub use address::{AccountId, AddressError, PublicKey};
pub use codec::{
    decode, encode, encode_for_multisigning, encode_for_signing, signing_hash, transaction_id,
};
pub use error::CodecError;
pub use preview::{preview, sample_payment, SigningPreview};
pub use transaction::{
    AccountSet, CommonFields, CurrencyAmount, CurrencyCode, IssuedAmount, Memo, Payment,
    PaymentBuilder, Transaction, TransactionType,
};
