//! # Hashing Primitives
//!
//! The codec needs exactly two digests: double SHA-256 for address
//! checksums and SHA-512Half for signing hashes and transaction IDs. Both
//! are thin wrappers around the `sha2` crate.

pub mod hash;

pub use hash::{address_checksum, double_sha256, sha256, sha512_half};
