//! # Hashing Utilities
//!
//! - **SHA-256** — Applied twice to derive the 4-byte checksum appended to
//!   every base58 address.
//! - **SHA-512Half** — The ledger's general-purpose hash: SHA-512 truncated
//!   to its first 32 bytes. Signing hashes and transaction IDs use it.

use sha2::{Digest, Sha256, Sha512};

use crate::config::CHECKSUM_LENGTH;

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use xrpl_codec::crypto::sha256;
///
/// let hash = sha256(b"ledger");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute `SHA-256(SHA-256(data))`.
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Compute SHA-512Half: the first 32 bytes of `SHA-512(data)`.
///
/// # Example
///
/// ```
/// use xrpl_codec::crypto::sha512_half;
///
/// let digest = sha512_half(b"abc");
/// assert_eq!(hex::encode(digest), "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a");
/// ```
pub fn sha512_half(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha512::new();
    hasher.update(data);
    let full = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&full[..32]);
    output
}

/// The checksum appended to a versioned address payload before base58
/// encoding.
pub fn address_checksum(versioned_payload: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let digest = double_sha256(versioned_payload);
    let mut checksum = [0u8; CHECKSUM_LENGTH];
    checksum.copy_from_slice(&digest[..CHECKSUM_LENGTH]);
    checksum
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
