//! # Classic Addresses
//!
//! A classic address is the base58 rendering of a 20-byte account ID:
//!
//! ```text
//! account_id (20 bytes)
//!     -> 0x00 || account_id                    (version byte)
//!     -> || SHA-256(SHA-256(...))[..4]         (checksum)
//!     -> base58 with the ledger alphabet       -> r...
//! ```
//!
//! The ledger alphabet starts with `r`, so the zero version byte shows up as
//! the leading `r` every address carries.
//!
//! Public keys use the same scheme with their own version bytes: `0x23`
//! for account keys (`a...`) and `0x1C` for node keys (`n...`). In
//! transaction JSON they travel as hex.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{
    ACCOUNT_ID_LENGTH, ACCOUNT_ID_VERSION, ACCOUNT_PUBLIC_KEY_VERSION, CHECKSUM_LENGTH,
    ED25519_KEY_PREFIX, NODE_PUBLIC_KEY_VERSION, PUBLIC_KEY_LENGTH,
};
use crate::crypto::address_checksum;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while decoding a classic address or a public key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The string contains characters outside the ledger's base58 alphabet.
    #[error("base58 decode error: {0}")]
    Base58(String),

    /// The decoded payload has the wrong size.
    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Expected number of decoded bytes.
        expected: usize,
        /// Number of bytes actually decoded.
        got: usize,
    },

    /// The version byte is not the account-ID version.
    #[error("invalid version byte: expected {expected:#04x}, got {got:#04x}")]
    InvalidVersion {
        /// Version byte for account IDs.
        expected: u8,
        /// Version byte that was found.
        got: u8,
    },

    /// The trailing four bytes do not match the payload.
    #[error("checksum mismatch")]
    ChecksumMismatch,

    /// A hex-encoded key is not valid hex.
    #[error("invalid key hex: {0}")]
    InvalidHex(String),

    /// The first key byte names neither an Ed25519 nor a compressed
    /// secp256k1 key.
    #[error("unknown public key prefix {0:#04x}")]
    InvalidKeyPrefix(u8),
}

// ---------------------------------------------------------------------------
// Base58Check
// ---------------------------------------------------------------------------

fn encode_base58check(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len() + CHECKSUM_LENGTH);
    data.push(version);
    data.extend_from_slice(payload);
    let checksum = address_checksum(&data);
    data.extend_from_slice(&checksum);

    bs58::encode(data)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .into_string()
}

/// Decodes `version || payload || checksum` and returns the payload.
fn decode_base58check(
    encoded: &str,
    version: u8,
    payload_len: usize,
) -> Result<Vec<u8>, AddressError> {
    let decoded = bs58::decode(encoded)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .into_vec()
        .map_err(|e| AddressError::Base58(e.to_string()))?;

    let expected = 1 + payload_len + CHECKSUM_LENGTH;
    if decoded.len() != expected {
        return Err(AddressError::InvalidLength {
            expected,
            got: decoded.len(),
        });
    }
    if decoded[0] != version {
        return Err(AddressError::InvalidVersion {
            expected: version,
            got: decoded[0],
        });
    }

    let (data, checksum) = decoded.split_at(1 + payload_len);
    if address_checksum(data) != checksum {
        return Err(AddressError::ChecksumMismatch);
    }
    Ok(data[1..].to_vec())
}

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// A 20-byte ledger account identifier.
///
/// Serializes to and from its classic address in JSON; on the binary wire
/// it is the raw 20 bytes behind a length prefix.
///
/// # Examples
///
/// ```
/// use xrpl_codec::AccountId;
///
/// let account = AccountId::from_classic("rrrrrrrrrrrrrrrrrrrrrhoLvTp").unwrap();
/// assert_eq!(account.as_bytes(), &[0u8; 20]);
/// assert_eq!(account.to_classic(), "rrrrrrrrrrrrrrrrrrrrrhoLvTp");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId([u8; ACCOUNT_ID_LENGTH]);

impl AccountId {
    /// Wraps raw account-ID bytes.
    pub const fn from_bytes(bytes: [u8; ACCOUNT_ID_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Builds an account ID from a slice, checking its length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressError> {
        let array: [u8; ACCOUNT_ID_LENGTH] =
            bytes.try_into().map_err(|_| AddressError::InvalidLength {
                expected: ACCOUNT_ID_LENGTH,
                got: bytes.len(),
            })?;
        Ok(Self(array))
    }

    /// Decodes a classic `r...` address.
    ///
    /// Validates the alphabet, total length, version byte, and checksum.
    pub fn from_classic(address: &str) -> Result<Self, AddressError> {
        let payload = decode_base58check(address, ACCOUNT_ID_VERSION, ACCOUNT_ID_LENGTH)?;
        Self::from_slice(&payload)
    }

    /// Encodes this account ID as a classic address.
    pub fn to_classic(&self) -> String {
        encode_base58check(ACCOUNT_ID_VERSION, &self.0)
    }

    /// The raw 20 bytes.
    pub fn as_bytes(&self) -> &[u8; ACCOUNT_ID_LENGTH] {
        &self.0
    }
}

impl FromStr for AccountId {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_classic(s)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_classic())
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.to_classic())
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_classic())
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let address = String::deserialize(deserializer)?;
        Self::from_classic(&address).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// A 33-byte signing public key.
///
/// Ed25519 keys carry a leading `0xED`; secp256k1 keys are compressed
/// points starting with `0x02` or `0x03`. JSON uses upper-case hex, which
/// is also what `Display` and `FromStr` speak.
///
/// ```
/// use xrpl_codec::PublicKey;
///
/// let key: PublicKey = "EDC5248F3F06990D2E694C83AF55C45206ACD4AABC1151020600ECD6B75A5FF628"
///     .parse()
///     .unwrap();
/// assert!(key.is_ed25519());
/// assert_eq!(
///     key.to_account_base58(),
///     "aKGGGUyqTPjkgbKTs7BHrbhcxbQFSWbvXJwd7SinJPfTZ2FWcE9a"
/// );
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_LENGTH]);

impl PublicKey {
    /// Builds a key from raw bytes, checking length and prefix.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressError> {
        let array: [u8; PUBLIC_KEY_LENGTH] =
            bytes.try_into().map_err(|_| AddressError::InvalidLength {
                expected: PUBLIC_KEY_LENGTH,
                got: bytes.len(),
            })?;
        match array[0] {
            ED25519_KEY_PREFIX | 0x02 | 0x03 => Ok(Self(array)),
            other => Err(AddressError::InvalidKeyPrefix(other)),
        }
    }

    /// Parses 66 hex characters, either case.
    pub fn from_hex(key: &str) -> Result<Self, AddressError> {
        let bytes = hex::decode(key).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Upper-case hex, the form used in transaction JSON.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Decodes an account public key (`a...`).
    pub fn from_account_base58(encoded: &str) -> Result<Self, AddressError> {
        let payload = decode_base58check(encoded, ACCOUNT_PUBLIC_KEY_VERSION, PUBLIC_KEY_LENGTH)?;
        Self::from_slice(&payload)
    }

    /// Encodes as an account public key (`a...`).
    pub fn to_account_base58(&self) -> String {
        encode_base58check(ACCOUNT_PUBLIC_KEY_VERSION, &self.0)
    }

    /// Decodes a node or validation public key (`n...`).
    pub fn from_node_base58(encoded: &str) -> Result<Self, AddressError> {
        let payload = decode_base58check(encoded, NODE_PUBLIC_KEY_VERSION, PUBLIC_KEY_LENGTH)?;
        Self::from_slice(&payload)
    }

    /// Encodes as a node public key (`n...`).
    pub fn to_node_base58(&self) -> String {
        encode_base58check(NODE_PUBLIC_KEY_VERSION, &self.0)
    }

    pub fn is_ed25519(&self) -> bool {
        self.0[0] == ED25519_KEY_PREFIX
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }
}

impl FromStr for PublicKey {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Self::from_hex(&key).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "rU4Ai74ohgtUP8evP3qd2HuxWSFvLVt7uh";
    const SAMPLE_HEX: &str = "7CCFE86388B264396710C29F69025DB1DFA4AE4C";

    #[test]
    fn decodes_known_address() {
        let account = AccountId::from_classic(SAMPLE).unwrap();
        assert_eq!(hex::encode_upper(account.as_bytes()), SAMPLE_HEX);
    }

    #[test]
    fn encodes_back_to_same_string() {
        let account = AccountId::from_classic(SAMPLE).unwrap();
        assert_eq!(account.to_classic(), SAMPLE);
        assert_eq!(account.to_string(), SAMPLE);
    }

    #[test]
    fn special_accounts() {
        let zero = AccountId::from_bytes([0u8; 20]);
        assert_eq!(zero.to_classic(), "rrrrrrrrrrrrrrrrrrrrrhoLvTp");

        let mut one = [0u8; 20];
        one[19] = 1;
        assert_eq!(
            AccountId::from_bytes(one).to_classic(),
            "rrrrrrrrrrrrrrrrrrrrBZbvji"
        );
    }

    #[test]
    fn rejects_bad_checksum() {
        // Last character altered.
        let err = AccountId::from_classic("rU4Ai74ohgtUP8evP3qd2HuxWSFvLVt7ui").unwrap_err();
        assert!(matches!(
            err,
            AddressError::ChecksumMismatch | AddressError::InvalidLength { .. }
        ));
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        // '0' and 'l' are not part of the ledger alphabet.
        let err = AccountId::from_classic("r0lAi74ohgtUP8evP3qd2HuxWSFvLVt7uh").unwrap_err();
        assert!(matches!(err, AddressError::Base58(_)));
    }

    #[test]
    fn rejects_truncated_address() {
        let err = AccountId::from_classic("rU4Ai74ohgt").unwrap_err();
        assert!(matches!(err, AddressError::InvalidLength { .. }));
    }

    #[test]
    fn from_slice_checks_length() {
        assert!(AccountId::from_slice(&[1u8; 20]).is_ok());
        assert_eq!(
            AccountId::from_slice(&[1u8; 19]).unwrap_err(),
            AddressError::InvalidLength {
                expected: 20,
                got: 19
            }
        );
    }

    #[test]
    fn serde_uses_classic_form() {
        let account = AccountId::from_classic(SAMPLE).unwrap();
        let json = serde_json::to_string(&account).unwrap();
        assert_eq!(json, format!("\"{}\"", SAMPLE));
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, account);
    }

    #[test]
    fn serde_rejects_invalid_address() {
        assert!(serde_json::from_str::<AccountId>("\"not-an-address\"").is_err());
    }

    const SAMPLE_KEY: &str = "EDC5248F3F06990D2E694C83AF55C45206ACD4AABC1151020600ECD6B75A5FF628";

    #[test]
    fn public_key_base58_forms() {
        let key = PublicKey::from_hex(SAMPLE_KEY).unwrap();
        assert_eq!(
            key.to_account_base58(),
            "aKGGGUyqTPjkgbKTs7BHrbhcxbQFSWbvXJwd7SinJPfTZ2FWcE9a"
        );
        assert_eq!(
            key.to_node_base58(),
            "nHUiGnTYNKK8iyNnwARpS4QDDZrEb26qPUo5ZGRQ1pq7bGTWdBak"
        );
        assert_eq!(
            PublicKey::from_account_base58(&key.to_account_base58()).unwrap(),
            key
        );
        assert_eq!(PublicKey::from_node_base58(&key.to_node_base58()).unwrap(), key);
    }

    #[test]
    fn public_key_version_is_checked() {
        let key = PublicKey::from_hex(SAMPLE_KEY).unwrap();
        assert_eq!(
            PublicKey::from_account_base58(&key.to_node_base58()).unwrap_err(),
            AddressError::InvalidVersion {
                expected: 0x23,
                got: 0x1C
            }
        );
    }

    #[test]
    fn public_key_accepts_secp256k1_prefixes() {
        let mut bytes = [0u8; 33];
        bytes[0] = 0x02;
        let key = PublicKey::from_slice(&bytes).unwrap();
        assert!(!key.is_ed25519());
        assert_eq!(
            key.to_account_base58(),
            "aBMxWrnPUnvwZPfsmTyVizxEGsGheAu3Tsn6oPRgyjgvd2NggFxz"
        );
    }

    #[test]
    fn public_key_rejects_bad_input() {
        assert!(matches!(
            PublicKey::from_hex("not hex"),
            Err(AddressError::InvalidHex(_))
        ));
        assert_eq!(
            PublicKey::from_hex("ED01").unwrap_err(),
            AddressError::InvalidLength {
                expected: 33,
                got: 2
            }
        );
        assert_eq!(
            PublicKey::from_slice(&[0x04; 33]).unwrap_err(),
            AddressError::InvalidKeyPrefix(0x04)
        );
    }

    #[test]
    fn public_key_serde_is_upper_hex() {
        let key: PublicKey =
            serde_json::from_str(&format!("\"{}\"", SAMPLE_KEY.to_lowercase())).unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), format!("\"{}\"", SAMPLE_KEY));
    }
}
