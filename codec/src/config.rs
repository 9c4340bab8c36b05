//! # Protocol Constants
//!
//! Every magic number the codec depends on lives here. These values are
//! fixed by the ledger protocol; changing any of them produces blobs no
//! validator will accept.

// ---------------------------------------------------------------------------
// Hash Prefixes
// ---------------------------------------------------------------------------

/// Prefix for single-signature signing data: "STX\0".
pub const HASH_PREFIX_TRANSACTION_SIGN: [u8; 4] = [0x53, 0x54, 0x58, 0x00];

/// Prefix for multi-signature signing data: "SMT\0".
pub const HASH_PREFIX_TRANSACTION_MULTISIGN: [u8; 4] = [0x53, 0x4D, 0x54, 0x00];

/// Prefix hashed in front of a fully serialized transaction to derive its
/// ID: "TXN\0".
pub const HASH_PREFIX_TRANSACTION_ID: [u8; 4] = [0x54, 0x58, 0x4E, 0x00];

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// Account IDs are RIPEMD-160 sized.
pub const ACCOUNT_ID_LENGTH: usize = 20;

/// Version byte prepended to an account ID before base58 encoding. It is
/// what makes every classic address start with `r`.
pub const ACCOUNT_ID_VERSION: u8 = 0x00;

/// Trailing checksum bytes: the head of SHA-256(SHA-256(payload)).
pub const CHECKSUM_LENGTH: usize = 4;

/// Compressed secp256k1 and prefixed Ed25519 keys are both 33 bytes.
pub const PUBLIC_KEY_LENGTH: usize = 33;

/// First byte of every Ed25519 public key.
pub const ED25519_KEY_PREFIX: u8 = 0xED;

/// Version byte of an account public key (`a...`).
pub const ACCOUNT_PUBLIC_KEY_VERSION: u8 = 0x23;

/// Version byte of a node public key (`n...`).
pub const NODE_PUBLIC_KEY_VERSION: u8 = 0x1C;

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Objects and arrays the binary parser will open inside one another.
/// Transactions need two (`Memos` holding `Memo`).
pub const MAX_NESTING_DEPTH: usize = 10;

// ---------------------------------------------------------------------------
// Amounts
// ---------------------------------------------------------------------------

/// 100 billion XRP expressed in drops. No native amount may exceed it.
pub const MAX_DROPS: u64 = 100_000_000_000_000_000;

/// Drops per XRP.
pub const DROPS_PER_XRP: u64 = 1_000_000;

/// Smallest normalized issued-amount mantissa (10^15).
pub const MIN_IOU_MANTISSA: u64 = 1_000_000_000_000_000;

/// Largest normalized issued-amount mantissa (10^16 - 1).
pub const MAX_IOU_MANTISSA: u64 = 9_999_999_999_999_999;

/// Exponent bounds after normalization.
pub const MIN_IOU_EXPONENT: i32 = -96;
pub const MAX_IOU_EXPONENT: i32 = 80;

/// Issued amounts carry at most 16 significant decimal digits.
pub const MAX_IOU_PRECISION: usize = 16;

/// Bias added to the exponent before it is packed into 8 bits.
pub const IOU_EXPONENT_BIAS: i32 = 97;

/// High bit: set for issued amounts, clear for native ones.
pub const AMOUNT_ISSUED_BIT: u64 = 0x8000_0000_0000_0000;

/// Second bit: set when the amount is positive.
pub const AMOUNT_POSITIVE_BIT: u64 = 0x4000_0000_0000_0000;

/// Mantissa mask for issued values (54 bits).
pub const IOU_MANTISSA_MASK: u64 = (1 << 54) - 1;

/// Serialized issued amount: value, currency, issuer.
pub const ISSUED_AMOUNT_LENGTH: usize = 48;

/// Serialized native amount.
pub const NATIVE_AMOUNT_LENGTH: usize = 8;

/// Currency codes are 160 bits on the wire.
pub const CURRENCY_CODE_LENGTH: usize = 20;

// ---------------------------------------------------------------------------
// Variable-length prefixes
// ---------------------------------------------------------------------------

/// Longest payload whose length fits in a single prefix byte.
pub const VL_ONE_BYTE_MAX: usize = 192;

/// Longest payload for a two-byte prefix.
pub const VL_TWO_BYTE_MAX: usize = 12_480;

/// Longest payload the format can describe at all.
pub const VL_THREE_BYTE_MAX: usize = 918_744;

// ---------------------------------------------------------------------------
// Transaction Flags
// ---------------------------------------------------------------------------

/// Flag bits accepted in the `Flags` field.
pub mod flags {
    /// Require a fully-canonical signature. Legacy, but still commonly set.
    pub const TF_FULLY_CANONICAL_SIG: u32 = 0x8000_0000;

    /// Payment: do not use the default path.
    pub const TF_NO_RIPPLE_DIRECT: u32 = 0x0001_0000;

    /// Payment: deliver less than `Amount` rather than fail.
    pub const TF_PARTIAL_PAYMENT: u32 = 0x0002_0000;

    /// Payment: only take paths with at least the `Amount`/`SendMax` quality.
    pub const TF_LIMIT_QUALITY: u32 = 0x0004_0000;
}
