//! Core value types shared by every transaction record.
//!
//! Amounts, currency codes, and memos are plain data: constructing one does
//! not validate its numeric range. Range and precision checks happen when
//! the value is encoded, so a record can always be built, inspected, and
//! printed even if the ledger would reject it.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::address::AccountId;
use crate::config::{CURRENCY_CODE_LENGTH, DROPS_PER_XRP};
use crate::error::CodecError;

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

/// Discriminator carried in the `TransactionType` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Value transfer, native or issued.
    Payment,
    /// Account settings change.
    AccountSet,
}

impl TransactionType {
    /// The 16-bit code written on the wire.
    pub fn code(self) -> u16 {
        match self {
            Self::Payment => 0,
            Self::AccountSet => 3,
        }
    }

    /// Maps a wire code back to a type, if known.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(Self::Payment),
            3 => Some(Self::AccountSet),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Payment => write!(f, "Payment"),
            Self::AccountSet => write!(f, "AccountSet"),
        }
    }
}

// ---------------------------------------------------------------------------
// CurrencyCode
// ---------------------------------------------------------------------------

/// Characters allowed in a standard three-character code besides ASCII
/// letters and digits.
const CURRENCY_SYMBOLS: &str = "?!@#$%^&*<>(){}[]|";

/// Byte offset of the ASCII code inside the 20-byte standard layout.
const STANDARD_CODE_OFFSET: usize = 12;

/// Identifier of an issued currency.
///
/// Standard codes are three printable ASCII characters (`"USD"`). Anything
/// else is a 160-bit non-standard code written as 40 hex characters.
/// `"XRP"` is never valid here: the native asset has no issuer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CurrencyCode {
    /// Three-character code such as `USD`.
    Standard([u8; 3]),
    /// Raw 160-bit code.
    NonStandard([u8; CURRENCY_CODE_LENGTH]),
}

impl CurrencyCode {
    /// The 20-byte wire representation.
    ///
    /// Standard codes sit at bytes 12..15 with every other byte zero.
    pub fn to_bytes(&self) -> [u8; CURRENCY_CODE_LENGTH] {
        match self {
            Self::Standard(code) => {
                let mut bytes = [0u8; CURRENCY_CODE_LENGTH];
                bytes[STANDARD_CODE_OFFSET..STANDARD_CODE_OFFSET + 3].copy_from_slice(code);
                bytes
            }
            Self::NonStandard(bytes) => *bytes,
        }
    }

    /// Interprets 20 wire bytes, recognizing the standard layout.
    pub fn from_bytes(bytes: [u8; CURRENCY_CODE_LENGTH]) -> Result<Self, CodecError> {
        if bytes == [0u8; CURRENCY_CODE_LENGTH] {
            return Err(CodecError::InvalidCurrency(
                "all-zero code is reserved for XRP".to_string(),
            ));
        }

        let code = &bytes[STANDARD_CODE_OFFSET..STANDARD_CODE_OFFSET + 3];
        let padding_is_zero = bytes
            .iter()
            .enumerate()
            .filter(|(i, _)| !(STANDARD_CODE_OFFSET..STANDARD_CODE_OFFSET + 3).contains(i))
            .all(|(_, b)| *b == 0);

        if padding_is_zero && code.iter().all(|b| is_standard_char(*b as char)) {
            if code == b"XRP" {
                return Err(CodecError::InvalidCurrency(
                    "XRP cannot be an issued currency".to_string(),
                ));
            }
            let mut standard = [0u8; 3];
            standard.copy_from_slice(code);
            Ok(Self::Standard(standard))
        } else {
            Ok(Self::NonStandard(bytes))
        }
    }
}

fn is_standard_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || CURRENCY_SYMBOLS.contains(c)
}

impl FromStr for CurrencyCode {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 3 && s.chars().all(is_standard_char) {
            if s == "XRP" {
                return Err(CodecError::InvalidCurrency(s.to_string()));
            }
            let mut code = [0u8; 3];
            code.copy_from_slice(s.as_bytes());
            return Ok(Self::Standard(code));
        }

        if s.len() == CURRENCY_CODE_LENGTH * 2 {
            let raw = hex::decode(s).map_err(|_| CodecError::InvalidCurrency(s.to_string()))?;
            let mut bytes = [0u8; CURRENCY_CODE_LENGTH];
            bytes.copy_from_slice(&raw);
            return Self::from_bytes(bytes);
        }

        Err(CodecError::InvalidCurrency(s.to_string()))
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard(code) => code.iter().try_for_each(|b| write!(f, "{}", *b as char)),
            Self::NonStandard(bytes) => write!(f, "{}", hex::encode_upper(bytes)),
        }
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Amounts
// ---------------------------------------------------------------------------

/// A value denominated in an issued currency.
///
/// `value` is kept exactly as written (`"10"`, `"1.50"`, `"1e-3"`) so the
/// record round-trips through construction and JSON untouched. It is
/// parsed and normalized only when the amount is encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IssuedAmount {
    /// Currency code.
    pub currency: CurrencyCode,
    /// Decimal value as a string.
    pub value: String,
    /// Account that issues the currency.
    pub issuer: AccountId,
}

impl IssuedAmount {
    /// Creates an issued amount from already-typed parts.
    pub fn new(currency: CurrencyCode, value: impl Into<String>, issuer: AccountId) -> Self {
        Self {
            currency,
            value: value.into(),
            issuer,
        }
    }

    /// Parses the currency code and issuer address from strings.
    ///
    /// ```
    /// use xrpl_codec::IssuedAmount;
    ///
    /// let usd = IssuedAmount::parse("USD", "10", "rf1BiGeXwwQoi8Z2ueFYTEXSwuJYfV2Jpn").unwrap();
    /// assert_eq!(usd.currency.to_string(), "USD");
    /// assert_eq!(usd.value, "10");
    /// ```
    pub fn parse(currency: &str, value: &str, issuer: &str) -> Result<Self, CodecError> {
        Ok(Self::new(currency.parse()?, value, AccountId::from_classic(issuer)?))
    }
}

/// Either a native amount in drops or an issued-currency amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencyAmount {
    /// Native asset, in drops.
    Xrp(u64),
    /// Issued currency.
    Issued(IssuedAmount),
}

impl CurrencyAmount {
    /// A native amount in drops.
    pub fn drops(drops: u64) -> Self {
        Self::Xrp(drops)
    }

    /// A native amount in whole XRP. Saturates rather than overflowing.
    pub fn xrp(xrp: u64) -> Self {
        Self::Xrp(xrp.saturating_mul(DROPS_PER_XRP))
    }

    /// An issued amount.
    pub fn issued(amount: IssuedAmount) -> Self {
        Self::Issued(amount)
    }

    /// Returns `true` for native amounts.
    pub fn is_native(&self) -> bool {
        matches!(self, Self::Xrp(_))
    }
}

impl From<IssuedAmount> for CurrencyAmount {
    fn from(amount: IssuedAmount) -> Self {
        Self::Issued(amount)
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xrp(drops) => write!(f, "{} drops", drops),
            Self::Issued(amount) => {
                write!(f, "{} {}/{}", amount.value, amount.currency, amount.issuer)
            }
        }
    }
}

impl Serialize for CurrencyAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Native amounts travel as strings so large values survive
            // JSON parsers that read numbers as doubles.
            Self::Xrp(drops) => serializer.collect_str(drops),
            Self::Issued(amount) => amount.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for CurrencyAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Drops(String),
            Issued(IssuedAmount),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Drops(drops) => drops
                .parse::<u64>()
                .map(Self::Xrp)
                .map_err(|_| de::Error::custom(format!("invalid drops amount {:?}", drops))),
            Repr::Issued(amount) => Ok(Self::Issued(amount)),
        }
    }
}

// ---------------------------------------------------------------------------
// Memo
// ---------------------------------------------------------------------------

/// Arbitrary data attached to a transaction. Every part is hex.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct Memo {
    /// Kind of memo, conventionally a hex-encoded MIME-like type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_type: Option<String>,
    /// Memo content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_data: Option<String>,
    /// Encoding of the content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo_format: Option<String>,
}

impl Memo {
    /// Builds a memo from UTF-8 text, hex-encoding both parts.
    pub fn text(memo_type: &str, data: &str) -> Self {
        Self {
            memo_type: Some(hex::encode_upper(memo_type)),
            memo_data: Some(hex::encode_upper(data)),
            memo_format: None,
        }
    }
}

/// JSON shape of `Memos`: every entry is wrapped as `{"Memo": {...}}`.
pub(crate) mod memo_list {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Memo;

    #[derive(Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Wrapped<M> {
        #[serde(rename = "Memo")]
        memo: M,
    }

    pub fn serialize<S: Serializer>(memos: &[Memo], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(memos.iter().map(|memo| Wrapped { memo }))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Memo>, D::Error> {
        let wrapped: Vec<Wrapped<Memo>> = Vec::deserialize(deserializer)?;
        Ok(wrapped.into_iter().map(|w| w.memo).collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
