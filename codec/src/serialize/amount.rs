//! Amount encoding.
//!
//! ```text
//! native  (8 bytes):  0 | 1 (positive) | 62-bit drops
//! issued (48 bytes):  1 | sign | 8-bit exponent+97 | 54-bit mantissa
//!                     || 20-byte currency || 20-byte issuer
//! ```
//!
//! Issued values are normalized so the mantissa has exactly 16 digits
//! (10^15 ..= 10^16 - 1). Zero has its own encoding with every value bit
//! clear except the issued flag.

use crate::address::AccountId;
use crate::config::{
    AMOUNT_ISSUED_BIT, AMOUNT_POSITIVE_BIT, CURRENCY_CODE_LENGTH, IOU_EXPONENT_BIAS,
    IOU_MANTISSA_MASK, ISSUED_AMOUNT_LENGTH, MAX_DROPS, MAX_IOU_EXPONENT, MAX_IOU_PRECISION,
    MIN_IOU_EXPONENT, MIN_IOU_MANTISSA, NATIVE_AMOUNT_LENGTH,
};
use crate::error::CodecError;
use crate::transaction::{CurrencyAmount, CurrencyCode, IssuedAmount};

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Serializes an amount to its 8- or 48-byte wire form.
pub fn encode_amount(amount: &CurrencyAmount) -> Result<Vec<u8>, CodecError> {
    match amount {
        CurrencyAmount::Xrp(drops) => Ok(encode_drops(*drops)?.to_vec()),
        CurrencyAmount::Issued(issued) => {
            let mut out = Vec::with_capacity(ISSUED_AMOUNT_LENGTH);
            out.extend_from_slice(&encode_issued_value(&issued.value)?);
            out.extend_from_slice(&issued.currency.to_bytes());
            out.extend_from_slice(issued.issuer.as_bytes());
            Ok(out)
        }
    }
}

/// Encodes a native amount.
pub fn encode_drops(drops: u64) -> Result<[u8; NATIVE_AMOUNT_LENGTH], CodecError> {
    if drops > MAX_DROPS {
        return Err(CodecError::amount(
            drops.to_string(),
            format!("exceeds the maximum of {} drops", MAX_DROPS),
        ));
    }
    Ok((AMOUNT_POSITIVE_BIT | drops).to_be_bytes())
}

/// Encodes the 8-byte value part of an issued amount.
pub fn encode_issued_value(value: &str) -> Result<[u8; 8], CodecError> {
    let Some(decimal) = Decimal::parse(value)? else {
        return Ok(AMOUNT_ISSUED_BIT.to_be_bytes());
    };

    let mut bits = AMOUNT_ISSUED_BIT;
    if !decimal.negative {
        bits |= AMOUNT_POSITIVE_BIT;
    }
    bits |= ((decimal.exponent + IOU_EXPONENT_BIAS) as u64) << 54;
    bits |= decimal.mantissa;
    Ok(bits.to_be_bytes())
}

/// A nonzero decimal normalized to the ledger's mantissa range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Decimal {
    negative: bool,
    mantissa: u64,
    exponent: i32,
}

impl Decimal {
    /// Parses `[+-]digits[.digits][e[+-]digits]`. Returns `None` for zero.
    fn parse(input: &str) -> Result<Option<Self>, CodecError> {
        let invalid = |reason: &str| CodecError::amount(input, reason);

        let (negative, unsigned) = match input.as_bytes().first() {
            Some(b'-') => (true, &input[1..]),
            Some(b'+') => (false, &input[1..]),
            _ => (false, input),
        };

        let (number, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
            Some(pos) => {
                let exponent: i64 = unsigned[pos + 1..]
                    .parse()
                    .map_err(|_| invalid("malformed exponent"))?;
                (&unsigned[..pos], exponent)
            }
            None => (unsigned, 0),
        };

        let (integer, fraction) = number.split_once('.').unwrap_or((number, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if integer.is_empty() && fraction.is_empty() {
            return Err(invalid("no digits"));
        }
        if !all_digits(integer) || !all_digits(fraction) {
            return Err(invalid("not a decimal number"));
        }

        let mut exponent = exponent
            .checked_sub(fraction.len() as i64)
            .ok_or_else(|| invalid("exponent out of range"))?;
        let digits = format!("{}{}", integer, fraction);
        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            return Ok(None);
        }

        let significant = digits.trim_end_matches('0');
        exponent = exponent
            .checked_add((digits.len() - significant.len()) as i64)
            .ok_or_else(|| invalid("exponent out of range"))?;
        if significant.len() > MAX_IOU_PRECISION {
            return Err(invalid("more than 16 significant digits"));
        }

        let mut mantissa: u64 = significant
            .parse()
            .map_err(|_| invalid("not a decimal number"))?;
        while mantissa < MIN_IOU_MANTISSA {
            mantissa *= 10;
            exponent = exponent
                .checked_sub(1)
                .ok_or_else(|| invalid("exponent out of range"))?;
        }

        if exponent < MIN_IOU_EXPONENT as i64 || exponent > MAX_IOU_EXPONENT as i64 {
            return Err(invalid("exponent out of range"));
        }

        Ok(Some(Self {
            negative,
            mantissa,
            exponent: exponent as i32,
        }))
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Returns `true` if the first amount byte marks an issued amount, which
/// tells the parser to read 48 bytes instead of 8.
pub fn is_issued(first_byte: u8) -> bool {
    first_byte & 0x80 != 0
}

/// Decodes an 8- or 48-byte amount.
pub fn decode_amount(bytes: &[u8]) -> Result<CurrencyAmount, CodecError> {
    match bytes.len() {
        NATIVE_AMOUNT_LENGTH => {
            let value = u64::from_be_bytes(to_array(bytes)?);
            if value & AMOUNT_ISSUED_BIT != 0 {
                return Err(CodecError::Malformed(
                    "8-byte amount has the issued bit set".to_string(),
                ));
            }
            if value & AMOUNT_POSITIVE_BIT == 0 && value != 0 {
                return Err(CodecError::Malformed(
                    "negative native amount".to_string(),
                ));
            }
            Ok(CurrencyAmount::Xrp(value & !AMOUNT_POSITIVE_BIT))
        }
        ISSUED_AMOUNT_LENGTH => {
            let value = decode_issued_value(to_array(&bytes[..8])?)?;
            let mut currency = [0u8; CURRENCY_CODE_LENGTH];
            currency.copy_from_slice(&bytes[8..28]);
            let issuer = AccountId::from_slice(&bytes[28..48])?;
            Ok(CurrencyAmount::Issued(IssuedAmount::new(
                CurrencyCode::from_bytes(currency)?,
                value,
                issuer,
            )))
        }
        other => Err(CodecError::InvalidLength {
            field: "Amount",
            expected: ISSUED_AMOUNT_LENGTH,
            got: other,
        }),
    }
}

/// Renders the 8-byte value of an issued amount as a plain decimal string.
pub fn decode_issued_value(bytes: [u8; 8]) -> Result<String, CodecError> {
    let bits = u64::from_be_bytes(bytes);
    if bits & AMOUNT_ISSUED_BIT == 0 {
        return Err(CodecError::Malformed(
            "issued value without the issued bit".to_string(),
        ));
    }

    let mantissa = bits & IOU_MANTISSA_MASK;
    if mantissa == 0 {
        return Ok("0".to_string());
    }
    let negative = bits & AMOUNT_POSITIVE_BIT == 0;
    let exponent = ((bits >> 54) & 0xFF) as i32 - IOU_EXPONENT_BIAS;

    let digits = mantissa.to_string();
    let significant = digits.trim_end_matches('0');
    let exponent = exponent + (digits.len() - significant.len()) as i32;

    let mut rendered = String::new();
    if negative {
        rendered.push('-');
    }
    if exponent >= 0 {
        rendered.push_str(significant);
        rendered.extend(std::iter::repeat('0').take(exponent as usize));
    } else {
        let shift = (-exponent) as usize;
        if shift < significant.len() {
            let (whole, frac) = significant.split_at(significant.len() - shift);
            rendered.push_str(whole);
            rendered.push('.');
            rendered.push_str(frac);
        } else {
            rendered.push_str("0.");
            rendered.extend(std::iter::repeat('0').take(shift - significant.len()));
            rendered.push_str(significant);
        }
    }
    Ok(rendered)
}

fn to_array(bytes: &[u8]) -> Result<[u8; 8], CodecError> {
    bytes.try_into().map_err(|_| CodecError::InvalidLength {
        field: "Amount",
        expected: 8,
        got: bytes.len(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn value_hex(value: &str) -> String {
        hex::encode_upper(encode_issued_value(value).unwrap())
    }

    #[test]
    fn native_amounts() {
        assert_eq!(hex::encode_upper(encode_drops(1_000_000).unwrap()), "40000000000F4240");
        assert_eq!(hex::encode_upper(encode_drops(12).unwrap()), "400000000000000C");
        assert_eq!(hex::encode_upper(encode_drops(0).unwrap()), "4000000000000000");
    }

    #[test]
    fn native_limit() {
        assert!(encode_drops(MAX_DROPS).is_ok());
        assert!(matches!(
            encode_drops(MAX_DROPS + 1),
            Err(CodecError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn issued_reference_values() {
        assert_eq!(value_hex("10"), "D4C38D7EA4C68000");
        assert_eq!(value_hex("1.5"), "D485543DF729C000");
        assert_eq!(value_hex("-2"), "94871AFD498D0000");
        assert_eq!(value_hex("0.001"), "D3C38D7EA4C68000");
        assert_eq!(value_hex("1234567890123456"), "D84462D53C8ABAC0");
    }

    #[test]
    fn issued_zero() {
        assert_eq!(value_hex("0"), "8000000000000000");
        assert_eq!(value_hex("0.000"), "8000000000000000");
        assert_eq!(value_hex("-0"), "8000000000000000");
    }

    #[test]
    fn equivalent_spellings_encode_identically() {
        let reference = value_hex("0.001");
        for spelling in ["1e-3", "1E-3", "0.0010", "+0.001", "00.001", ".001", "100e-5"] {
            assert_eq!(value_hex(spelling), reference, "spelling {}", spelling);
        }
    }

    #[test]
    fn rejects_excess_precision() {
        assert!(encode_issued_value("12345678901234567").is_err());
        assert!(encode_issued_value("1.2345678901234567").is_err());
        // Trailing zeros are not significant.
        assert!(encode_issued_value("12345678901234560000").is_ok());
    }

    #[test]
    fn rejects_exponent_out_of_range() {
        assert!(encode_issued_value("1e95").is_ok());
        assert!(encode_issued_value("1e96").is_err());
        assert!(encode_issued_value("1e-81").is_ok());
        assert!(encode_issued_value("1e-82").is_err());
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "-", ".", "1.2.3", "abc", "1e", "1e+x", "0x10", "1 0"] {
            assert!(encode_issued_value(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn extreme_exponents_are_errors_not_panics() {
        for bad in ["10e9223372036854775807", "1e-9223372036854775808", "1e9223372036854775807"] {
            assert!(
                matches!(
                    encode_issued_value(bad),
                    Err(CodecError::InvalidAmount { ref reason, .. }) if reason == "exponent out of range"
                ),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn surrounding_whitespace_is_rejected() {
        for bad in [" 10", "10 ", " 10 ", "\t1.5", "1.5\n"] {
            assert!(encode_issued_value(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn decodes_issued_values_to_plain_decimals() {
        let cases = [
            ("10", "10"),
            ("1.5", "1.5"),
            ("-2", "-2"),
            ("0.001", "0.001"),
            ("1.50", "1.5"),
            ("1234567890123456", "1234567890123456"),
            ("0", "0"),
        ];
        for (input, expected) in cases {
            let bytes = encode_issued_value(input).unwrap();
            assert_eq!(decode_issued_value(bytes).unwrap(), expected);
        }
    }

    #[test]
    fn decodes_full_amounts() {
        let issuer = AccountId::from_bytes([9u8; 20]);
        let amount = CurrencyAmount::Issued(IssuedAmount::new(
            "USD".parse().unwrap(),
            "10",
            issuer,
        ));
        let bytes = encode_amount(&amount).unwrap();
        assert_eq!(bytes.len(), ISSUED_AMOUNT_LENGTH);
        assert!(is_issued(bytes[0]));
        assert_eq!(decode_amount(&bytes).unwrap(), amount);

        let native = encode_amount(&CurrencyAmount::Xrp(42)).unwrap();
        assert!(!is_issued(native[0]));
        assert_eq!(decode_amount(&native).unwrap(), CurrencyAmount::Xrp(42));
    }

    #[test]
    fn decode_rejects_wrong_width() {
        assert!(matches!(
            decode_amount(&[0x40; 7]),
            Err(CodecError::InvalidLength { .. })
        ));
    }
}
