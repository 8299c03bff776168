/* Scalar encoders: one value of one elementary type */

use crate::errors::{EncodeError, EncodeResult};
use crate::word::{left_pad, length_prefixed, right_pad, Word};
use abi_types::{ArgumentValue, ParamType};
use num_bigint::{BigInt, Sign};
use num_traits::One;

/* Hex digits in an address */
const ADDRESS_HEX_LEN: usize = 40;

/* Two's-complement modulus: every signed value is folded into one 256-bit word */
const WORD_BITS: usize = 256;

pub(crate) fn encode_address(ty: &ParamType, value: &ArgumentValue) -> EncodeResult<Word> {
    let ArgumentValue::Text(text) = value else {
        return Err(EncodeError::invalid(
            ty,
            format!("expected a hex string, got {}", value.kind()),
        ));
    };

    let trimmed = text.trim();
    let digits = strip_hex_prefix(trimmed).unwrap_or(trimmed);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(EncodeError::invalid(
            ty,
            format!("'{trimmed}' contains non-hex characters"),
        ));
    }
    if digits.len() != ADDRESS_HEX_LEN {
        return Err(EncodeError::LengthMismatch {
            ty: ty.to_string(),
            expected: ADDRESS_HEX_LEN,
            actual: digits.len(),
        });
    }

    let bytes = hex::decode(digits.to_ascii_lowercase())
        .map_err(|e| EncodeError::invalid(ty, e.to_string()))?;
    word_or_overflow(ty, left_pad(&bytes), digits)
}

/* Truthy coercion: true, 1, "1" and "true" are true; everything else is false */
pub(crate) fn encode_bool(value: &ArgumentValue) -> EncodeResult<Word> {
    let truthy = match value {
        ArgumentValue::Boolean(b) => *b,
        ArgumentValue::Integer(v) => v.is_one(),
        ArgumentValue::Text(t) => t == "1" || t == "true",
        ArgumentValue::Bytes(_) | ArgumentValue::Sequence(_) => false,
    };
    let mut word = [0u8; 32];
    word[31] = u8::from(truthy);
    Ok(word)
}

pub(crate) fn encode_uint(ty: &ParamType, bits: usize, value: &ArgumentValue) -> EncodeResult<Word> {
    let v = integer_value(ty, value)?;
    let max = (BigInt::one() << bits) - 1;
    if v.sign() == Sign::Minus || v > max {
        return Err(out_of_range(ty, &v));
    }
    let (_, magnitude) = v.to_bytes_be();
    word_or_overflow(ty, left_pad(&magnitude), &v)
}

pub(crate) fn encode_int(ty: &ParamType, bits: usize, value: &ArgumentValue) -> EncodeResult<Word> {
    let v = integer_value(ty, value)?;
    let bound = BigInt::one() << (bits - 1);
    if v < -&bound || v >= bound {
        return Err(out_of_range(ty, &v));
    }

    let folded = if v.sign() == Sign::Minus {
        (BigInt::one() << WORD_BITS) + &v
    } else {
        v.clone()
    };
    let (_, magnitude) = folded.to_bytes_be();
    word_or_overflow(ty, left_pad(&magnitude), &v)
}

pub(crate) fn encode_fixed_bytes(
    ty: &ParamType,
    size: usize,
    value: &ArgumentValue,
) -> EncodeResult<Word> {
    let bytes = raw_bytes(ty, value)?;
    if bytes.len() != size {
        return Err(EncodeError::LengthMismatch {
            ty: ty.to_string(),
            expected: size,
            actual: bytes.len(),
        });
    }
    word_or_overflow(ty, right_pad(&bytes), hex::encode(&bytes))
}

/* Length word plus padded payload, for the tail region */
pub(crate) fn encode_bytes(ty: &ParamType, value: &ArgumentValue) -> EncodeResult<Vec<u8>> {
    raw_bytes(ty, value).map(|bytes| length_prefixed(&bytes))
}

/* Text only; other values are never stringified */
pub(crate) fn encode_string(ty: &ParamType, value: &ArgumentValue) -> EncodeResult<Vec<u8>> {
    match value {
        ArgumentValue::Text(text) => Ok(length_prefixed(text.as_bytes())),
        other => Err(EncodeError::invalid(
            ty,
            format!("expected text, got {}", other.kind()),
        )),
    }
}

fn integer_value(ty: &ParamType, value: &ArgumentValue) -> EncodeResult<BigInt> {
    match value {
        ArgumentValue::Integer(v) => Ok(v.clone()),
        ArgumentValue::Text(text) => parse_integer_text(ty, text),
        other => Err(EncodeError::invalid(
            ty,
            format!("expected an integer, got {}", other.kind()),
        )),
    }
}

/* `0x`-prefixed hex, or decimal with an optional leading sign */
fn parse_integer_text(ty: &ParamType, text: &str) -> EncodeResult<BigInt> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(EncodeError::invalid(ty, "empty string"));
    }

    let parsed = if let Some(digits) = strip_hex_prefix(trimmed) {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            BigInt::parse_bytes(digits.as_bytes(), 16)
        } else {
            None
        }
    } else {
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            BigInt::parse_bytes(digits.as_bytes(), 10).map(|v| if negative { -v } else { v })
        } else {
            None
        }
    };

    parsed.ok_or_else(|| EncodeError::invalid(ty, format!("'{trimmed}' is not an integer")))
}

/* Hex text or raw bytes; odd-length hex gets one leading zero */
fn raw_bytes(ty: &ParamType, value: &ArgumentValue) -> EncodeResult<Vec<u8>> {
    match value {
        ArgumentValue::Bytes(bytes) => Ok(bytes.clone()),
        ArgumentValue::Text(text) => {
            let trimmed = text.trim();
            let digits = strip_hex_prefix(trimmed).unwrap_or(trimmed);
            if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(EncodeError::invalid(
                    ty,
                    format!("'{trimmed}' contains non-hex characters"),
                ));
            }
            let digits = if digits.len() % 2 == 1 {
                format!("0{digits}")
            } else {
                digits.to_string()
            };
            hex::decode(digits).map_err(|e| EncodeError::invalid(ty, e.to_string()))
        }
        other => Err(EncodeError::invalid(
            ty,
            format!("expected hex string or bytes, got {}", other.kind()),
        )),
    }
}

fn strip_hex_prefix(text: &str) -> Option<&str> {
    text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
}

fn out_of_range(ty: &ParamType, value: &BigInt) -> EncodeError {
    EncodeError::OutOfRange {
        ty: ty.to_string(),
        value: value.to_string(),
    }
}

/* Values wider than one word are out of range, never truncated */
fn word_or_overflow(ty: &ParamType, word: Option<Word>, value: impl ToString) -> EncodeResult<Word> {
    word.ok_or_else(|| EncodeError::OutOfRange {
        ty: ty.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_hex(word: Word) -> String {
        hex::encode(word)
    }

    fn uint(bits: usize) -> ParamType {
        ParamType::Uint { bits }
    }

    fn int(bits: usize) -> ParamType {
        ParamType::Int { bits }
    }

    #[test]
    fn uint8_words_for_every_value() {
        for v in 0u64..=255 {
            let word = encode_uint(&uint(8), 8, &ArgumentValue::from(v)).unwrap();
            assert_eq!(word_hex(word), format!("{}{:02x}", "0".repeat(62), v));
        }
    }

    #[test]
    fn uint8_rejects_256_and_negative_one() {
        assert!(matches!(
            encode_uint(&uint(8), 8, &ArgumentValue::from(256u64)),
            Err(EncodeError::OutOfRange { .. })
        ));
        assert!(matches!(
            encode_uint(&uint(8), 8, &ArgumentValue::from(-1i64)),
            Err(EncodeError::OutOfRange { .. })
        ));
    }

    #[test]
    fn uint256_max_fits_and_one_more_does_not() {
        let max: BigInt = (BigInt::one() << 256) - 1;
        let word = encode_uint(&uint(256), 256, &ArgumentValue::Integer(max.clone())).unwrap();
        assert_eq!(word_hex(word), "f".repeat(64));
        assert!(matches!(
            encode_uint(&uint(256), 256, &ArgumentValue::Integer(max + 1)),
            Err(EncodeError::OutOfRange { .. })
        ));
    }

    #[test]
    fn int8_negative_one_is_all_ones() {
        let word = encode_int(&int(8), 8, &ArgumentValue::from(-1i64)).unwrap();
        assert_eq!(word_hex(word), "f".repeat(64));
    }

    #[test]
    fn int8_bounds() {
        let min = encode_int(&int(8), 8, &ArgumentValue::from(-128i64)).unwrap();
        assert_eq!(word_hex(min), format!("{}80", "f".repeat(62)));
        assert!(encode_int(&int(8), 8, &ArgumentValue::from(127i64)).is_ok());
        assert!(matches!(
            encode_int(&int(8), 8, &ArgumentValue::from(128i64)),
            Err(EncodeError::OutOfRange { .. })
        ));
        assert!(matches!(
            encode_int(&int(8), 8, &ArgumentValue::from(-129i64)),
            Err(EncodeError::OutOfRange { .. })
        ));
    }

    #[test]
    fn int256_bounds() {
        let limit: BigInt = BigInt::one() << 255;
        let max = encode_int(&int(256), 256, &ArgumentValue::Integer(&limit - 1)).unwrap();
        assert_eq!(word_hex(max), format!("7{}", "f".repeat(63)));
        assert!(matches!(
            encode_int(&int(256), 256, &ArgumentValue::Integer(limit.clone())),
            Err(EncodeError::OutOfRange { .. })
        ));
        let min = encode_int(&int(256), 256, &ArgumentValue::Integer(-limit)).unwrap();
        assert_eq!(word_hex(min), format!("8{}", "0".repeat(63)));
    }

    #[test]
    fn numeric_text_forms() {
        let ty = uint(256);
        let from_hex = encode_uint(&ty, 256, &"0xFF".into()).unwrap();
        let from_dec = encode_uint(&ty, 256, &" 255 ".into()).unwrap();
        assert_eq!(from_hex, from_dec);

        let negative = encode_int(&int(16), 16, &"-2".into()).unwrap();
        assert_eq!(word_hex(negative), format!("{}e", "f".repeat(63)));

        let plus = encode_uint(&uint(8), 8, &"+5".into()).unwrap();
        assert_eq!(plus, encode_uint(&uint(8), 8, &5i64.into()).unwrap());

        for bad in ["", "0x", "12a", "1_000", "+-5", "++5", "-0x10", "+0x10", "1.0"] {
            assert!(
                matches!(
                    encode_uint(&ty, 256, &bad.into()),
                    Err(EncodeError::InvalidFormat { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn integers_reject_other_kinds() {
        assert!(matches!(
            encode_uint(&uint(8), 8, &ArgumentValue::Boolean(true)),
            Err(EncodeError::InvalidFormat { .. })
        ));
        assert!(matches!(
            encode_int(&int(8), 8, &ArgumentValue::Sequence(vec![])),
            Err(EncodeError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn address_normalizes_case() {
        let upper = "0xABCDEF0123456789ABCDEF0123456789ABCDEF01";
        let word = encode_address(&ParamType::Address, &upper.into()).unwrap();
        assert_eq!(
            word_hex(word),
            format!("{}abcdef0123456789abcdef0123456789abcdef01", "0".repeat(24))
        );
        let bare = encode_address(&ParamType::Address, &upper[2..].into()).unwrap();
        assert_eq!(word, bare);
    }

    #[test]
    fn address_length_and_format_errors() {
        let short = "1".repeat(39);
        let long = "1".repeat(41);
        assert!(matches!(
            encode_address(&ParamType::Address, &short.as_str().into()),
            Err(EncodeError::LengthMismatch { expected: 40, actual: 39, .. })
        ));
        assert!(matches!(
            encode_address(&ParamType::Address, &long.as_str().into()),
            Err(EncodeError::LengthMismatch { expected: 40, actual: 41, .. })
        ));
        let not_hex = format!("0x{}", "g".repeat(40));
        assert!(matches!(
            encode_address(&ParamType::Address, &not_hex.as_str().into()),
            Err(EncodeError::InvalidFormat { .. })
        ));
        assert!(matches!(
            encode_address(&ParamType::Address, &ArgumentValue::from(1i64)),
            Err(EncodeError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn bool_truthiness() {
        let truthy: [ArgumentValue; 4] = [true.into(), 1i64.into(), "1".into(), "true".into()];
        for value in &truthy {
            assert_eq!(encode_bool(value).unwrap()[31], 1, "{value:?}");
        }
        let falsy: [ArgumentValue; 5] = [
            false.into(),
            0i64.into(),
            2i64.into(),
            "TRUE".into(),
            "yes".into(),
        ];
        for value in &falsy {
            assert_eq!(encode_bool(value).unwrap(), [0u8; 32], "{value:?}");
        }
        assert_eq!(encode_bool(&ArgumentValue::Sequence(vec![])).unwrap(), [0u8; 32]);
        assert_eq!(
            encode_bool(&ArgumentValue::Sequence(vec![true.into()])).unwrap(),
            [0u8; 32]
        );
    }

    #[test]
    fn fixed_bytes_are_right_padded() {
        let ty = ParamType::FixedBytes { size: 2 };
        let word = encode_fixed_bytes(&ty, 2, &"0xabcd".into()).unwrap();
        assert_eq!(word_hex(word), format!("abcd{}", "0".repeat(60)));
        let raw = encode_fixed_bytes(&ty, 2, &ArgumentValue::Bytes(vec![0xab, 0xcd])).unwrap();
        assert_eq!(word, raw);
    }

    #[test]
    fn fixed_bytes_length_must_match_exactly() {
        let ty = ParamType::FixedBytes { size: 4 };
        assert!(matches!(
            encode_fixed_bytes(&ty, 4, &"0xabcd".into()),
            Err(EncodeError::LengthMismatch { expected: 4, actual: 2, .. })
        ));
        assert!(matches!(
            encode_fixed_bytes(&ty, 4, &"0xabcdef012345".into()),
            Err(EncodeError::LengthMismatch { expected: 4, actual: 6, .. })
        ));
        assert!(matches!(
            encode_fixed_bytes(&ty, 4, &"0xabc".into()),
            Err(EncodeError::LengthMismatch { expected: 4, actual: 2, .. })
        ));
    }

    #[test]
    fn dynamic_bytes_and_strings_are_length_prefixed() {
        let encoded = encode_string(&ParamType::String, &"hi".into()).unwrap();
        assert_eq!(
            hex::encode(&encoded),
            format!("{}02{}{}", "0".repeat(62), "6869", "0".repeat(60))
        );

        let encoded = encode_bytes(&ParamType::Bytes, &ArgumentValue::Bytes(vec![7u8; 33])).unwrap();
        assert_eq!(encoded.len(), 32 + 64);
        assert_eq!(encoded[31], 33);

        let empty = encode_bytes(&ParamType::Bytes, &"0x".into()).unwrap();
        assert_eq!(empty, vec![0u8; 32]);
    }

    #[test]
    fn odd_length_hex_gets_a_leading_zero() {
        let encoded = encode_bytes(&ParamType::Bytes, &"0x1".into()).unwrap();
        let length = format!("{}01", "0".repeat(62));
        let payload = format!("01{}", "0".repeat(62));
        assert_eq!(hex::encode(&encoded), [length, payload].concat());

        let ty = ParamType::FixedBytes { size: 2 };
        let word = encode_fixed_bytes(&ty, 2, &"0xabc".into()).unwrap();
        assert_eq!(word_hex(word), format!("0abc{}", "0".repeat(60)));
    }

    #[test]
    fn strings_are_utf8_and_never_stringified() {
        let encoded = encode_string(&ParamType::String, &"é".into()).unwrap();
        assert_eq!(encoded[31], 2);
        assert_eq!(&encoded[32..34], "é".as_bytes());
        assert!(matches!(
            encode_string(&ParamType::String, &ArgumentValue::from(5i64)),
            Err(EncodeError::InvalidFormat { .. })
        ));
    }
}
