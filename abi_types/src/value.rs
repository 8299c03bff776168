/* Argument values - caller-supplied data matched against a ParamType */

use num_bigint::BigInt;
use num_traits::FromPrimitive;
use serde_json::{Number, Value as JsonValue};
use thiserror::Error;

/* Largest magnitude a JSON float carries without losing integer precision (2^53) */
const MAX_SAFE_FLOAT_INTEGER: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("null is not a valid argument value")]
    Null,

    #[error("objects are not valid argument values")]
    Object,

    #[error("number {0} is not an exact integer")]
    NonInteger(String),
}

/* Dynamically-typed argument value; never coerced across variants implicitly */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentValue {
    /* Signed integer of any magnitude */
    Integer(BigInt),

    Boolean(bool),

    /* Text: a string, a hex literal or a numeric literal depending on the target type */
    Text(String),

    /* Raw bytes */
    Bytes(Vec<u8>),

    /* Ordered elements of an array value */
    Sequence(Vec<ArgumentValue>),
}

impl ArgumentValue {
    /// Convert a JSON value into an argument value.
    ///
    /// Numbers are read from their literal text, so integers wider than 64 bits
    /// keep every digit. Decimal or exponent forms are only accepted when they
    /// denote an integer no larger than 2^53 in magnitude.
    pub fn from_json(value: &JsonValue) -> Result<Self, ValueError> {
        match value {
            JsonValue::Null => Err(ValueError::Null),
            JsonValue::Bool(b) => Ok(ArgumentValue::Boolean(*b)),
            JsonValue::Number(n) => integer_from_json(n).map(ArgumentValue::Integer),
            JsonValue::String(s) => Ok(ArgumentValue::Text(s.clone())),
            JsonValue::Array(items) => Self::from_json_list(items).map(ArgumentValue::Sequence),
            JsonValue::Object(_) => Err(ValueError::Object),
        }
    }

    /* Convert a list of JSON values, failing on the first bad element */
    pub fn from_json_list(values: &[JsonValue]) -> Result<Vec<Self>, ValueError> {
        values.iter().map(Self::from_json).collect()
    }

    /* Short variant name used in error messages */
    pub fn kind(&self) -> &'static str {
        match self {
            ArgumentValue::Integer(_) => "integer",
            ArgumentValue::Boolean(_) => "boolean",
            ArgumentValue::Text(_) => "text",
            ArgumentValue::Bytes(_) => "bytes",
            ArgumentValue::Sequence(_) => "sequence",
        }
    }
}

fn integer_from_json(number: &Number) -> Result<BigInt, ValueError> {
    let literal = number.to_string();
    if let Ok(value) = literal.parse::<BigInt>() {
        return Ok(value);
    }
    match number.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_FLOAT_INTEGER => {
            BigInt::from_f64(f).ok_or(ValueError::NonInteger(literal))
        }
        _ => Err(ValueError::NonInteger(literal)),
    }
}

impl From<bool> for ArgumentValue {
    fn from(value: bool) -> Self {
        ArgumentValue::Boolean(value)
    }
}

impl From<&str> for ArgumentValue {
    fn from(value: &str) -> Self {
        ArgumentValue::Text(value.to_string())
    }
}

impl From<String> for ArgumentValue {
    fn from(value: String) -> Self {
        ArgumentValue::Text(value)
    }
}

impl From<i64> for ArgumentValue {
    fn from(value: i64) -> Self {
        ArgumentValue::Integer(BigInt::from(value))
    }
}

impl From<u64> for ArgumentValue {
    fn from(value: u64) -> Self {
        ArgumentValue::Integer(BigInt::from(value))
    }
}

impl From<BigInt> for ArgumentValue {
    fn from(value: BigInt) -> Self {
        ArgumentValue::Integer(value)
    }
}

impl From<Vec<ArgumentValue>> for ArgumentValue {
    fn from(values: Vec<ArgumentValue>) -> Self {
        ArgumentValue::Sequence(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_scalars_map_to_variants() {
        assert_eq!(
            ArgumentValue::from_json(&json!(true)),
            Ok(ArgumentValue::Boolean(true))
        );
        assert_eq!(
            ArgumentValue::from_json(&json!("0xabc")),
            Ok(ArgumentValue::Text("0xabc".to_string()))
        );
        assert_eq!(
            ArgumentValue::from_json(&json!(-7)),
            Ok(ArgumentValue::from(-7i64))
        );
    }

    #[test]
    fn json_arrays_nest() {
        let value = ArgumentValue::from_json(&json!([[1, 2], ["a"]])).unwrap();
        assert_eq!(
            value,
            ArgumentValue::Sequence(vec![
                ArgumentValue::Sequence(vec![1i64.into(), 2i64.into()]),
                ArgumentValue::Sequence(vec!["a".into()]),
            ])
        );
    }

    #[test]
    fn wide_json_integers_keep_every_digit() {
        let literal = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        let parsed: JsonValue = serde_json::from_str(literal).unwrap();
        let value = ArgumentValue::from_json(&parsed).unwrap();
        assert_eq!(
            value,
            ArgumentValue::Integer(literal.parse::<BigInt>().unwrap())
        );
    }

    #[test]
    fn integral_floats_are_accepted_fractions_are_not() {
        let parsed: JsonValue = serde_json::from_str("1e3").unwrap();
        assert_eq!(
            ArgumentValue::from_json(&parsed),
            Ok(ArgumentValue::from(1000i64))
        );

        let parsed: JsonValue = serde_json::from_str("1.5").unwrap();
        assert!(matches!(
            ArgumentValue::from_json(&parsed),
            Err(ValueError::NonInteger(_))
        ));

        let parsed: JsonValue = serde_json::from_str("1e30").unwrap();
        assert!(matches!(
            ArgumentValue::from_json(&parsed),
            Err(ValueError::NonInteger(_))
        ));
    }

    #[test]
    fn null_and_objects_are_rejected() {
        assert_eq!(ArgumentValue::from_json(&json!(null)), Err(ValueError::Null));
        assert_eq!(
            ArgumentValue::from_json(&json!({ "a": 1 })),
            Err(ValueError::Object)
        );
        assert_eq!(
            ArgumentValue::from_json(&json!([1, null])),
            Err(ValueError::Null)
        );
    }
}
