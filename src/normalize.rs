//! Number normalization for JSON output.
//!
//! DynamoDB hands numbers back as exact decimal text (`AttributeValue::N`).
//! JSON has no decimal type, so each number becomes an integer when it has no
//! fractional part and a float otherwise.

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::Number;

use crate::error::{RecordError, Result};

/// Normalize a stored value that JSON cannot represent natively.
///
/// Only numbers are accepted; any other attribute type is reported as
/// [`RecordError::UnsupportedType`].
pub fn normalize(value: &AttributeValue) -> Result<Number> {
    match value {
        AttributeValue::N(raw) => normalize_decimal(raw),
        other => Err(RecordError::UnsupportedType(attribute_type_name(other).to_string())),
    }
}

/// Convert decimal text to an integer or a float.
///
/// Integral values outside the 64-bit range come back as floats.
pub fn normalize_decimal(raw: &str) -> Result<Number> {
    let text = raw.trim();

    if let Some(digits) = integral_digits(text) {
        if let Ok(int) = digits.parse::<i64>() {
            return Ok(Number::from(int));
        }
        if let Ok(uint) = digits.parse::<u64>() {
            return Ok(Number::from(uint));
        }
    }

    let float: f64 = text
        .parse()
        .map_err(|_| RecordError::Backend(format!("invalid number from DynamoDB: '{}'", raw)))?;
    if !float.is_finite() {
        return Err(RecordError::Backend(format!("non-finite number from DynamoDB: '{}'", raw)));
    }

    Number::from_f64(float)
        .ok_or_else(|| RecordError::Backend(format!("number not representable as JSON: '{}'", raw)))
}

/// Plain integer text for a decimal with no fractional part, e.g. `"1.50E+2"` -> `"150"`.
///
/// Returns `None` for fractional values, malformed text, and integers too
/// long to fit in 64 bits.
fn integral_digits(text: &str) -> Option<String> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(pos) => (&unsigned[..pos], unsigned[pos + 1..].parse::<i64>().ok()?),
        None => (unsigned, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut digits = format!("{}{}", int_part, frac_part);
    let mut scale = exponent.checked_sub(frac_part.len() as i64)?;
    while scale < 0 && digits.ends_with('0') {
        digits.pop();
        scale += 1;
    }

    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Some("0".to_string());
    }
    // u64::MAX has 20 digits.
    if scale < 0 || (digits.len() as i64).saturating_add(scale) > 20 {
        return None;
    }

    let mut integer = String::with_capacity(digits.len() + scale as usize + 1);
    if negative {
        integer.push('-');
    }
    integer.push_str(digits);
    integer.extend(std::iter::repeat_n('0', scale as usize));
    Some(integer)
}

pub fn attribute_type_name(value: &AttributeValue) -> &'static str {
    match value {
        AttributeValue::B(_) => "B (binary)",
        AttributeValue::Bs(_) => "BS (binary set)",
        AttributeValue::Bool(_) => "BOOL",
        AttributeValue::L(_) => "L (list)",
        AttributeValue::M(_) => "M (map)",
        AttributeValue::N(_) => "N (number)",
        AttributeValue::Ns(_) => "NS (number set)",
        AttributeValue::Null(_) => "NULL",
        AttributeValue::S(_) => "S (string)",
        AttributeValue::Ss(_) => "SS (string set)",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::primitives::Blob;

    fn n(raw: &str) -> AttributeValue {
        AttributeValue::N(raw.to_string())
    }

    #[test]
    fn test_whole_numbers_become_integers() {
        assert_eq!(normalize(&n("42")).unwrap(), Number::from(42));
        assert_eq!(normalize(&n("-7")).unwrap(), Number::from(-7));
        assert_eq!(normalize(&n("0")).unwrap(), Number::from(0));
        assert_eq!(normalize(&n("18446744073709551615")).unwrap(), Number::from(u64::MAX));
    }

    #[test]
    fn test_zero_fraction_becomes_integer() {
        assert_eq!(normalize(&n("3.0")).unwrap(), Number::from(3));
        assert_eq!(normalize(&n("1E+3")).unwrap(), Number::from(1000));
        assert_eq!(normalize(&n("-0.000")).unwrap(), Number::from(0));
        assert!(normalize(&n("2.00")).unwrap().is_i64());
        assert_eq!(normalize(&n("1.50E+2")).unwrap(), Number::from(150));
        assert_eq!(normalize(&n("-4.0e1")).unwrap(), Number::from(-40));
    }

    #[test]
    fn test_zero_fraction_keeps_every_digit() {
        assert_eq!(
            normalize_decimal("9007199254740993.0").unwrap(),
            Number::from(9007199254740993i64)
        );
        assert_eq!(
            normalize_decimal("1.2345678901234567E+16").unwrap(),
            Number::from(12345678901234567i64)
        );
        assert_eq!(
            normalize_decimal("-9223372036854775808.000").unwrap(),
            Number::from(i64::MIN)
        );

        let max = normalize_decimal("18446744073709551615.0").unwrap();
        assert!(max.is_u64());
        assert_eq!(max, Number::from(u64::MAX));
    }

    #[test]
    fn test_fractional_values_become_floats() {
        let value = normalize(&n("2.50")).unwrap();
        assert!(value.is_f64());
        assert_eq!(value.as_f64(), Some(2.5));

        let value = normalize(&n("-0.125")).unwrap();
        assert_eq!(value.as_f64(), Some(-0.125));
    }

    #[test]
    fn test_huge_integers_become_floats() {
        let value = normalize(&n("1E+30")).unwrap();
        assert!(value.is_f64());
        assert_eq!(value.as_f64(), Some(1e30));
    }

    #[test]
    fn test_invalid_number_text() {
        assert!(normalize_decimal("twelve").is_err());
        assert!(normalize_decimal("inf").is_err());
        assert!(normalize_decimal("NaN").is_err());
        assert!(normalize_decimal("").is_err());
        assert!(normalize_decimal("1.2.3").is_err());
    }

    #[test]
    fn test_non_numbers_are_unsupported() {
        let inputs = [
            AttributeValue::S("1".to_string()),
            AttributeValue::Bool(true),
            AttributeValue::B(Blob::new(vec![1, 2, 3])),
            AttributeValue::Ss(vec!["a".to_string()]),
            AttributeValue::Ns(vec!["1".to_string()]),
        ];
        for input in inputs {
            let err = normalize(&input).unwrap_err();
            assert!(matches!(err, RecordError::UnsupportedType(_)), "{:?}", input);
        }
    }
}
