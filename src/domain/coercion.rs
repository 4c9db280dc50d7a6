//! Plain text-to-number coercion for form inputs.
//!
//! Mirrors the conversion a browser applies to numeric text fields: no
//! validation, invalid input silently becomes `NaN` and blank input becomes
//! zero.

/// Converts user text to a number.
///
/// Surrounding whitespace is ignored. Blank input yields `0.0`. Decimal and
/// exponent notation, `0x`/`0o`/`0b` prefixed integers and `Infinity` are
/// accepted; anything else yields `NaN`.
#[must_use]
pub fn coerce_number(input: &str) -> f64 {
    let text = input.trim();
    if text.is_empty() {
        return 0.0;
    }

    if let Some(value) = parse_prefixed(text) {
        return value;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // Rust also accepts "inf" and "nan", which must not count as numbers here.
    if text
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }

    text.parse::<f64>().unwrap_or(f64::NAN)
}

#[allow(clippy::cast_precision_loss)]
fn parse_prefixed(text: &str) -> Option<f64> {
    let radix = match text.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    Some(
        u64::from_str_radix(&text[2..], radix)
            .map(|v| v as f64)
            .unwrap_or(f64::NAN),
    )
}

/// Renders a number back into form text.
///
/// Integral values print without a fractional part so that a stored
/// `5000.0` edits as `5000`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        #[allow(clippy::cast_possible_truncation)]
        return format!("{}", value as i64);
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("5000", 5000.0 ; "integer")]
    #[test_case("  12.5 ", 12.5 ; "padded_decimal")]
    #[test_case("", 0.0 ; "empty")]
    #[test_case("   ", 0.0 ; "blank")]
    #[test_case("1e3", 1000.0 ; "exponent")]
    #[test_case("0x10", 16.0 ; "hex")]
    #[test_case("-3", -3.0 ; "negative")]
    #[test_case(".5", 0.5 ; "leading_dot")]
    fn test_coerce_valid(input: &str, expected: f64) {
        assert!((coerce_number(input) - expected).abs() < f64::EPSILON);
    }

    #[test_case("12abc" ; "trailing_garbage")]
    #[test_case("abc" ; "letters")]
    #[test_case("inf" ; "rust_infinity_spelling")]
    #[test_case("nan" ; "rust_nan_spelling")]
    #[test_case("1,5" ; "comma_decimal")]
    #[test_case("0xZZ" ; "bad_hex")]
    fn test_coerce_invalid_is_nan(input: &str) {
        assert!(coerce_number(input).is_nan());
    }

    #[test]
    fn test_infinity() {
        assert_eq!(coerce_number("Infinity"), f64::INFINITY);
        assert_eq!(coerce_number("-Infinity"), f64::NEG_INFINITY);
    }

    #[test_case(5000.0, "5000" ; "integral")]
    #[test_case(2.5, "2.5" ; "fraction")]
    #[test_case(f64::NAN, "NaN" ; "nan")]
    fn test_format_number(value: f64, expected: &str) {
        assert_eq!(format_number(value), expected);
    }
}
