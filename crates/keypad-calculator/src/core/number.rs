//! Operand text <-> number conversions and result rounding
//!
//! Operands are kept as text so the display shows exactly what was typed
//! (a trailing `.` for instance). Committed values are written back using
//! the ECMAScript `Number#toString` layout the browser widget renders:
//! plain decimals for `1e-6 <= |x| < 1e21`, signed exponents otherwise.

/// Decimal places kept by `calculate` and the preview
pub const DEFAULT_PRECISION: u32 = 9;

/// Largest precision the rounding accepts (beyond it `10^p` loses integers)
pub const MAX_PRECISION: u32 = 15;

/// Parses operand text the way `parseFloat` does for calculator input
///
/// Accepts the longest numeric prefix, so `"3."` is 3 and `"1e+"` is 1.
/// Returns `None` for text with no numeric prefix (`""`, `"."`, `"-"`).
/// Digit strings too large for an `f64` parse as infinity, as does the
/// `Infinity` text a committed overflow leaves behind.
#[must_use]
pub fn parse_operand(text: &str) -> Option<f64> {
    let text = text.trim();
    match text {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    if !text
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'))
    {
        return None;
    }

    let mut candidate = text;
    while !candidate.is_empty() {
        if let Ok(value) = candidate.parse::<f64>() {
            return Some(value);
        }
        candidate = &candidate[..candidate.len() - 1];
    }
    None
}

/// Formats a value as operand text
#[must_use]
pub fn operand_text(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        format!("{value}")
    } else {
        signed_exponent(&format!("{value:e}"))
    }
}

/// Formats a value in exponent notation with a fixed number of fraction digits
///
/// `to_exponential(1234.5678, 2)` is `"1.23e+3"`.
#[must_use]
pub fn to_exponential(value: f64, fraction_digits: usize) -> String {
    if !value.is_finite() {
        return operand_text(value);
    }
    signed_exponent(&format!("{value:.fraction_digits$e}"))
}

/// Rewrites Rust's `1e21` exponent layout as `1e+21`
fn signed_exponent(formatted: &str) -> String {
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if exponent.starts_with('-') => {
            format!("{mantissa}e{exponent}")
        }
        Some((mantissa, exponent)) => format!("{mantissa}e+{exponent}"),
        None => formatted.to_string(),
    }
}

/// Rounds a result to `places` decimal places, suppressing binary noise
///
/// Mirrors `Math.round((x + EPSILON) * 10^p) / 10^p`. Values so large that
/// the scaled form overflows are already integral and come back unchanged.
#[must_use]
pub fn round_to_precision(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places.min(MAX_PRECISION) as i32);
    let scaled = (value + f64::EPSILON) * factor;
    if !scaled.is_finite() {
        return value;
    }
    round_half_up(scaled) / factor
}

/// Rounds to the nearest integer, ties towards positive infinity
fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ===== parse_operand =====

    #[test]
    fn test_parse_integer_and_decimal() {
        assert_eq!(parse_operand("42"), Some(42.0));
        assert_eq!(parse_operand("3.5"), Some(3.5));
        assert_eq!(parse_operand("-0.5"), Some(-0.5));
    }

    #[test]
    fn test_parse_trailing_point() {
        assert_eq!(parse_operand("3."), Some(3.0));
    }

    #[test]
    fn test_parse_leading_point() {
        assert_eq!(parse_operand(".5"), Some(0.5));
    }

    #[test]
    fn test_parse_rejects_non_numbers() {
        assert_eq!(parse_operand(""), None);
        assert_eq!(parse_operand("."), None);
        assert_eq!(parse_operand("-"), None);
        assert_eq!(parse_operand("inf"), None);
        assert_eq!(parse_operand("NaN"), None);
        assert_eq!(parse_operand("infinity"), None);
    }

    #[test]
    fn test_parse_oversized_digits_is_infinite() {
        let digits = "9".repeat(400);
        assert_eq!(parse_operand(&digits), Some(f64::INFINITY));
        assert_eq!(parse_operand(&format!("-{digits}")), Some(f64::NEG_INFINITY));
        assert_eq!(parse_operand("1e+400"), Some(f64::INFINITY));
    }

    #[test]
    fn test_parse_infinity_text() {
        assert_eq!(parse_operand("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_operand("-Infinity"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_parse_exponent_forms() {
        assert_eq!(parse_operand("1e+21"), Some(1e21));
        assert_eq!(parse_operand("1.5e-7"), Some(1.5e-7));
    }

    #[test]
    fn test_parse_truncated_exponent_uses_prefix() {
        assert_eq!(parse_operand("1e+"), Some(1.0));
        assert_eq!(parse_operand("1e"), Some(1.0));
    }

    // ===== operand_text =====

    #[test]
    fn test_operand_text_integers() {
        assert_eq!(operand_text(8.0), "8");
        assert_eq!(operand_text(-2.0), "-2");
        assert_eq!(operand_text(1e20), "100000000000000000000");
    }

    #[test]
    fn test_operand_text_decimals() {
        assert_eq!(operand_text(0.3), "0.3");
        assert_eq!(operand_text(0.5), "0.5");
        assert_eq!(operand_text(0.000001), "0.000001");
    }

    #[test]
    fn test_operand_text_exponent_forms() {
        assert_eq!(operand_text(1e21), "1e+21");
        assert_eq!(operand_text(1.5e-7), "1.5e-7");
        assert_eq!(operand_text(-2.5e30), "-2.5e+30");
    }

    #[test]
    fn test_operand_text_negative_zero() {
        assert_eq!(operand_text(-0.0), "0");
    }

    #[test]
    fn test_operand_text_non_finite() {
        assert_eq!(operand_text(f64::INFINITY), "Infinity");
        assert_eq!(operand_text(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(operand_text(f64::NAN), "NaN");
    }

    // ===== to_exponential =====

    #[test]
    fn test_to_exponential() {
        assert_eq!(to_exponential(1234.5678, 2), "1.23e+3");
        assert_eq!(to_exponential(1e21, 6), "1.000000e+21");
        assert_eq!(to_exponential(-0.00012, 1), "-1.2e-4");
    }

    // ===== round_to_precision =====

    #[test]
    fn test_round_suppresses_float_noise() {
        assert_eq!(round_to_precision(0.1 + 0.2, 9), 0.3);
    }

    #[test]
    fn test_round_keeps_integers() {
        assert_eq!(round_to_precision(8.0, 9), 8.0);
        assert_eq!(round_to_precision(-2.0, 9), -2.0);
    }

    #[test]
    fn test_round_repeating_decimal() {
        assert_eq!(round_to_precision(1.0 / 3.0, 9), 0.333333333);
        assert_eq!(round_to_precision(2.0 / 3.0, 9), 0.666666667);
    }

    #[test]
    fn test_round_ties_towards_positive_infinity() {
        assert_eq!(round_to_precision(2.5, 0), 3.0);
        assert_eq!(round_to_precision(-2.5, 0), -2.0);
    }

    #[test]
    fn test_round_huge_values_unchanged() {
        assert_eq!(round_to_precision(1e300, 9), 1e300);
        assert_eq!(round_to_precision(-1e300, 9), -1e300);
    }

    #[test]
    fn test_round_infinity_passes_through() {
        assert!(round_to_precision(f64::INFINITY, 9).is_infinite());
    }

    proptest! {
        #[test]
        fn prop_operand_text_roundtrips(value in -1e25f64..1e25) {
            let text = operand_text(value);
            let parsed = parse_operand(&text).unwrap();
            if value == 0.0 {
                prop_assert_eq!(parsed, 0.0);
            } else {
                prop_assert_eq!(parsed, value);
            }
        }

        #[test]
        fn prop_rounding_is_idempotent(value in -1e6f64..1e6) {
            let once = round_to_precision(value, DEFAULT_PRECISION);
            let twice = round_to_precision(once, DEFAULT_PRECISION);
            prop_assert!((once - twice).abs() < 1e-9);
        }
    }
}
