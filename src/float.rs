//! Exact floating-point encoding.
//!
//! Numbers are written as plain decimal text whenever that text survives a
//! round through 14 significant digits. Everything else is written as a
//! mantissa/exponent pair `(m, e)` with `value == m * 2^e` exactly, so the
//! decoded `f64` is bit-identical to the original.
//!
//! ```rust
//! use serde_ace::float::{from_exact_pair, to_exact_pair};
//!
//! let value = 1.1234567890123321_f64;
//! let (mantissa, exponent) = to_exact_pair(value);
//! assert_eq!((mantissa, exponent), (5059599576362793, -52));
//! assert_eq!(from_exact_pair(mantissa as f64, exponent), value);
//! ```

/// Sentinel text for positive infinity.
pub const INFINITY: &str = "1.#INF";
/// Sentinel text for negative infinity.
pub const NEG_INFINITY: &str = "-1.#INF";

const SIGNIFICANT_DIGITS: i32 = 14;
const MANTISSA_BITS: i32 = 53;
const FRACTION_MASK: u64 = (1 << 52) - 1;

/// Decomposes a finite, non-zero `f64` into `(mantissa, exponent)`.
///
/// The mantissa is the significand normalized to `[0.5, 1)` and scaled by
/// `2^53`, the exponent is the binary exponent of that normalization minus
/// 53. Zero maps to `(0, 0)`; callers never encode it this way.
#[must_use]
pub fn to_exact_pair(value: f64) -> (i64, i32) {
    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7FF) as i32;
    let fraction = bits & FRACTION_MASK;

    let (magnitude, exponent) = if biased == 0 {
        if fraction == 0 {
            return (0, 0);
        }
        // Subnormal: shift the leading one up to bit 52.
        let shift = fraction.leading_zeros() as i32 - 11;
        (fraction << shift, -1021 - MANTISSA_BITS - shift)
    } else {
        (fraction | (1 << 52), biased - 1022 - MANTISSA_BITS)
    };

    let magnitude = magnitude as i64;
    if value.is_sign_negative() {
        (-magnitude, exponent)
    } else {
        (magnitude, exponent)
    }
}

/// Like [`to_exact_pair`], but never yields a zero exponent.
///
/// Decoders reject a pair with a zero component, which would otherwise make
/// integral values in `[2^52, 2^53)` unreadable. Those are written as
/// `(2m, -1)` instead, which denotes the same value.
pub(crate) fn to_wire_pair(value: f64) -> (i64, i32) {
    match to_exact_pair(value) {
        (mantissa, 0) => (mantissa * 2, -1),
        pair => pair,
    }
}

/// Computes `mantissa * 2^exponent` without intermediate overflow or underflow.
///
/// # Examples
///
/// ```rust
/// use serde_ace::float::from_exact_pair;
///
/// assert_eq!(from_exact_pair(3.0, -1), 1.5);
/// assert_eq!(from_exact_pair(1.0, -1074), f64::from_bits(1));
/// ```
#[must_use]
pub fn from_exact_pair(mantissa: f64, exponent: i32) -> f64 {
    let mut value = mantissa;
    let mut exponent = exponent;

    while exponent > 1023 {
        value *= pow2(1023);
        exponent -= 1023;
        if value.is_infinite() {
            return value;
        }
    }
    while exponent < -1022 {
        value *= pow2(-1022);
        exponent += 1022;
        if value == 0.0 {
            return value;
        }
    }

    value * pow2(exponent)
}

/// `2^exponent` for exponents in the normal range `-1022..=1023`.
fn pow2(exponent: i32) -> f64 {
    f64::from_bits(((exponent + 1023) as u64) << 52)
}

/// Shortest text that parses back to `value`, in positional notation.
#[inline]
pub(crate) fn plain_text(value: f64) -> String {
    value.to_string()
}

/// Formats `value` like C's `%.14g`.
///
/// Rounds to 14 significant digits, drops trailing zeros, and switches to
/// `d.ddde+XX` notation when the decimal exponent is below -4 or at least 14.
#[must_use]
pub fn format_g14(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    let negative = value.is_sign_negative();
    let (digits, point) = significant_digits(value.abs());

    let mut output = String::with_capacity(24);
    if negative {
        output.push('-');
    }

    let exponent = point - 1;
    let count = digits.len() as i32;
    let mut precision = SIGNIFICANT_DIGITS;
    if precision > count && count >= point {
        precision = count;
    }

    if exponent < -4 || exponent >= precision {
        write_exponential(&mut output, &digits, exponent);
    } else {
        let decimals = if SIGNIFICANT_DIGITS > point {
            (count - point).max(0)
        } else {
            (SIGNIFICANT_DIGITS - point).max(0)
        };
        write_fixed(&mut output, &digits, point, decimals);
    }

    output
}

/// Returns the decimal digits of `value` rounded to 14 significant digits
/// with trailing zeros removed, and the position of the decimal point
/// relative to the first digit.
fn significant_digits(value: f64) -> (Vec<u8>, i32) {
    if value == 0.0 {
        return (Vec::new(), 0);
    }

    // `{:.13e}` yields exactly 14 correctly rounded significant digits.
    let formatted = format!("{:.*e}", (SIGNIFICANT_DIGITS - 1) as usize, value);
    let (mantissa, exponent) = formatted.split_once('e').unwrap_or((&formatted, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let mut digits: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    while digits.last() == Some(&b'0') {
        digits.pop();
    }

    (digits, exponent + 1)
}

fn write_exponential(output: &mut String, digits: &[u8], exponent: i32) {
    output.push(digits[0] as char);
    if digits.len() > 1 {
        output.push('.');
        output.extend(digits[1..].iter().map(|&d| d as char));
    }
    output.push('e');
    output.push(if exponent < 0 { '-' } else { '+' });
    let magnitude = exponent.unsigned_abs();
    if magnitude < 10 {
        output.push('0');
    }
    output.push_str(&magnitude.to_string());
}

fn write_fixed(output: &mut String, digits: &[u8], point: i32, decimals: i32) {
    let digit_at = |i: i32| -> char {
        if i >= 0 && (i as usize) < digits.len() {
            digits[i as usize] as char
        } else {
            '0'
        }
    };

    if point > 0 {
        for i in 0..point {
            output.push(digit_at(i));
        }
    } else {
        output.push('0');
    }

    if decimals > 0 {
        output.push('.');
        for i in 0..decimals {
            output.push(digit_at(point + i));
        }
    }
}

/// Returns `true` if `value` must be written as an exact mantissa/exponent pair.
///
/// Infinities use their sentinel text and NaN has a stable textual form, so
/// only finite values are candidates.
#[must_use]
pub fn needs_exact_pair(value: f64) -> bool {
    value.is_finite() && format_g14(value) != plain_text(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_g14_fixed() {
        assert_eq!(format_g14(0.0), "0");
        assert_eq!(format_g14(-0.0), "-0");
        assert_eq!(format_g14(1.0), "1");
        assert_eq!(format_g14(2.456), "2.456");
        assert_eq!(format_g14(-42.5), "-42.5");
        assert_eq!(format_g14(0.0001), "0.0001");
        assert_eq!(format_g14(100.0), "100");
        assert_eq!(format_g14(12345678901234.0), "12345678901234");
    }

    #[test]
    fn test_format_g14_rounds() {
        assert_eq!(format_g14(1.1234567890123321), "1.1234567890123");
        assert_eq!(format_g14(0.1 + 0.2), "0.3");
        assert_eq!(format_g14(2.0 / 3.0), "0.66666666666667");
    }

    #[test]
    fn test_format_g14_exponential() {
        assert_eq!(format_g14(0.00001), "1e-05");
        assert_eq!(format_g14(1e20), "1e+20");
        assert_eq!(format_g14(123456789012346.0), "1.2345678901235e+14");
        assert_eq!(format_g14(1.5e-300), "1.5e-300");
    }

    #[test]
    fn test_needs_exact_pair() {
        assert!(!needs_exact_pair(42.0));
        assert!(!needs_exact_pair(2.456));
        assert!(!needs_exact_pair(-0.0));
        assert!(needs_exact_pair(1.1234567890123321));
        assert!(needs_exact_pair(0.1 + 0.2));
        assert!(needs_exact_pair(1e20));
        assert!(needs_exact_pair(0.00001));
        assert!(!needs_exact_pair(f64::INFINITY));
        assert!(!needs_exact_pair(f64::NAN));
    }

    #[test]
    fn test_exact_pair_normal() {
        assert_eq!(to_exact_pair(1.0), (1 << 52, -52));
        assert_eq!(to_exact_pair(-1.5), (-(3 << 51), -52));
        assert_eq!(to_exact_pair(1.1234567890123321), (5059599576362793, -52));
    }

    #[test]
    fn test_wire_pair_avoids_zero_exponent() {
        let value = 4503599627370497.0;
        assert_eq!(to_exact_pair(value), (4503599627370497, 0));
        assert_eq!(to_wire_pair(value), (9007199254740994, -1));
        assert_eq!(from_exact_pair(9007199254740994.0, -1), value);
    }

    #[test]
    fn test_exact_pair_subnormal() {
        let tiny = f64::from_bits(1);
        let (mantissa, exponent) = to_exact_pair(tiny);
        assert_eq!(mantissa, 1 << 52);
        assert_eq!(exponent, -1126);
        assert_eq!(from_exact_pair(mantissa as f64, exponent), tiny);
    }

    #[test]
    fn test_exact_pair_extremes() {
        for value in [f64::MAX, f64::MIN, f64::MIN_POSITIVE, -f64::MIN_POSITIVE / 3.0] {
            let (mantissa, exponent) = to_exact_pair(value);
            let back = from_exact_pair(mantissa as f64, exponent);
            assert_eq!(back.to_bits(), value.to_bits());
        }
    }

    #[test]
    fn test_from_exact_pair_saturates() {
        assert_eq!(from_exact_pair(1.0, 5000), f64::INFINITY);
        assert_eq!(from_exact_pair(1.0, -5000), 0.0);
    }
}
