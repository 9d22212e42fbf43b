//! Lenient number parsing for loosely typed ad-tech JSON.
//!
//! Strings are read the way a browser's `parseFloat`/`parseInt` reads them:
//! leading whitespace is skipped and the longest numeric prefix wins, so
//! `"300px"` is 300. A string with no numeric prefix does not parse.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::openrtb::NumericField;

static FLOAT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("float prefix pattern should compile")
});

static INT_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+").expect("int prefix pattern should compile"));

/// Parse the leading float of `text`. Returns `None` where a browser yields NaN.
#[must_use]
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    // `f64::from_str` accepts "Infinity" in any case, so the match parses as-is.
    FLOAT_PREFIX
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Parse the leading integer of `text`. Returns `None` where a browser yields NaN.
#[must_use]
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    INT_PREFIX
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

impl NumericField {
    /// Value as a float, or `None` for non-numeric input.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Number(number) => number.as_f64(),
            Self::Text(text) => parse_float_prefix(text),
        }
    }

    /// Value truncated to a non-negative pixel count.
    #[must_use]
    pub fn as_pixels(&self) -> Option<u32> {
        let value = match self {
            Self::Number(number) => match number.as_i64() {
                Some(int) => int,
                None => {
                    let float = number.as_f64()?;
                    if !float.is_finite() {
                        return None;
                    }
                    // Truncation toward zero mirrors integer parsing of "300.7".
                    float.trunc() as i64
                }
            },
            Self::Text(text) => parse_int_prefix(text)?,
        };
        u32::try_from(value).ok()
    }

    /// The value as a browser would print it when coercing to a string.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::Number(number) => number
                .as_f64()
                .map_or_else(|| number.to_string(), format_js_number),
            Self::Text(text) => text.clone(),
        }
    }
}

/// Format `value` the way a browser's `Number.prototype.toString` does.
///
/// Plain notation for decimal exponents in `-7..21`, otherwise exponent
/// notation with an explicit sign (`1e+21`, `1.5e-7`).
#[must_use]
pub fn format_js_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    // `{:e}` yields the shortest round-trip digits, e.g. "1.2345e3".
    let scientific = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };

    let digits = mantissa.replace('.', "");
    let Ok(digit_count) = i32::try_from(digits.len()) else {
        return value.to_string();
    };
    // Position of the decimal point relative to the first digit.
    let point = exponent + 1;

    let body = if digit_count <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - digit_count).unsigned_abs() as usize))
    } else if 0 < point && point <= 21 {
        let (integral, fraction) = digits.split_at(point.unsigned_abs() as usize);
        format!("{integral}.{fraction}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
    } else {
        let (first, rest) = digits.split_at(1);
        let fraction = if rest.is_empty() {
            String::new()
        } else {
            format!(".{rest}")
        };
        let exponent_sign = if exponent < 0 { "-" } else { "+" };
        format!("{first}{fraction}e{exponent_sign}{}", exponent.unsigned_abs())
    };

    format!("{sign}{body}")
}
