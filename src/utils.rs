//! Conversions between loosely typed JSON input and the typed values an
//! expense is built from.

use serde::Serializer;
use serde_json::Value;

/// `null`, `false`, `0` and `""` are falsy, everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    return match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    };
}

/// Text form of a JSON value. Arrays join their elements with `,`, treating
/// `null` elements as empty. Objects have no meaningful text form.
pub fn to_text(value: &Value) -> String {
    return match value {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.as_f64().map(format_number).unwrap_or_default(),
        Value::String(s) => s.to_owned(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                item => to_text(item),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_owned(),
    };
}

/// Numeric value of a JSON value, `None` when it is not a number.
pub fn to_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric(s),
        Value::Array(_) => parse_numeric(&to_text(value)),
        Value::Object(_) => None,
    };

    return n.filter(|n| !n.is_nan());
}

/// Parses a numeric literal. Surrounding whitespace is ignored and a blank
/// string is zero. Accepts decimal and exponent forms, `Infinity`, and
/// unsigned `0x`, `0o` and `0b` integers.
pub fn parse_numeric(s: &str) -> Option<f64> {
    let s = s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');

    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };

    if let Some(radix) = radix {
        return parse_radix(&s[2..], radix);
    }

    let is_decimal_literal = s.chars().any(|c| c.is_ascii_digit())
        && s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));

    if !is_decimal_literal {
        return None;
    }

    return s.parse::<f64>().ok();
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }

    return digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
    });
}

/// Shortest text form of a number: integral values without a fraction,
/// exponent notation outside `[1e-6, 1e21)`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if n == 0.0 {
        return "0".to_owned();
    }

    let abs = n.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let formatted = format!("{n:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => formatted,
        };
    }

    return format!("{n}");
}

/// Writes a number the way a JSON number literal of that value reads:
/// integral values without `.0`, non-finite values as `null`.
pub fn serialize_js_number<S>(n: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if !n.is_finite() {
        return serializer.serialize_none();
    }

    if n.fract() == 0.0 && n.abs() < 9.0e18 {
        return serializer.serialize_i64(*n as i64);
    }

    return serializer.serialize_f64(*n);
}
