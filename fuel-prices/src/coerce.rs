//! Numeric coercion of decoded API documents.
//!
//! The pricing API serializes every value as a string, with Spanish decimal
//! commas (`"1,459"`). Before any record is built the whole document is walked
//! once and each leaf that reads as a number is replaced by a JSON number.

use serde_json::{Number, Value};

/// Largest magnitude for which an integral `f64` is still an exact `i64`.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Recursively replace numeric leaves by integers or floats.
///
/// Strings such as `"15"` become `15`, `"12,50"` becomes `12.5`. Anything that
/// is not a plain decimal number (`"L-D: 24H"`, `""`, `"1e5"`) is kept as is.
pub fn coerce_numbers(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, coerce_numbers(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(coerce_numbers).collect()),
        Value::String(s) => parse_numeric(&s).unwrap_or(Value::String(s)),
        Value::Number(n) => match n.as_f64() {
            Some(f) if !n.is_i64() && !n.is_u64() => number_value(f),
            _ => Value::Number(n),
        },
        other => other,
    }
}

/// Parse a decimal string with either `.` or `,` as separator.
fn parse_numeric(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if !looks_numeric(trimmed) {
        return None;
    }

    let dotted = trimmed.replace(',', ".");
    if let Ok(i) = dotted.parse::<i64>() {
        return Some(Value::from(i));
    }

    dotted.parse::<f64>().ok().map(number_value)
}

/// Optional sign, digits, then at most one separator followed by digits.
fn looks_numeric(text: &str) -> bool {
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    let (int, frac) = match unsigned.split_once(['.', ',']) {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    !int.is_empty() && all_digits(int) && frac.is_none_or(|f| !f.is_empty() && all_digits(f))
}

fn number_value(f: f64) -> Value {
    if f.fract() == 0.0 && f.abs() < MAX_EXACT_FLOAT {
        return Value::from(f as i64);
    }
    Number::from_f64(f).map_or(Value::Null, Value::Number)
}
