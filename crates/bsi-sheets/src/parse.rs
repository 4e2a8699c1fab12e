//! Lenient cell parsing for spreadsheet values.
//!
//! Sheet cells are typed by whoever filled them in, so numeric columns are
//! read the way a browser's `parseFloat`/`parseInt` would read them: leading
//! whitespace skipped, the longest numeric prefix taken, trailing text
//! ignored. Anything that yields no number is `None`; callers decide the
//! default.

use serde_json::Value;

/// Non-blank text content of a cell. Numbers are rendered as text; null,
/// booleans and containers yield `None`.
#[must_use]
pub fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// JavaScript truthiness of a cell: non-empty strings, non-zero numbers and
/// `true`.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Checkbox semantics: JSON `true` or the text `"true"` in any case.
#[must_use]
pub fn is_checked(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Float value of a cell, `parseFloat`-style.
#[must_use]
pub fn cell_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    }
    .filter(|f| f.is_finite())
}

/// Integer value of a cell, `parseInt(.., 10)`-style. Fractional numbers
/// are truncated toward zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn cell_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    }
}

/// Parses the longest decimal prefix of `s`: optional sign, digits, optional
/// fraction, optional exponent.
#[must_use]
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0usize;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Parses the longest integer prefix of `s`: optional sign then digits.
///
/// Digit runs too long for `i64` saturate instead of failing.
#[must_use]
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0usize;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    // Only overflow can fail once the prefix is known to be sign + digits.
    Some(s[..end].parse::<i64>().unwrap_or(if bytes[0] == b'-' {
        i64::MIN
    } else {
        i64::MAX
    }))
}

/// Splits a delimited list cell (`"Negro, Rojo / Azul"`) into trimmed,
/// non-empty entries.
#[must_use]
pub fn split_list(value: &Value) -> Vec<String> {
    cell_text(value)
        .map(|text| {
            text.split([',', ';', '/', '|'])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}
