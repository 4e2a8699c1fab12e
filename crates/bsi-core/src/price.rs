//! Price labels in the `es-AR` currency style (`$ 12.345`, `$ 1.234,5`).

/// Formats an ARS amount: dot thousands separator, comma decimals, at most
/// two decimals and none when the amount is whole.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_price(amount: f64) -> String {
    if !amount.is_finite() {
        return "$ 0".to_string();
    }
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

    let mut label = format!("{sign}$ {}", group_thousands(whole));
    if fraction != 0 {
        if fraction % 10 == 0 {
            label.push_str(&format!(",{}", fraction / 10));
        } else {
            label.push_str(&format!(",{fraction:02}"));
        }
    }
    label
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
