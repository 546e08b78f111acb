//! Currency and quantity formatting
//!
//! Amounts use `.` to group thousands and `,` before the decimals regardless
//! of the host locale: `1234.5` becomes `R$ 1.234,50`.

use crate::constants;
use crate::records::finite_or_zero;

/// Format an amount with two decimals and the given currency symbol
pub fn format_currency(value: f64, symbol: &str) -> String {
    format!("{} {}", symbol, format_decimal(value, 2))
}

/// Format an amount with the default currency symbol (`R$`)
pub fn format_brl(value: f64) -> String {
    format_currency(value, constants::DEFAULT_CURRENCY_SYMBOL)
}

/// Format a quantity: whole numbers without decimals, otherwise two decimals
pub fn format_quantity(value: f64) -> String {
    let value = finite_or_zero(value);
    if value.fract() == 0.0 {
        format_decimal(value, 0)
    } else {
        format_decimal(value, 2)
    }
}

/// Render `value` with `decimals` places, `.` thousands and `,` decimal separator
fn format_decimal(value: f64, decimals: usize) -> String {
    let value = finite_or_zero(value);
    let rendered = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));

    // A value that rounds to zero gets no sign
    let is_zero = rendered.bytes().all(|b| b == b'0' || b == b'.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    let grouped = group_thousands(integer);
    if fraction.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{},{}", sign, grouped, fraction)
    }
}

/// Insert `.` every three digits from the right
fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
