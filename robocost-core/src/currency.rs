//! `fr-FR` number and currency rendering.
//!
//! Mirrors what `Intl.NumberFormat("fr-FR", { style: "currency", currency: "EUR" })`
//! produces: narrow no-break space between thousands groups, comma as decimal
//! separator, and a no-break space before the euro sign.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// U+202F, used between groups of thousands.
pub const GROUP_SEPARATOR: char = '\u{202f}';
/// U+00A0, used between the amount and the currency symbol.
pub const CURRENCY_SPACING: char = '\u{a0}';
pub const DECIMAL_SEPARATOR: char = ',';

/// Rounds half-up (ties go away from zero) to `decimals` places.
///
/// The rounding runs on the shortest decimal form of `value`, so `1.005`
/// rounds to `1.01` even though its binary form is slightly below the tie.
/// Values outside the `Decimal` range are returned unchanged.
pub fn round_half_up(value: f64, decimals: u32) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Formats an amount as euros, e.g. `10 500,00 €`.
pub fn format_eur(amount: f64) -> String {
    let rendered = format!("{:.2}", round_half_up(amount.abs(), 2));
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));
    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.bytes().all(|b| b == b'0');
    let sign = if amount < 0.0 && !is_zero { "-" } else { "" };
    format!(
        "{sign}{}{DECIMAL_SEPARATOR}{frac_part}{CURRENCY_SPACING}€",
        group_thousands(int_part)
    )
}

/// Formats a plain number with at most `max_decimals` decimals, dropping
/// trailing zeros: `1000.0` gives `1 000`, `1.20` gives `1,2`.
pub fn format_decimal(value: f64, max_decimals: usize) -> String {
    let rendered = format!("{:.*}", max_decimals, value.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    let mut out = String::new();
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(frac_part);
    }
    out
}

/// Inserts group separators into a string of ASCII digits.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * GROUP_SEPARATOR.len_utf8());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}
