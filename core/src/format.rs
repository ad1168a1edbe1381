//! Presentation formatting for counts, rates and currency.
//!
//! Every function takes the raw value by copy and returns a new string;
//! nothing here touches the underlying data.

use crate::types::{Percent, Ratio};

pub const CURRENCY_SYMBOL: &str = "$";

/// `12500` → `"12,500"`.
pub fn format_count(n: u64) -> String {
    group_thousands(&n.to_string())
}

/// Percent value already in 0–100: `7.0` → `"7.0%"`.
pub fn format_percent(value: Percent) -> String {
    format!("{value:.1}%")
}

/// Probability in [0, 1]: `0.78` → `"78.0%"`.
pub fn format_probability(p: Ratio) -> String {
    format_percent(p * 100.0)
}

/// Badge form with no decimals: `0.78` → `"78%"`.
pub fn format_probability_whole(p: Ratio) -> String {
    format!("{:.0}%", p * 100.0)
}

/// `2052.5` → `"$2,052.50"`.
pub fn format_currency(amount: f64) -> String {
    signed_currency(amount, &format!("{:.2}", amount.abs()), "")
}

/// `2052.4` → `"$2,052"`.
pub fn format_currency_whole(amount: f64) -> String {
    signed_currency(amount, &format!("{:.0}", amount.abs()), "")
}

/// `285000` → `"$285.0K"`.
pub fn format_currency_thousands(amount: f64) -> String {
    signed_currency(amount, &format!("{:.1}", amount.abs() / 1_000.0), "K")
}

/// `2_002_000` → `"$2.0M"`.
pub fn format_currency_millions(amount: f64) -> String {
    signed_currency(amount, &format!("{:.1}", amount.abs() / 1_000_000.0), "M")
}

pub fn format_months(months: u32) -> String {
    if months == 1 { "1 month".into() } else { format!("{months} months") }
}

fn signed_currency(amount: f64, digits: &str, suffix: &str) -> String {
    let grouped = group_thousands(digits);
    // Rounding can turn a tiny negative into zero; don't print "-$0.00".
    let sign = if amount < 0.0 && grouped.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        "-"
    } else {
        ""
    };
    format!("{sign}{CURRENCY_SYMBOL}{grouped}{suffix}")
}

/// Insert `,` separators into the integer part of an unsigned decimal string.
fn group_thousands(digits: &str) -> String {
    let (int_part, frac_part) = match digits.find('.') {
        Some(i) => digits.split_at(i),
        None => (digits, ""),
    };

    let mut out = String::with_capacity(digits.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push_str(frac_part);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping_handles_short_and_exact_multiples() {
        assert_eq!(group_thousands("7"), "7");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("123456"), "123,456");
        assert_eq!(group_thousands("1234567.89"), "1,234,567.89");
    }

    #[test]
    fn negative_zero_after_rounding_has_no_sign() {
        assert_eq!(format_currency(-0.001), "$0.00");
        assert_eq!(format_currency_thousands(-15_000.0), "-$15.0K");
    }
}
