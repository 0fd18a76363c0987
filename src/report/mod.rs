//! Report generation: plain-text renderings of the two rollup axes.
//!
//! Chilean conventions for amounts: CLP figures print with a `$` sign and
//! dot thousand separators and no decimals; quantities print with two
//! decimals.

/// Per-item APU report (category axis).
pub mod apu;
/// Whole-project detailed budget (hierarchy axis).
pub mod detailed;

pub use apu::ApuReport;
pub use detailed::{DetailedOptions, DetailedReport};

/// Formats a CLP amount: `1234567.8` → `$1.234.568`.
#[must_use]
pub fn format_clp(amount: f64) -> String {
    let negative = amount < 0.0;
    let rounded = amount.abs().round();
    let body = group_digits(&format!("{rounded:.0}"), '.');
    if negative {
        format!("-${body}")
    } else {
        format!("${body}")
    }
}

/// Formats a quantity with two decimals: `1250.5` → `1,250.50`.
#[must_use]
pub fn format_qty(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round();
    let whole = (cents / 100.0).floor();
    let frac = cents - whole * 100.0;
    let body = format!("{}.{frac:02.0}", group_digits(&format!("{whole:.0}"), ','));
    if negative { format!("-{body}") } else { body }
}

/// Inserts a thousands separator into a plain digit string.
fn group_digits(digits: &str, sep: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clp_uses_dot_separators() {
        assert_eq!(format_clp(0.0), "$0");
        assert_eq!(format_clp(999.0), "$999");
        assert_eq!(format_clp(1_234_567.8), "$1.234.568");
        assert_eq!(format_clp(-1500.0), "-$1.500");
    }

    #[test]
    fn test_format_qty_keeps_two_decimals() {
        assert_eq!(format_qty(1250.5), "1,250.50");
        assert_eq!(format_qty(3.0), "3.00");
        assert_eq!(format_qty(0.125), "0.13");
    }
}
