//! Money formatting for human-readable output.

use rust_decimal::Decimal;
use rusty_money::{Money, iso};
use tracing::debug;

/// Formats `amount` in the given ISO currency (e.g. `$1,250.00`).
///
/// Unknown currency codes fall back to `"<amount> <code>"` with two decimal
/// places.
pub fn format_amount(amount: Decimal, currency_code: &str) -> String {
    match iso::find(currency_code) {
        Some(currency) => Money::from_decimal(amount, currency).to_string(),
        None => {
            debug!("Unknown currency code '{}', using plain formatting", currency_code);
            format!("{} {}", amount.round_dp(2), currency_code)
        }
    }
}

/// Whether `currency_code` is a known ISO 4217 code.
pub fn is_known_currency(currency_code: &str) -> bool {
    iso::find(currency_code).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_known_currency() {
        let text = format_amount(Decimal::new(125000, 2), "USD");
        assert!(text.contains("1,250.00"), "{}", text);
        assert!(text.contains('$'), "{}", text);
    }

    #[test]
    fn test_format_unknown_currency_falls_back() {
        assert_eq!(format_amount(Decimal::new(12346, 3), "XYZQ"), "12.35 XYZQ");
        assert!(!is_known_currency("XYZQ"));
        assert!(is_known_currency("EUR"));
    }
}
