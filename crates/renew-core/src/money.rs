//! # Money Amounts
//!
//! Parsing for decimal amounts entered by operators (base prices and
//! discount percentages). Plain decimal notation only; no currency symbols
//! or thousands separators.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::ValidationError;

/// Parse a decimal amount, keeping every supplied digit.
pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed).map_err(|e| ValidationError::InvalidAmount {
        input: raw.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_scale() {
        let amount = parse_amount("49.990").unwrap();
        assert_eq!(amount, Decimal::new(4_999, 2));
        assert_eq!(amount.scale(), 3);
    }

    #[test]
    fn accepts_negative_and_whitespace() {
        assert_eq!(parse_amount(" -50 ").unwrap(), Decimal::from(-50));
    }

    #[test]
    fn rejects_currency_symbols() {
        let err = parse_amount("$10").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAmount { ref input, .. } if input == "$10"));
    }
}
