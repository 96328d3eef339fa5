//! Locale-formatted currency parsing
//!
//! Tariff values arrive from the portal as strings like `"$0.1812"` or
//! `"$1,234.56"`. This module strips the currency symbol and parses the
//! remainder under the portal's en-AU convention (comma thousands separator,
//! dot decimal point).

use crate::error::{OutlookError, Result};

/// Parse a dollar amount, with or without a leading `$`, into a float.
pub fn parse_dollars(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let amount = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let normalized = amount.replace(',', "");
    normalized
        .parse::<f64>()
        .map_err(|_| OutlookError::parse(format!("Not a currency amount: {text:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_amounts() {
        assert_eq!(parse_dollars("$12.34").unwrap(), 12.34);
        assert_eq!(parse_dollars("12.34").unwrap(), 12.34);
        assert_eq!(parse_dollars("$0.1812").unwrap(), 0.1812);
    }

    #[test]
    fn parses_thousands_separators() {
        assert_eq!(parse_dollars("$1,234.56").unwrap(), 1234.56);
        assert_eq!(parse_dollars(" $2,000 ").unwrap(), 2000.0);
    }

    #[test]
    fn rejects_non_numeric() {
        assert!(parse_dollars("").is_err());
        assert!(parse_dollars("$").is_err());
        assert!(parse_dollars("$abc").is_err());
        assert!(parse_dollars("12.3.4").is_err());
    }
}
