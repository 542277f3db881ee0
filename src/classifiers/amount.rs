use std::{str::FromStr, sync::LazyLock};

use regex::Regex;
use rust_decimal::Decimal;

use super::traits::AmountExtractor;
use crate::errors::SignalError;

// ASCII digits only; `\d` would also match Devanagari and other scripts.
// Comma runs are taken whole and not checked against any grouping, so
// "1,00,000" and "1,2345" both lose their separators.
const DEFAULT_PATTERN: &str = r"[0-9]+(?:,[0-9]+)*(?:\.[0-9]+)?";

static DEFAULT_AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_PATTERN).expect("default amount pattern is valid"));

/// First-match numeric extractor.
///
/// Takes the first numeric token in the body, so a date or phone number
/// that appears before the real amount wins.
#[derive(Debug, Clone)]
pub struct RegexAmountExtractor {
    pattern: Regex,
}

impl Default for RegexAmountExtractor {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_AMOUNT_RE.clone(),
        }
    }
}

impl RegexAmountExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a custom pattern. The whole match is parsed after removing `,`.
    pub fn with_pattern(pattern: &str) -> Result<Self, SignalError> {
        let pattern = Regex::new(pattern).map_err(|e| SignalError::InvalidPattern(e.to_string()))?;
        Ok(Self { pattern })
    }
}

impl AmountExtractor for RegexAmountExtractor {
    fn extract_amount(&self, body: &str) -> Option<Decimal> {
        let token = self.pattern.find(body)?;
        let cleaned: String = token.as_str().chars().filter(|c| *c != ',').collect();
        Decimal::from_str(&cleaned).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Your account credited INR 1,200.50", Some("1200.50"))]
    #[case("You spent Rs 45 at store", Some("45"))]
    #[case("Rs.500 debited", Some("500"))]
    #[case("Salary of 1,00,000 credited", Some("100000"))]
    #[case("Withdrawn 12345.", Some("12345"))]
    #[case("INR 3,50 refund", Some("350"))]
    #[case("Rs 1,2345 debited", Some("12345"))]
    #[case("खाते से १२३ Rs 500 debited", Some("500"))]
    #[case("رصيد ٤٥٠ credited 75.25", Some("75.25"))]
    #[case("Rs 500, 200 items", Some("500"))]
    #[case("no digits here", None)]
    #[case("", None)]
    fn test_extract_amount(#[case] body: &str, #[case] expected: Option<&str>) {
        let expected = expected.map(|e| Decimal::from_str(e).unwrap());
        assert_eq!(RegexAmountExtractor::new().extract_amount(body), expected);
    }

    #[test]
    fn test_first_number_wins() {
        // Known limitation: the date comes first.
        let amount = RegexAmountExtractor::new().extract_amount("On 12/10 Rs 900 debited");
        assert_eq!(amount, Some(Decimal::from(12)));
    }

    #[test]
    fn test_overflowing_token_is_absent() {
        let body = "ref 123456789012345678901234567890123 credited";
        assert_eq!(RegexAmountExtractor::new().extract_amount(body), None);
    }

    #[test]
    fn test_custom_pattern() {
        let extractor = RegexAmountExtractor::with_pattern(r"\d+\.\d{2}").unwrap();
        assert_eq!(
            extractor.extract_amount("OTP 4431, amount 99.00 debited"),
            Some(Decimal::from_str("99.00").unwrap())
        );
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            RegexAmountExtractor::with_pattern("(unclosed"),
            Err(SignalError::InvalidPattern(_))
        ));
    }
}
