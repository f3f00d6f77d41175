use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_TICKER_LEN: usize = 5;

/// Normalized stock ticker: 1-5 uppercase ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Parse and normalize a ticker to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyTicker);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_TICKER_LEN {
            return Err(ValidationError::TickerTooLong {
                len,
                max: MAX_TICKER_LEN,
            });
        }

        for (index, ch) in normalized.chars().enumerate() {
            if !ch.is_ascii_uppercase() {
                return Err(ValidationError::TickerInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    /// Strip everything that is not an ASCII letter, then parse.
    ///
    /// This is the pre-resolution scrub applied to raw candidate strings:
    /// `" $gme "` becomes `GME`. Scrubbing an input with no letters left, or
    /// more than five, is a validation error.
    pub fn scrub(input: &str) -> Result<Self, ValidationError> {
        let letters = input
            .to_ascii_uppercase()
            .chars()
            .filter(char::is_ascii_uppercase)
            .collect::<String>();
        Self::parse(&letters)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Ticker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Ticker {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Ticker {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Ticker> for String {
    fn from(value: Ticker) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_ticker() {
        let parsed = Ticker::parse(" gme ").expect("ticker should parse");
        assert_eq!(parsed.as_str(), "GME");
    }

    #[test]
    fn rejects_empty_and_overlong() {
        assert!(matches!(
            Ticker::parse("  "),
            Err(ValidationError::EmptyTicker)
        ));
        assert!(matches!(
            Ticker::parse("TOOLONG"),
            Err(ValidationError::TickerTooLong { len: 7, max: 5 })
        ));
    }

    #[test]
    fn rejects_non_letter_characters() {
        let err = Ticker::parse("BRK.B").expect_err("must fail");
        assert!(matches!(err, ValidationError::TickerInvalidChar { .. }));
    }

    #[test]
    fn scrub_strips_to_letters() {
        assert_eq!(Ticker::scrub("$gme!").expect("valid").as_str(), "GME");
        assert!(matches!(
            Ticker::scrub("$123"),
            Err(ValidationError::EmptyTicker)
        ));
        assert!(matches!(
            Ticker::scrub("TOO-LONG-BY-FAR"),
            Err(ValidationError::TickerTooLong { .. })
        ));
    }
}
