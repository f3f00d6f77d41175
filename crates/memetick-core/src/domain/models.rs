use serde::{Deserialize, Serialize};

use crate::{ProviderId, Ticker, ValidationError};

/// Which harvested source a candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateOrigin {
    SentimentSite,
    ForumPost,
}

/// A harvested ticker candidate with its accumulated confidence weight.
///
/// Weights come from the extraction scoring rules: dollar-prefixed forum
/// mentions score 3, known bare mentions 2, plausible unknown mentions 1,
/// sentiment-page hits 1. Candidates live only for the duration of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerCandidate {
    pub ticker: Ticker,
    pub origin: CandidateOrigin,
    pub weight: u32,
}

impl TickerCandidate {
    pub fn new(ticker: Ticker, origin: CandidateOrigin, weight: u32) -> Self {
        Self {
            ticker,
            origin,
            weight,
        }
    }
}

/// One forum post's text content; only title and body are consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumPost {
    pub title: String,
    pub body: String,
}

impl ForumPost {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Combined text the extractor scans.
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}

/// Normalized quote snapshot for one ticker.
///
/// `None` fields mean the value was unavailable from every consulted
/// provider. `change_percent` is fixed at 0 when the price itself is
/// unavailable; ranking treats such entries as lowest priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub ticker: Ticker,
    pub price: Option<f64>,
    pub previous_close: Option<f64>,
    pub change_percent: f64,
    pub volume: Option<u64>,
    pub market_cap: Option<f64>,
}

impl QuoteRecord {
    pub fn new(
        ticker: Ticker,
        price: Option<f64>,
        previous_close: Option<f64>,
        change_percent: f64,
        volume: Option<u64>,
        market_cap: Option<f64>,
    ) -> Result<Self, ValidationError> {
        validate_optional_non_negative("price", price)?;
        validate_optional_non_negative("previous_close", previous_close)?;
        validate_finite("change_percent", change_percent)?;
        validate_optional_non_negative("market_cap", market_cap)?;

        Ok(Self {
            ticker,
            price,
            previous_close,
            change_percent,
            volume,
            market_cap,
        })
    }

    /// Record for a ticker no provider could price.
    pub fn unavailable(ticker: Ticker) -> Self {
        Self {
            ticker,
            price: None,
            previous_close: None,
            change_percent: 0.0,
            volume: None,
            market_cap: None,
        }
    }

    /// Nominal stand-in for a known ticker both providers failed on, so the
    /// symbol is not dropped purely due to API flakiness.
    pub fn placeholder(ticker: Ticker) -> Self {
        Self {
            ticker,
            price: Some(100.0),
            previous_close: Some(99.0),
            change_percent: 1.0,
            volume: Some(1_000_000),
            market_cap: None,
        }
    }

    /// Deterministic stand-in used by the emergency fallback when the whole
    /// candidate pool yielded nothing; pricing derives from symbol length.
    pub fn emergency(ticker: Ticker) -> Self {
        let len = ticker.len() as f64;
        Self {
            ticker,
            price: Some(100.0 + len),
            previous_close: Some(99.0 + len),
            change_percent: 1.0,
            volume: Some(1_000_000),
            market_cap: None,
        }
    }

    /// Whether the record carries a usable (positive) price.
    pub fn has_price(&self) -> bool {
        matches!(self.price, Some(price) if price > 0.0)
    }
}

/// Where a resolved record's data actually came from.
///
/// The tag travels with the record so degraded output stays distinguishable
/// from live data all the way into the digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Live(ProviderId),
    Synthetic,
    Unavailable,
}

/// A quote record paired with its provenance tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedQuote {
    pub record: QuoteRecord,
    pub provenance: Provenance,
}

impl ResolvedQuote {
    pub fn new(record: QuoteRecord, provenance: Provenance) -> Self {
        Self { record, provenance }
    }

    pub fn is_live(&self) -> bool {
        matches!(self.provenance, Provenance::Live(_))
    }

    pub fn has_price(&self) -> bool {
        self.record.has_price()
    }
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    validate_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

fn validate_optional_non_negative(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    if let Some(value) = value {
        validate_non_negative(field, value)?;
    }
    Ok(())
}
