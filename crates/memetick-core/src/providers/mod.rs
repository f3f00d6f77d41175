//! Quote provider adapters and the contract the resolver chains them by.

mod alphavantage;
mod yahoo;

pub use alphavantage::AlphaVantageSource;
pub use yahoo::YahooChartSource;

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{ProviderId, QuoteRecord, Ticker};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    RateLimited,
    NoQuote,
    Internal,
}

/// Structured provider error consumed by the resolver's fall-through loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
        }
    }

    pub fn no_quote(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::NoQuote,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "provider.unavailable",
            SourceErrorKind::RateLimited => "provider.rate_limited",
            SourceErrorKind::NoQuote => "provider.no_quote",
            SourceErrorKind::Internal => "provider.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Quote provider contract.
///
/// Each tier of the retrieval chain implements this; the resolver consults
/// them in order and the first usable (positive-price) record wins. Any
/// error is that tier's failure, never the run's.
pub trait QuoteSource: Send + Sync {
    /// Unique provider identifier.
    fn id(&self) -> ProviderId;

    /// Whether the source can currently be consulted at all; the keyed
    /// provider reports `false` when no API key is configured.
    fn available(&self) -> bool {
        true
    }

    /// Fetch the current quote for one ticker.
    fn quote<'a>(
        &'a self,
        ticker: &'a Ticker,
    ) -> Pin<Box<dyn Future<Output = Result<QuoteRecord, SourceError>> + Send + 'a>>;
}
