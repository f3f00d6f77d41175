use std::sync::Arc;

use tracing::{debug, warn};

use crate::lexicon::Lexicon;
use crate::providers::QuoteSource;
use crate::{Provenance, QuoteRecord, ResolvedQuote, Ticker, ValidationError};

/// Tiered quote retrieval: an ordered provider chain, then a synthetic
/// placeholder for known tickers, then an unavailable record.
///
/// Each tier is attempted only when the previous produced no usable price.
/// Provider errors are logged and swallowed; resolution itself never fails
/// for a valid ticker.
pub struct QuoteResolver {
    chain: Vec<Arc<dyn QuoteSource>>,
    lexicon: Arc<Lexicon>,
}

impl QuoteResolver {
    pub fn new(chain: Vec<Arc<dyn QuoteSource>>, lexicon: Arc<Lexicon>) -> Self {
        Self { chain, lexicon }
    }

    /// Scrub a raw symbol to uppercase letters, then resolve it.
    ///
    /// Inputs that scrub to nothing, or to more than five letters, are
    /// invalid and never reach the provider chain.
    pub async fn resolve_str(&self, raw: &str) -> Result<ResolvedQuote, ValidationError> {
        let ticker = Ticker::scrub(raw)?;
        Ok(self.resolve(&ticker).await)
    }

    pub async fn resolve(&self, ticker: &Ticker) -> ResolvedQuote {
        for source in &self.chain {
            if !source.available() {
                debug!(provider = %source.id(), %ticker, "skipping unavailable provider");
                continue;
            }

            match source.quote(ticker).await {
                Ok(record) if record.has_price() => {
                    debug!(
                        provider = %source.id(),
                        %ticker,
                        price = record.price,
                        "provider returned quote"
                    );
                    return ResolvedQuote::new(record, Provenance::Live(source.id()));
                }
                Ok(_) => {
                    debug!(provider = %source.id(), %ticker, "provider returned no usable price");
                }
                Err(error) => {
                    warn!(provider = %source.id(), %ticker, %error, "provider tier failed");
                }
            }
        }

        if self.lexicon.is_known(ticker.as_str()) {
            debug!(%ticker, "all providers failed; synthesizing placeholder for known ticker");
            return ResolvedQuote::new(
                QuoteRecord::placeholder(ticker.clone()),
                Provenance::Synthetic,
            );
        }

        ResolvedQuote::new(
            QuoteRecord::unavailable(ticker.clone()),
            Provenance::Unavailable,
        )
    }
}
