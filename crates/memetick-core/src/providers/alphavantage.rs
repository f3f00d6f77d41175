use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::http_client::{HttpClient, HttpRequest};
use crate::providers::{QuoteSource, SourceError};
use crate::throttling::RateGate;
use crate::{ProviderId, QuoteRecord, Ticker};

const QUOTE_TIMEOUT_MS: u64 = 10_000;

/// Keyed quote provider backed by the GLOBAL_QUOTE endpoint.
///
/// First tier of the retrieval chain. Only consulted when an API key is
/// configured, and guarded by the free-tier quota gate; a denied acquire
/// fails the tier rather than waiting.
#[derive(Clone)]
pub struct AlphaVantageSource {
    http: Arc<dyn HttpClient>,
    api_key: Option<String>,
    gate: RateGate,
}

impl AlphaVantageSource {
    pub fn new(http: Arc<dyn HttpClient>, api_key: Option<String>) -> Self {
        Self {
            http,
            api_key,
            gate: RateGate::alphavantage_free_tier(),
        }
    }

    pub fn with_gate(mut self, gate: RateGate) -> Self {
        self.gate = gate;
        self
    }
}

impl QuoteSource for AlphaVantageSource {
    fn id(&self) -> ProviderId {
        ProviderId::Alphavantage
    }

    fn available(&self) -> bool {
        self.api_key.is_some()
    }

    fn quote<'a>(
        &'a self,
        ticker: &'a Ticker,
    ) -> Pin<Box<dyn Future<Output = Result<QuoteRecord, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let Some(api_key) = self.api_key.as_deref() else {
                return Err(SourceError::unavailable(
                    "alphavantage api key is not configured",
                ));
            };

            if !self.gate.try_acquire() {
                return Err(SourceError::rate_limited(
                    "alphavantage free-tier quota exhausted",
                ));
            }

            let endpoint = format!(
                "https://www.alphavantage.co/query?function=GLOBAL_QUOTE&symbol={}&apikey={}",
                urlencoding::encode(ticker.as_str()),
                urlencoding::encode(api_key)
            );

            let request = HttpRequest::get(&endpoint).with_timeout_ms(QUOTE_TIMEOUT_MS);
            let response = self.http.execute(request).await.map_err(|error| {
                SourceError::unavailable(format!(
                    "alphavantage transport error: {}",
                    error.message()
                ))
            })?;

            if !response.is_success() {
                return Err(SourceError::unavailable(format!(
                    "alphavantage returned status {}",
                    response.status
                )));
            }

            parse_global_quote(ticker, &response.body)
        })
    }
}

fn parse_global_quote(ticker: &Ticker, body: &str) -> Result<QuoteRecord, SourceError> {
    let payload: GlobalQuoteResponse = serde_json::from_str(body).map_err(|error| {
        SourceError::internal(format!("failed to parse alphavantage response: {error}"))
    })?;

    let Some(quote) = payload.quote else {
        return Err(SourceError::no_quote(
            "no Global Quote object in alphavantage response",
        ));
    };

    let Some(price) = parse_numeric(quote.price.as_deref()).filter(|price| *price > 0.0) else {
        return Err(SourceError::no_quote(
            "alphavantage quote has no positive price",
        ));
    };

    let previous_close = parse_numeric(quote.previous_close.as_deref()).unwrap_or(price);
    let change_percent = quote
        .change_percent
        .as_deref()
        .map(|raw| raw.trim().trim_end_matches('%'))
        .and_then(|raw| raw.parse::<f64>().ok())
        .unwrap_or(0.0);
    let volume = quote
        .volume
        .as_deref()
        .and_then(|raw| raw.trim().parse::<u64>().ok());

    QuoteRecord::new(
        ticker.clone(),
        Some(price),
        Some(previous_close),
        change_percent,
        volume,
        None,
    )
    .map_err(|error| SourceError::internal(error.to_string()))
}

fn parse_numeric(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
}

// Alpha Vantage formats every field as a string under numbered keys.
#[derive(Debug, Clone, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote", default)]
    quote: Option<GlobalQuotePayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct GlobalQuotePayload {
    #[serde(rename = "05. price", default)]
    price: Option<String>,
    #[serde(rename = "06. volume", default)]
    volume: Option<String>,
    #[serde(rename = "08. previous close", default)]
    previous_close: Option<String>,
    #[serde(rename = "10. change percent", default)]
    change_percent: Option<String>,
}
