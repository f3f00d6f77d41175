use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::http_client::{HttpClient, HttpRequest};
use crate::providers::{QuoteSource, SourceError};
use crate::{ProviderId, QuoteRecord, Ticker};

const QUOTE_TIMEOUT_MS: u64 = 10_000;

// Yahoo's chart endpoint rejects requests without a browser-looking agent.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Unauthenticated chart-endpoint provider, second tier of the chain.
#[derive(Clone)]
pub struct YahooChartSource {
    http: Arc<dyn HttpClient>,
}

impl YahooChartSource {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }
}

impl QuoteSource for YahooChartSource {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn quote<'a>(
        &'a self,
        ticker: &'a Ticker,
    ) -> Pin<Box<dyn Future<Output = Result<QuoteRecord, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let endpoint = format!(
                "https://query1.finance.yahoo.com/v8/finance/chart/{}",
                urlencoding::encode(ticker.as_str())
            );

            let request = HttpRequest::get(&endpoint)
                .with_header("user-agent", BROWSER_USER_AGENT)
                .with_timeout_ms(QUOTE_TIMEOUT_MS);

            let response = self.http.execute(request).await.map_err(|error| {
                SourceError::unavailable(format!("yahoo transport error: {}", error.message()))
            })?;

            if !response.is_success() {
                return Err(SourceError::unavailable(format!(
                    "yahoo returned status {}",
                    response.status
                )));
            }

            if response.body.trim().is_empty() {
                return Err(SourceError::no_quote("yahoo returned an empty body"));
            }

            parse_chart_meta(ticker, &response.body)
        })
    }
}

fn parse_chart_meta(ticker: &Ticker, body: &str) -> Result<QuoteRecord, SourceError> {
    let payload: ChartResponse = serde_json::from_str(body).map_err(|error| {
        SourceError::internal(format!("failed to parse yahoo chart response: {error}"))
    })?;

    if payload.chart.error.is_some() {
        return Err(SourceError::no_quote("yahoo chart reported an error"));
    }

    let meta = payload
        .chart
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .map(|result| result.meta)
        .ok_or_else(|| SourceError::no_quote("no chart result in yahoo response"))?;

    let Some(price) = meta.regular_market_price.filter(|price| *price > 0.0) else {
        return Err(SourceError::no_quote("yahoo quote has no positive price"));
    };

    let previous_close = meta.previous_close.unwrap_or(price);
    let change_percent = if previous_close > 0.0 {
        (price - previous_close) / previous_close * 100.0
    } else {
        0.0
    };

    QuoteRecord::new(
        ticker.clone(),
        Some(price),
        Some(previous_close),
        change_percent,
        meta.regular_market_volume,
        meta.market_cap,
    )
    .map_err(|error| SourceError::internal(error.to_string()))
}

#[derive(Debug, Clone, Deserialize)]
struct ChartResponse {
    chart: ChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartData {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartMeta {
    #[serde(rename = "regularMarketPrice", default)]
    regular_market_price: Option<f64>,
    #[serde(rename = "previousClose", default)]
    previous_close: Option<f64>,
    #[serde(rename = "regularMarketVolume", default)]
    regular_market_volume: Option<u64>,
    #[serde(rename = "marketCap", default)]
    market_cap: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{HttpError, HttpResponse};
    use crate::providers::SourceErrorKind;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct RecordingHttpClient {
        response: Result<HttpResponse, HttpError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl RecordingHttpClient {
        fn returning(body: &str) -> Self {
            Self {
                response: Ok(HttpResponse::ok_json(body)),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .clone()
        }
    }

    impl HttpClient for RecordingHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    fn chart_body(price: f64, previous_close: f64) -> String {
        format!(
            r#"{{"chart":{{"result":[{{"meta":{{
                "regularMarketPrice": {price},
                "previousClose": {previous_close},
                "regularMarketVolume": 7000000,
                "marketCap": 12000000000.0
            }}}}],"error":null}}}}"#
        )
    }

    fn ticker(raw: &str) -> Ticker {
        Ticker::parse(raw).expect("test ticker is valid")
    }

    #[tokio::test]
    async fn parses_chart_meta_and_computes_change() {
        let client = Arc::new(RecordingHttpClient::returning(&chart_body(110.0, 100.0)));
        let source = YahooChartSource::new(client);

        let record = source
            .quote(&ticker("GME"))
            .await
            .expect("quote should succeed");

        assert_eq!(record.price, Some(110.0));
        assert_eq!(record.previous_close, Some(100.0));
        assert!((record.change_percent - 10.0).abs() < 1e-9);
        assert_eq!(record.volume, Some(7_000_000));
        assert_eq!(record.market_cap, Some(12_000_000_000.0));
    }

    #[tokio::test]
    async fn zero_previous_close_yields_zero_change() {
        let client = Arc::new(RecordingHttpClient::returning(&chart_body(110.0, 0.0)));
        let source = YahooChartSource::new(client);

        let record = source
            .quote(&ticker("GME"))
            .await
            .expect("quote should succeed");
        assert_eq!(record.change_percent, 0.0);
    }

    #[tokio::test]
    async fn missing_previous_close_mirrors_price() {
        let body = r#"{"chart":{"result":[{"meta":{"regularMarketPrice": 42.0}}],"error":null}}"#;
        let client = Arc::new(RecordingHttpClient::returning(body));
        let source = YahooChartSource::new(client);

        let record = source
            .quote(&ticker("WEN"))
            .await
            .expect("quote should succeed");
        assert_eq!(record.previous_close, Some(42.0));
        assert_eq!(record.change_percent, 0.0);
        assert_eq!(record.volume, None);
        assert_eq!(record.market_cap, None);
    }

    #[tokio::test]
    async fn chart_error_yields_no_quote() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found"}}}"#;
        let client = Arc::new(RecordingHttpClient::returning(body));
        let source = YahooChartSource::new(client);

        let error = source.quote(&ticker("ZZZZZ")).await.expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::NoQuote);
    }

    #[tokio::test]
    async fn empty_body_yields_no_quote() {
        let client = Arc::new(RecordingHttpClient::returning("   "));
        let source = YahooChartSource::new(client);

        let error = source.quote(&ticker("GME")).await.expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::NoQuote);
    }

    #[tokio::test]
    async fn request_carries_browser_user_agent() {
        let client = Arc::new(RecordingHttpClient::returning(&chart_body(10.0, 9.0)));
        let source = YahooChartSource::new(client.clone());

        source
            .quote(&ticker("GME"))
            .await
            .expect("quote should succeed");

        let requests = client.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0]
            .headers
            .get("user-agent")
            .is_some_and(|agent| agent.starts_with("Mozilla/5.0")));
    }
}
