use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::DigestConfig;
use crate::dispatch::{DigestMessage, ReportTransport};
use crate::extract::TickerExtractor;
use crate::harvest::{ForumClient, SentimentPageClient};
use crate::http_client::HttpClient;
use crate::lexicon::Lexicon;
use crate::providers::{AlphaVantageSource, QuoteSource, YahooChartSource};
use crate::report::{digest_subject, render_digest};
use crate::resolver::QuoteResolver;
use crate::selection::{gather_pool, rank, select, SelectionPolicy};
use crate::{ResolvedQuote, UtcDateTime};

// Fallback addressing for transports that do not deliver anywhere real.
const LOCAL_ADDRESS: &str = "digest@localhost";

/// Outcome of one pipeline run; producing this never fails.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: UtcDateTime,
    pub entries: Vec<ResolvedQuote>,
    /// True when any reported entry is synthetic.
    pub degraded: bool,
    pub dispatched: bool,
    pub site_candidates: usize,
    pub forum_candidates: usize,
}

/// The full harvest → resolve → rank → render → dispatch pipeline.
///
/// One instance per process; [`DigestPipeline::run_once`] is the no-argument
/// entry point an external scheduler triggers. Every run produces and
/// attempts to deliver a report, degrading to synthetic data rather than
/// failing.
pub struct DigestPipeline {
    site: SentimentPageClient,
    forum: ForumClient,
    extractor: TickerExtractor,
    resolver: QuoteResolver,
    lexicon: Arc<Lexicon>,
    policy: SelectionPolicy,
    transport: Arc<dyn ReportTransport>,
    email_to: String,
    email_from: String,
}

impl DigestPipeline {
    /// Wire the standard provider chain and harvest clients from config.
    pub fn from_config(
        config: &DigestConfig,
        http: Arc<dyn HttpClient>,
        transport: Arc<dyn ReportTransport>,
    ) -> Self {
        let lexicon = Arc::new(Lexicon::builtin());
        let chain: Vec<Arc<dyn QuoteSource>> = vec![
            Arc::new(AlphaVantageSource::new(
                http.clone(),
                config.alphavantage_api_key.clone(),
            )),
            Arc::new(YahooChartSource::new(http.clone())),
        ];

        Self {
            site: SentimentPageClient::new(http.clone(), config.sentiment_url.clone()),
            forum: ForumClient::new(http, config.community.clone(), config.post_limit),
            extractor: TickerExtractor::new(lexicon.clone()),
            resolver: QuoteResolver::new(chain, lexicon.clone()),
            lexicon,
            policy: SelectionPolicy::default(),
            transport,
            email_to: config
                .email_to
                .clone()
                .unwrap_or_else(|| String::from(LOCAL_ADDRESS)),
            email_from: config
                .email_from
                .clone()
                .unwrap_or_else(|| String::from(LOCAL_ADDRESS)),
        }
    }

    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run the whole pipeline once.
    pub async fn run_once(&self) -> RunReport {
        info!("starting digest run");

        let site_candidates = match self.site.fetch_page_text().await {
            Ok(text) => self.extractor.scan_page(&text),
            Err(error) => {
                warn!(%error, "sentiment source unavailable; continuing without it");
                Vec::new()
            }
        };

        let forum_candidates = match self.forum.fetch_hot_posts().await {
            Ok(posts) => self.extractor.scan_posts(&posts),
            Err(error) => {
                warn!(%error, "forum source unavailable; continuing without it");
                Vec::new()
            }
        };

        info!(
            site = site_candidates.len(),
            forum = forum_candidates.len(),
            "harvested candidates"
        );

        let pool = gather_pool(&site_candidates, &forum_candidates, &self.lexicon);
        let mut selection = select(&self.resolver, &pool, &self.policy).await;
        rank(&mut selection.entries);

        let generated_at = UtcDateTime::now();
        let html = render_digest(&selection.entries, generated_at.into_inner());
        let dispatched = self.dispatch(html, generated_at).await;

        info!(
            entries = selection.entries.len(),
            degraded = selection.degraded,
            dispatched,
            "digest run finished"
        );

        RunReport {
            generated_at,
            entries: selection.entries,
            degraded: selection.degraded,
            dispatched,
            site_candidates: site_candidates.len(),
            forum_candidates: forum_candidates.len(),
        }
    }

    async fn dispatch(&self, html: String, generated_at: UtcDateTime) -> bool {
        let message = match DigestMessage::new(
            self.email_to.as_str(),
            self.email_from.as_str(),
            digest_subject(generated_at.into_inner()),
            html,
        ) {
            Ok(message) => message,
            Err(error) => {
                error!(%error, "digest message could not be built");
                return false;
            }
        };

        match self.transport.send(&message).await {
            Ok(()) => {
                info!(to = %message.to, "digest dispatched");
                true
            }
            Err(error) => {
                error!(%error, "digest dispatch failed");
                false
            }
        }
    }
}
