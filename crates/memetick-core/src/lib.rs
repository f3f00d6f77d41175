//! # Memetick Core
//!
//! Harvests trending ticker symbols from social sources, resolves them
//! against a tiered chain of quote providers, ranks the results, and renders
//! a daily HTML digest.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Environment-derived runtime configuration |
//! | [`dispatch`] | Digest delivery boundary (mail API, file, noop) |
//! | [`domain`] | Domain models (Ticker, QuoteRecord, ResolvedQuote) |
//! | [`extract`] | Ticker extraction and confidence scoring |
//! | [`harvest`] | Forum and sentiment-page content clients |
//! | [`http_client`] | HTTP client abstraction |
//! | [`lexicon`] | Rejection-word and known-ticker filter |
//! | [`pipeline`] | One-shot run orchestration |
//! | [`providers`] | Quote provider adapters |
//! | [`report`] | Momentum/risk analysis and HTML rendering |
//! | [`resolver`] | Tiered quote resolution with synthetic fallback |
//! | [`selection`] | Candidate pool gathering, probing, ranking |
//! | [`throttling`] | Rate limiting support |
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐
//! │ Forum posts  │   │ Sentiment    │
//! │ (hot N)      │   │ page text    │
//! └──────┬───────┘   └──────┬───────┘
//!        ▼                  ▼
//!   ┌─────────────────────────────┐     ┌─────────────┐
//!   │ Extractor (lexicon-scored)  │────▶│   Lexicon   │
//!   └──────────────┬──────────────┘     └─────────────┘
//!                  ▼
//!   ┌─────────────────────────────┐     ┌─────────────┐
//!   │ Selection (pool + backfill) │────▶│  Resolver   │──▶ providers
//!   └──────────────┬──────────────┘     └─────────────┘
//!                  ▼
//!   ┌─────────────────────────────┐
//!   │ Rank → Render → Dispatch    │
//!   └─────────────────────────────┘
//! ```
//!
//! Every run produces a report; failed sources degrade to empty candidate
//! lists, failed providers fall through tiers, and a fully dead pool yields
//! tagged synthetic data instead of no digest at all.

pub mod config;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod extract;
pub mod harvest;
pub mod http_client;
pub mod lexicon;
pub mod pipeline;
pub mod providers;
pub mod report;
pub mod resolver;
pub mod selection;
pub mod source;
pub mod throttling;

// Re-export commonly used types at crate root for convenience

pub use config::DigestConfig;

pub use dispatch::{
    DigestMessage, DispatchError, FileTransport, MailApiTransport, NoopTransport, ReportTransport,
};

pub use domain::{
    CandidateOrigin, ForumPost, Provenance, QuoteRecord, ResolvedQuote, Ticker, TickerCandidate,
    UtcDateTime,
};

pub use error::{CoreError, ValidationError};

pub use extract::TickerExtractor;

pub use harvest::{ForumClient, HarvestError, SentimentPageClient};

pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};

pub use lexicon::Lexicon;

pub use pipeline::{DigestPipeline, RunReport};

pub use providers::{
    AlphaVantageSource, QuoteSource, SourceError, SourceErrorKind, YahooChartSource,
};

pub use report::{
    digest_subject, render_digest, report_offset, Analysis, Momentum, Risk, REPORT_LIMIT,
};

pub use resolver::QuoteResolver;

pub use selection::{
    gather_pool, rank, select, DigestSelection, SelectionPolicy, EMERGENCY_TICKERS,
    POPULAR_BACKFILL,
};

pub use source::ProviderId;

pub use throttling::RateGate;
