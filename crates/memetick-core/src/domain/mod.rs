//! Canonical domain types for the digest pipeline.
//!
//! All models validate their invariants at construction time and are created,
//! used, and discarded within a single run; nothing here persists across
//! triggers.

mod models;
mod ticker;
mod timestamp;

pub use models::{
    CandidateOrigin, ForumPost, Provenance, QuoteRecord, ResolvedQuote, TickerCandidate,
};
pub use ticker::Ticker;
pub use timestamp::UtcDateTime;
