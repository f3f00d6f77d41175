use std::cmp::Ordering;
use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::lexicon::Lexicon;
use crate::resolver::QuoteResolver;
use crate::{Provenance, QuoteRecord, ResolvedQuote, Ticker, TickerCandidate};

/// Appended to the harvested pool so a report can be produced even when both
/// sources come back empty.
pub const POPULAR_BACKFILL: [&str; 12] = [
    "TSLA", "AAPL", "NVDA", "GOOGL", "MSFT", "GME", "AMC", "PLTR", "RKT", "CLOV", "DNUT", "WEN",
];

/// Last resort when the entire pool yields zero valid quotes.
pub const EMERGENCY_TICKERS: [&str; 8] = [
    "TSLA", "AAPL", "NVDA", "GOOGL", "MSFT", "AMC", "GME", "PLTR",
];

/// Rank position for entries whose percent change is not a real number;
/// far below any plausible daily move.
const RANK_SENTINEL: f64 = -999.0;

/// Probe and report limits for one run.
#[derive(Debug, Clone)]
pub struct SelectionPolicy {
    /// How many pool entries may be probed for quotes.
    pub probe_limit: usize,
    /// How many valid entries end up in the digest.
    pub report_limit: usize,
    /// Pause between successive quote lookups, as rate-limit courtesy.
    pub probe_delay: Duration,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            probe_limit: 15,
            report_limit: 8,
            probe_delay: Duration::from_millis(200),
        }
    }
}

/// The validated, possibly degraded selection for one run.
#[derive(Debug, Clone)]
pub struct DigestSelection {
    pub entries: Vec<ResolvedQuote>,
    /// True when any entry is synthetic; consumers can tell a degraded run
    /// from a genuine one without inspecting placeholder value patterns.
    pub degraded: bool,
}

/// Build the probe pool: harvested candidates filtered to known tickers,
/// deduplicated preserving first-seen order, then the popular backfill.
pub fn gather_pool(
    site: &[TickerCandidate],
    forum: &[TickerCandidate],
    lexicon: &Lexicon,
) -> Vec<Ticker> {
    let mut seen = HashSet::new();
    let mut pool = Vec::new();

    for candidate in site.iter().chain(forum) {
        if !lexicon.is_known(candidate.ticker.as_str()) {
            continue;
        }
        if seen.insert(candidate.ticker.clone()) {
            pool.push(candidate.ticker.clone());
        }
    }

    for raw in POPULAR_BACKFILL {
        let ticker = Ticker::parse(raw).expect("backfill tickers are valid");
        if seen.insert(ticker.clone()) {
            pool.push(ticker);
        }
    }

    pool
}

/// Probe the pool sequentially until enough valid entries are collected.
///
/// Entries are accepted when they carry a positive price, live or synthetic.
/// Stops early at `report_limit` accepted entries so no quote calls are
/// wasted; falls back to fully synthetic records when the pool yields
/// nothing at all.
pub async fn select(
    resolver: &QuoteResolver,
    pool: &[Ticker],
    policy: &SelectionPolicy,
) -> DigestSelection {
    let mut entries: Vec<ResolvedQuote> = Vec::new();

    for (index, ticker) in pool.iter().take(policy.probe_limit).enumerate() {
        if index > 0 && !policy.probe_delay.is_zero() {
            tokio::time::sleep(policy.probe_delay).await;
        }

        let resolved = resolver.resolve(ticker).await;
        if resolved.has_price() {
            debug!(%ticker, price = resolved.record.price, "accepted ticker");
            entries.push(resolved);
        } else {
            debug!(%ticker, "no price data; skipping ticker");
        }

        if entries.len() >= policy.report_limit {
            break;
        }
    }

    if entries.is_empty() {
        warn!("no valid tickers found; falling back to emergency placeholder data");
        entries = EMERGENCY_TICKERS
            .iter()
            .map(|raw| {
                let ticker = Ticker::parse(raw).expect("emergency tickers are valid");
                ResolvedQuote::new(QuoteRecord::emergency(ticker), Provenance::Synthetic)
            })
            .collect();
    }

    let degraded = entries.iter().any(|entry| !entry.is_live());
    if degraded {
        info!(
            synthetic = entries.iter().filter(|entry| !entry.is_live()).count(),
            "selection contains synthetic entries"
        );
    }

    DigestSelection { entries, degraded }
}

/// Order entries by percent change, highest first.
///
/// The sort is stable and the comparator defensively ranks non-finite
/// percent changes below any real percentage, although post-selection
/// entries always carry finite values.
pub fn rank(entries: &mut [ResolvedQuote]) {
    entries.sort_by(|left, right| {
        sort_key(right)
            .partial_cmp(&sort_key(left))
            .unwrap_or(Ordering::Equal)
    });
}

fn sort_key(entry: &ResolvedQuote) -> f64 {
    let change = entry.record.change_percent;
    if change.is_finite() {
        change
    } else {
        RANK_SENTINEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CandidateOrigin, ProviderId};

    fn ticker(raw: &str) -> Ticker {
        Ticker::parse(raw).expect("test ticker is valid")
    }

    fn candidate(raw: &str, origin: CandidateOrigin) -> TickerCandidate {
        TickerCandidate::new(ticker(raw), origin, 1)
    }

    fn live_entry(raw: &str, change_percent: f64) -> ResolvedQuote {
        let record = QuoteRecord::new(
            ticker(raw),
            Some(50.0),
            Some(49.0),
            change_percent,
            None,
            None,
        )
        .expect("test record is valid");
        ResolvedQuote::new(record, Provenance::Live(ProviderId::Yahoo))
    }

    #[test]
    fn pool_keeps_known_candidates_in_first_seen_order() {
        let site = [
            candidate("GME", CandidateOrigin::SentimentSite),
            candidate("AAPL", CandidateOrigin::SentimentSite),
        ];
        let forum = [
            candidate("TSLA", CandidateOrigin::ForumPost),
            candidate("GME", CandidateOrigin::ForumPost),
        ];

        let pool = gather_pool(&site, &forum, &Lexicon::builtin());

        assert_eq!(pool[0].as_str(), "GME");
        assert_eq!(pool[1].as_str(), "AAPL");
        assert_eq!(pool[2].as_str(), "TSLA");
        // Backfill follows, deduplicated against the harvested entries.
        assert!(pool.len() > 3);
        assert_eq!(
            pool.iter().filter(|entry| entry.as_str() == "GME").count(),
            1
        );
        assert_eq!(pool[3].as_str(), "NVDA");
    }

    #[test]
    fn pool_drops_unknown_candidates() {
        let site = [candidate("XYZAB", CandidateOrigin::SentimentSite)];
        let pool = gather_pool(&site, &[], &Lexicon::builtin());
        assert!(pool.iter().all(|entry| entry.as_str() != "XYZAB"));
    }

    #[test]
    fn empty_sources_still_produce_a_backfill_pool() {
        let pool = gather_pool(&[], &[], &Lexicon::builtin());
        assert_eq!(pool.len(), POPULAR_BACKFILL.len());
        assert_eq!(pool[0].as_str(), "TSLA");
    }

    #[test]
    fn rank_orders_by_change_descending() {
        let mut entries = vec![
            live_entry("AAA", 5.0),
            live_entry("BBB", -3.0),
            live_entry("CCC", 2.0),
        ];
        rank(&mut entries);

        let changes = entries
            .iter()
            .map(|entry| entry.record.change_percent)
            .collect::<Vec<_>>();
        assert_eq!(changes, vec![5.0, 2.0, -3.0]);
    }

    #[test]
    fn rank_is_idempotent_on_sorted_input() {
        let mut entries = vec![
            live_entry("AAA", 5.0),
            live_entry("BBB", 2.0),
            live_entry("CCC", -3.0),
        ];
        let before = entries.clone();

        rank(&mut entries);
        assert_eq!(entries, before);
        rank(&mut entries);
        assert_eq!(entries, before);
    }

    #[test]
    fn rank_keeps_first_seen_order_among_equal_changes() {
        let mut entries = vec![
            live_entry("AAA", 1.0),
            live_entry("BBB", 1.0),
            live_entry("CCC", 1.0),
        ];
        rank(&mut entries);

        let symbols = entries
            .iter()
            .map(|entry| entry.record.ticker.as_str())
            .collect::<Vec<_>>();
        assert_eq!(symbols, vec!["AAA", "BBB", "CCC"]);
    }

    #[test]
    fn rank_pushes_non_finite_changes_to_the_bottom() {
        let mut entries = vec![live_entry("AAA", -50.0), live_entry("BBB", 1.0)];
        entries[0].record.change_percent = f64::NAN;

        rank(&mut entries);

        assert_eq!(entries[0].record.ticker.as_str(), "BBB");
        assert!(entries[1].record.change_percent.is_nan());
    }
}
