use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use regex::Regex;

use crate::lexicon::Lexicon;
use crate::{CandidateOrigin, ForumPost, Ticker, TickerCandidate};

/// Cap on candidates returned from one sentiment-page scan.
pub const PAGE_CANDIDATE_CAP: usize = 10;
/// How many ranked forum symbols are considered before thresholding.
pub const FORUM_SCAN_CAP: usize = 15;
/// Cap on candidates returned from one forum scan.
pub const FORUM_CANDIDATE_CAP: usize = 10;
/// Minimum accumulated weight for a forum symbol to be retained.
pub const FORUM_WEIGHT_THRESHOLD: u32 = 2;

const DOLLAR_TAG_WEIGHT: u32 = 3;
const KNOWN_BARE_WEIGHT: u32 = 2;
const PLAUSIBLE_BARE_WEIGHT: u32 = 1;

/// Fragments that disqualify an unknown bare token outright.
const BANNED_FRAGMENTS: [&str; 3] = ["THE", "AND", "FOR"];

/// Scans raw source text for ticker candidates.
///
/// Two scan modes with different confidence models: the sentiment page is a
/// flat token sweep (membership only), while forum posts accumulate weights
/// per symbol across posts, with dollar-tagged mentions scoring highest.
pub struct TickerExtractor {
    lexicon: Arc<Lexicon>,
    page_token: Regex,
    dollar_tag: Regex,
    bare_token: Regex,
}

impl TickerExtractor {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            lexicon,
            page_token: Regex::new(r"\b[0-9A-Z]{1,5}\b").expect("page token pattern is valid"),
            dollar_tag: Regex::new(r"\$([A-Z]{2,5})\b").expect("dollar tag pattern is valid"),
            bare_token: Regex::new(r"\b([A-Z]{3,5})\b").expect("bare token pattern is valid"),
        }
    }

    /// Sweep a page's visible text for ticker-shaped tokens.
    ///
    /// Accepts known tickers unconditionally; unknown tokens must be 3-5
    /// characters, absent from the rejection list, and not purely numeric.
    /// First-seen order, deduplicated, capped at [`PAGE_CANDIDATE_CAP`].
    pub fn scan_page(&self, text: &str) -> Vec<TickerCandidate> {
        let upper = text.to_ascii_uppercase();
        let mut seen = HashSet::new();
        let mut found = Vec::new();

        for token_match in self.page_token.find_iter(&upper) {
            let token = token_match.as_str();
            if !self.accepts_page_token(token) {
                continue;
            }
            let Ok(ticker) = Ticker::parse(token) else {
                continue;
            };
            if seen.insert(ticker.clone()) {
                found.push(TickerCandidate::new(
                    ticker,
                    CandidateOrigin::SentimentSite,
                    1,
                ));
                if found.len() == PAGE_CANDIDATE_CAP {
                    break;
                }
            }
        }

        found
    }

    /// Scan a batch of forum posts, accumulating confidence weights.
    ///
    /// `$XXXX` mentions score 3 when known or plausible, bare mentions score
    /// 2 when known and 1 when merely plausible. Weights sum across all
    /// posts; symbols below [`FORUM_WEIGHT_THRESHOLD`] are dropped and the
    /// remainder is ordered most-confident first.
    pub fn scan_posts(&self, posts: &[ForumPost]) -> Vec<TickerCandidate> {
        let mut weights: HashMap<Ticker, u32> = HashMap::new();
        let mut first_seen: Vec<Ticker> = Vec::new();

        for post in posts {
            let text = post.combined_text().to_ascii_uppercase();

            for caps in self.dollar_tag.captures_iter(&text) {
                let token = &caps[1];
                if self.lexicon.is_known(token)
                    || (!self.lexicon.is_rejected(token) && token.len() >= 3)
                {
                    bump(&mut weights, &mut first_seen, token, DOLLAR_TAG_WEIGHT);
                }
            }

            for caps in self.bare_token.captures_iter(&text) {
                let token = &caps[1];
                if self.lexicon.is_known(token) {
                    bump(&mut weights, &mut first_seen, token, KNOWN_BARE_WEIGHT);
                } else if !self.lexicon.is_rejected(token)
                    && token.len() >= 3
                    && !BANNED_FRAGMENTS.iter().any(|frag| token.contains(frag))
                {
                    bump(&mut weights, &mut first_seen, token, PLAUSIBLE_BARE_WEIGHT);
                }
            }
        }

        // Stable sort keeps first-mention order among equal weights.
        let mut ranked = first_seen
            .into_iter()
            .map(|ticker| {
                let weight = weights[&ticker];
                (ticker, weight)
            })
            .collect::<Vec<_>>();
        ranked.sort_by(|left, right| right.1.cmp(&left.1));

        ranked
            .into_iter()
            .take(FORUM_SCAN_CAP)
            .filter(|(_, weight)| *weight >= FORUM_WEIGHT_THRESHOLD)
            .take(FORUM_CANDIDATE_CAP)
            .map(|(ticker, weight)| {
                TickerCandidate::new(ticker, CandidateOrigin::ForumPost, weight)
            })
            .collect()
    }

    fn accepts_page_token(&self, token: &str) -> bool {
        if self.lexicon.is_known(token) {
            return true;
        }
        (3..=5).contains(&token.len())
            && !self.lexicon.is_rejected(token)
            && !token.bytes().all(|byte| byte.is_ascii_digit())
    }
}

fn bump(weights: &mut HashMap<Ticker, u32>, first_seen: &mut Vec<Ticker>, token: &str, weight: u32) {
    let Ok(ticker) = Ticker::parse(token) else {
        return;
    };
    let entry = weights.entry(ticker.clone()).or_insert(0);
    if *entry == 0 {
        first_seen.push(ticker);
    }
    *entry += weight;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> TickerExtractor {
        TickerExtractor::new(Arc::new(Lexicon::builtin()))
    }

    fn post(title: &str, body: &str) -> ForumPost {
        ForumPost::new(title, body)
    }

    #[test]
    fn dollar_tagged_mention_scores_at_least_three() {
        let posts = [post("$GME to the moon", "")];
        let candidates = extractor().scan_posts(&posts);

        let gme = candidates
            .iter()
            .find(|candidate| candidate.ticker.as_str() == "GME")
            .expect("GME should be extracted");
        assert!(gme.weight >= 3);
    }

    #[test]
    fn common_words_extract_no_candidates() {
        let candidates = extractor().scan_page("THE STOCK IS UP");
        assert!(candidates.is_empty(), "got {candidates:?}");
    }

    #[test]
    fn page_scan_accepts_known_short_tickers() {
        let candidates = extractor().scan_page("holdings: MU and F moved today");
        let symbols = candidates
            .iter()
            .map(|candidate| candidate.ticker.as_str())
            .collect::<Vec<_>>();
        assert!(symbols.contains(&"MU"));
        assert!(symbols.contains(&"F"));
    }

    #[test]
    fn page_scan_dedupes_and_preserves_first_seen_order() {
        let candidates = extractor().scan_page("GME AAPL GME TSLA AAPL");
        let symbols = candidates
            .iter()
            .map(|candidate| candidate.ticker.as_str())
            .collect::<Vec<_>>();
        assert_eq!(symbols, vec!["GME", "AAPL", "TSLA"]);
    }

    #[test]
    fn page_scan_rejects_purely_numeric_tokens() {
        let candidates = extractor().scan_page("up 42069 percent");
        assert!(candidates.is_empty());
    }

    #[test]
    fn page_scan_caps_at_ten() {
        let text = "AAA BBBB CCCC DDDD EEEE FFFF GGGG HHHH IIII JJJJ KKKK LLLL";
        let candidates = extractor().scan_page(text);
        assert_eq!(candidates.len(), PAGE_CANDIDATE_CAP);
    }

    #[test]
    fn forum_weights_accumulate_across_posts() {
        let posts = [
            post("$GME squeeze incoming", "GME GME"),
            post("bought more GME today", ""),
        ];
        let candidates = extractor().scan_posts(&posts);

        // 3 for the dollar tag + 2 per known bare mention; the bare scan
        // also matches the symbol inside "$GME", so four bare hits total.
        let gme = candidates
            .iter()
            .find(|candidate| candidate.ticker.as_str() == "GME")
            .expect("GME should be extracted");
        assert_eq!(gme.weight, 3 + 2 * 4);
    }

    #[test]
    fn single_bare_unknown_mention_misses_threshold() {
        let posts = [post("watching XYZAB closely", "")];
        let candidates = extractor().scan_posts(&posts);
        assert!(candidates.is_empty());
    }

    #[test]
    fn forum_candidates_order_by_descending_weight() {
        let posts = [
            post("$PLTR $PLTR", "PLTR"),
            post("TSLA TSLA", ""),
            post("$GME", ""),
        ];
        let candidates = extractor().scan_posts(&posts);
        let symbols = candidates
            .iter()
            .map(|candidate| candidate.ticker.as_str())
            .collect::<Vec<_>>();
        // PLTR 3+3+2*3=12, GME 3+2=5, TSLA 2+2=4.
        assert_eq!(symbols, vec!["PLTR", "GME", "TSLA"]);
    }

    #[test]
    fn banned_fragments_disqualify_unknown_bare_tokens() {
        // ANDES contains AND; never a candidate despite plausible shape.
        let posts = [post("ANDES ANDES ANDES", "")];
        let candidates = extractor().scan_posts(&posts);
        assert!(candidates.is_empty());
    }
}
