use time::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::{Provenance, QuoteRecord, ResolvedQuote};

/// Hard cap on rendered entries, applied regardless of caller-supplied
/// sequence length.
pub const REPORT_LIMIT: usize = 8;

// The digest is timestamped in the recipients' fixed zone (UTC-3, no DST).
const REPORT_TZ_LABEL: &str = "UTC-03:00";

/// Fixed offset the digest (and the daily trigger) are localized to.
pub fn report_offset() -> UtcOffset {
    UtcOffset::from_hms(-3, 0, 0).expect("fixed report offset is valid")
}

/// Qualitative bucket derived from percent price change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Momentum {
    StrongBullish,
    Bullish,
    Neutral,
    Bearish,
    StrongBearish,
}

impl Momentum {
    pub fn from_change_percent(change: f64) -> Self {
        if change > 5.0 {
            Self::StrongBullish
        } else if change > 2.0 {
            Self::Bullish
        } else if change > -2.0 {
            Self::Neutral
        } else if change > -5.0 {
            Self::Bearish
        } else {
            Self::StrongBearish
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::StrongBullish => "🚀 Strong Bullish",
            Self::Bullish => "📈 Bullish",
            Self::Neutral => "➡️ Neutral",
            Self::Bearish => "📉 Bearish",
            Self::StrongBearish => "🔴 Strong Bearish",
        }
    }
}

/// Qualitative bucket derived from absolute price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Risk {
    High,
    MediumHigh,
    Medium,
    Lower,
    Unknown,
}

impl Risk {
    pub fn from_price(price: Option<f64>) -> Self {
        match price {
            Some(price) if price < 5.0 => Self::High,
            Some(price) if price < 20.0 => Self::MediumHigh,
            Some(price) if price < 50.0 => Self::Medium,
            Some(_) => Self::Lower,
            None => Self::Unknown,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "🔥 High Risk/High Reward",
            Self::MediumHigh => "⚡ Medium-High Risk",
            Self::Medium => "⚖️ Medium Risk",
            Self::Lower => "🛡️ Lower Risk",
            Self::Unknown => "❓ Unknown Risk",
        }
    }
}

/// Derived, non-persisted classification pair for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Analysis {
    pub momentum: Momentum,
    pub risk: Risk,
}

impl Analysis {
    pub fn of(record: &QuoteRecord) -> Self {
        Self {
            momentum: Momentum::from_change_percent(record.change_percent),
            risk: Risk::from_price(record.price),
        }
    }
}

/// Mail subject line for one run.
pub fn digest_subject(generated_at: OffsetDateTime) -> String {
    let date = format_description::parse("[year]-[month]-[day]")
        .expect("date format description is valid");
    format!(
        "🔥 Daily Meme-Stock Digest - {}",
        generated_at
            .format(&date)
            .unwrap_or_else(|_| String::from("today"))
    )
}

/// Render the ranked entries into a self-contained HTML digest.
///
/// Truncates to [`REPORT_LIMIT`] entries. Synthetic entries are visibly
/// tagged so a degraded run cannot be mistaken for live data.
pub fn render_digest(entries: &[ResolvedQuote], generated_at: OffsetDateTime) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<title>Daily Meme-Stock Digest</title>
<style>
  body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; }
  .header { background-color: #1f2937; color: white; padding: 20px; text-align: center; }
  .content { padding: 20px; }
  .ticker-card { border: 1px solid #ddd; border-radius: 8px; margin: 10px 0; padding: 15px; background-color: #f9f9f9; }
  .ticker-name { font-size: 18px; font-weight: bold; color: #1f2937; }
  .price { font-size: 16px; margin: 5px 0; }
  .positive { color: #059669; }
  .negative { color: #dc2626; }
  .neutral { color: #6b7280; }
  .synthetic { color: #b45309; font-size: 12px; font-weight: bold; }
  .insights { background-color: #e0f2fe; padding: 15px; border-radius: 8px; margin-top: 20px; }
  .footer { text-align: center; color: #6b7280; font-size: 12px; margin-top: 30px; }
</style>
</head>
<body>
"#,
    );

    html.push_str(&format!(
        "<div class=\"header\">\n<h1>🔥 DAILY MEME-STOCK DIGEST 🔥</h1>\n<p>📅 {}</p>\n</div>\n",
        format_report_time(generated_at)
    ));
    html.push_str("<div class=\"content\">\n<h2>🎯 Top Trending Tickers Today:</h2>\n");

    for (position, entry) in entries.iter().take(REPORT_LIMIT).enumerate() {
        html.push_str(&render_card(position + 1, entry));
    }

    html.push_str(
        r#"<div class="insights">
<h3>📈 Quick Insights:</h3>
<ul>
<li>Monitor stocks with 🚀 Strong Bullish momentum</li>
<li>🔥 High Risk stocks = Higher potential rewards</li>
<li>Check volume spikes for confirmation</li>
<li>Always use proper position sizing!</li>
</ul>
<p><strong>💡 Remember: This is not financial advice. Always DYOR!</strong></p>
</div>
<div class="footer">
<p><em>Next digest tomorrow morning</em></p>
<p>Generated by memetick</p>
</div>
</div>
</body>
</html>
"#,
    );

    html
}

fn render_card(position: usize, entry: &ResolvedQuote) -> String {
    let record = &entry.record;
    let analysis = Analysis::of(record);

    let price_str = match record.price {
        Some(price) => format!("${price:.2}"),
        None => String::from("N/A"),
    };
    let change_str = format!("{:+.2}%", record.change_percent);
    let change_class = if record.change_percent > 0.0 {
        "positive"
    } else if record.change_percent < 0.0 {
        "negative"
    } else {
        "neutral"
    };
    let synthetic_tag = match entry.provenance {
        Provenance::Live(_) => "",
        Provenance::Synthetic | Provenance::Unavailable => {
            " <span class=\"synthetic\">placeholder data</span>"
        }
    };

    format!(
        "<div class=\"ticker-card\">\n\
         <div class=\"ticker-name\">{position}. ${ticker}{synthetic_tag}</div>\n\
         <div class=\"price\">💰 Price: {price_str} <span class=\"{change_class}\">({change_str})</span></div>\n\
         <div>📊 Momentum: {momentum}</div>\n\
         <div>⚠️ Risk Level: {risk}</div>\n\
         </div>\n",
        ticker = record.ticker,
        momentum = analysis.momentum.label(),
        risk = analysis.risk.label(),
    )
}

fn format_report_time(generated_at: OffsetDateTime) -> String {
    let format = format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second]")
        .expect("timestamp format description is valid");

    let local = generated_at.to_offset(report_offset());
    format!(
        "{} {}",
        local
            .format(&format)
            .unwrap_or_else(|_| String::from("unknown time")),
        REPORT_TZ_LABEL
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ProviderId, Ticker};

    fn ticker(raw: &str) -> Ticker {
        Ticker::parse(raw).expect("test ticker is valid")
    }

    fn live_entry(raw: &str, price: f64, change_percent: f64) -> ResolvedQuote {
        let record = QuoteRecord::new(
            ticker(raw),
            Some(price),
            Some(price),
            change_percent,
            None,
            None,
        )
        .expect("test record is valid");
        ResolvedQuote::new(record, Provenance::Live(ProviderId::Yahoo))
    }

    #[test]
    fn momentum_buckets_follow_thresholds() {
        assert_eq!(Momentum::from_change_percent(6.0), Momentum::StrongBullish);
        assert_eq!(Momentum::from_change_percent(5.0), Momentum::Bullish);
        assert_eq!(Momentum::from_change_percent(2.1), Momentum::Bullish);
        assert_eq!(Momentum::from_change_percent(0.0), Momentum::Neutral);
        assert_eq!(Momentum::from_change_percent(-2.0), Momentum::Neutral);
        assert_eq!(Momentum::from_change_percent(-3.0), Momentum::Bearish);
        assert_eq!(Momentum::from_change_percent(-6.0), Momentum::StrongBearish);
    }

    #[test]
    fn risk_buckets_follow_price_levels() {
        assert_eq!(Risk::from_price(Some(4.99)), Risk::High);
        assert_eq!(Risk::from_price(Some(5.0)), Risk::MediumHigh);
        assert_eq!(Risk::from_price(Some(19.99)), Risk::MediumHigh);
        assert_eq!(Risk::from_price(Some(49.99)), Risk::Medium);
        assert_eq!(Risk::from_price(Some(50.0)), Risk::Lower);
        assert_eq!(Risk::from_price(None), Risk::Unknown);
    }

    #[test]
    fn digest_lists_entries_in_given_order() {
        let entries = vec![
            live_entry("GME", 24.0, 8.5),
            live_entry("TSLA", 250.0, 3.2),
            live_entry("AAPL", 180.0, -1.0),
        ];
        let html = render_digest(&entries, OffsetDateTime::UNIX_EPOCH);

        let gme = html.find("1. $GME").expect("GME card present");
        let tsla = html.find("2. $TSLA").expect("TSLA card present");
        let aapl = html.find("3. $AAPL").expect("AAPL card present");
        assert!(gme < tsla && tsla < aapl);
    }

    #[test]
    fn digest_truncates_to_report_limit() {
        let entries = (0..12)
            .map(|index| {
                let symbol = format!(
                    "{}{}",
                    char::from(b'A' + index as u8),
                    "AAA"
                );
                live_entry(&symbol, 10.0, 1.0)
            })
            .collect::<Vec<_>>();
        let html = render_digest(&entries, OffsetDateTime::UNIX_EPOCH);

        assert!(html.contains("8. $"));
        assert!(!html.contains("9. $"));
    }

    #[test]
    fn synthetic_entries_are_tagged() {
        let synthetic = ResolvedQuote::new(
            QuoteRecord::placeholder(ticker("AAPL")),
            Provenance::Synthetic,
        );
        let html = render_digest(&[synthetic], OffsetDateTime::UNIX_EPOCH);
        assert!(html.contains("placeholder data"));

        let live = live_entry("GME", 24.0, 8.5);
        let html = render_digest(&[live], OffsetDateTime::UNIX_EPOCH);
        assert!(!html.contains("placeholder data"));
    }

    #[test]
    fn unavailable_price_renders_as_not_available() {
        let entry = ResolvedQuote::new(
            QuoteRecord::unavailable(ticker("ZZZZZ")),
            Provenance::Unavailable,
        );
        let html = render_digest(&[entry], OffsetDateTime::UNIX_EPOCH);
        assert!(html.contains("Price: N/A"));
        assert!(html.contains(Risk::Unknown.label()));
    }

    #[test]
    fn report_timestamp_uses_fixed_offset() {
        let html = render_digest(&[], OffsetDateTime::UNIX_EPOCH);
        // Midnight UTC on the epoch is 21:00 the previous day at UTC-3.
        assert!(html.contains("1969-12-31 21:00:00 UTC-03:00"));
    }

    #[test]
    fn subject_carries_the_run_date() {
        let subject = digest_subject(OffsetDateTime::UNIX_EPOCH);
        assert!(subject.contains("1970-01-01"));
    }
}
