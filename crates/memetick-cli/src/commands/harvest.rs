use std::process::ExitCode;
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use memetick_core::{
    DigestConfig, ForumClient, HttpClient, Lexicon, ReqwestHttpClient, SentimentPageClient,
    TickerCandidate, TickerExtractor,
};

use crate::cli::HarvestArgs;
use crate::error::CliError;

use super::print_json;

#[derive(Debug, Serialize)]
struct HarvestOutput {
    site: Vec<TickerCandidate>,
    forum: Vec<TickerCandidate>,
}

pub async fn run(_args: &HarvestArgs, pretty: bool) -> Result<ExitCode, CliError> {
    let config = DigestConfig::from_env();
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    let extractor = TickerExtractor::new(Arc::new(Lexicon::builtin()));

    let site_client = SentimentPageClient::new(http.clone(), config.sentiment_url.clone());
    let forum_client = ForumClient::new(http, config.community.clone(), config.post_limit);

    let site = match site_client.fetch_page_text().await {
        Ok(text) => extractor.scan_page(&text),
        Err(error) => {
            warn!(%error, "sentiment source unavailable");
            Vec::new()
        }
    };

    let forum = match forum_client.fetch_hot_posts().await {
        Ok(posts) => extractor.scan_posts(&posts),
        Err(error) => {
            warn!(%error, "forum source unavailable");
            Vec::new()
        }
    };

    print_json(&HarvestOutput { site, forum }, pretty)?;
    Ok(ExitCode::SUCCESS)
}
