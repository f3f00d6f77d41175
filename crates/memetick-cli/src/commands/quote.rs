use std::process::ExitCode;
use std::sync::Arc;

use memetick_core::{
    AlphaVantageSource, DigestConfig, HttpClient, Lexicon, QuoteResolver, QuoteSource,
    ReqwestHttpClient, YahooChartSource,
};

use crate::cli::QuoteArgs;
use crate::error::CliError;

use super::print_json;

pub async fn run(args: &QuoteArgs, pretty: bool) -> Result<ExitCode, CliError> {
    let config = DigestConfig::from_env();
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());

    let chain: Vec<Arc<dyn QuoteSource>> = vec![
        Arc::new(AlphaVantageSource::new(
            http.clone(),
            config.alphavantage_api_key.clone(),
        )),
        Arc::new(YahooChartSource::new(http)),
    ];
    let resolver = QuoteResolver::new(chain, Arc::new(Lexicon::builtin()));

    let resolved = resolver.resolve_str(&args.symbol).await?;
    print_json(&resolved, pretty)?;
    Ok(ExitCode::SUCCESS)
}
