use std::process::ExitCode;
use std::sync::Arc;

use tracing::warn;

use memetick_core::{
    DigestConfig, DigestPipeline, HttpClient, MailApiTransport, NoopTransport, ReportTransport,
    ReqwestHttpClient,
};

use crate::cli::RunArgs;
use crate::error::CliError;

use super::print_json;

pub async fn run(args: &RunArgs, pretty: bool) -> Result<ExitCode, CliError> {
    let config = DigestConfig::from_env();
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());

    let delivering = !args.dry_run && config.mail_access_token.is_some();
    let transport: Arc<dyn ReportTransport> = if args.dry_run {
        Arc::new(NoopTransport)
    } else if let Some(token) = config.mail_access_token.clone() {
        Arc::new(MailApiTransport::new(http.clone(), token))
    } else {
        warn!("no mail access token configured; digest will not be delivered");
        Arc::new(NoopTransport)
    };

    let pipeline = DigestPipeline::from_config(&config, http, transport);
    let report = pipeline.run_once().await;
    print_json(&report, pretty)?;

    if delivering && !report.dispatched {
        return Ok(ExitCode::from(3));
    }
    Ok(ExitCode::SUCCESS)
}
