use std::process::ExitCode;
use std::sync::Arc;

use memetick_core::{
    DigestConfig, DigestPipeline, FileTransport, HttpClient, ReqwestHttpClient,
};

use crate::cli::PreviewArgs;
use crate::error::CliError;

pub async fn run(args: &PreviewArgs) -> Result<ExitCode, CliError> {
    let config = DigestConfig::from_env();
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    let transport = Arc::new(FileTransport::new(&args.out));

    let pipeline = DigestPipeline::from_config(&config, http, transport);
    let report = pipeline.run_once().await;

    if !report.dispatched {
        return Err(CliError::Command(format!(
            "failed to write digest to '{}'",
            args.out
        )));
    }

    println!(
        "digest with {} entries written to {}{}",
        report.entries.len(),
        args.out,
        if report.degraded {
            " (contains placeholder data)"
        } else {
            ""
        }
    );
    Ok(ExitCode::SUCCESS)
}
