use std::process::ExitCode;
use std::sync::Arc;

use time::{Duration, OffsetDateTime, Time};
use tracing::{info, warn};

use memetick_core::{
    report_offset, DigestConfig, DigestPipeline, HttpClient, MailApiTransport, NoopTransport,
    ReportTransport, ReqwestHttpClient,
};

use crate::cli::ScheduleArgs;
use crate::error::CliError;

pub async fn run(args: &ScheduleArgs) -> Result<ExitCode, CliError> {
    let trigger = parse_trigger_time(&args.at)?;

    let config = DigestConfig::from_env();
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    let transport: Arc<dyn ReportTransport> = match config.mail_access_token.clone() {
        Some(token) => Arc::new(MailApiTransport::new(http.clone(), token)),
        None => {
            warn!("no mail access token configured; scheduled digests will not be delivered");
            Arc::new(NoopTransport)
        }
    };
    let pipeline = DigestPipeline::from_config(&config, http, transport);

    info!(at = %args.at, "scheduler started; one digest per day");

    if args.run_now {
        pipeline.run_once().await;
    }

    loop {
        let wait = duration_until_next(trigger);
        info!(seconds = wait.as_secs(), "sleeping until next trigger");
        tokio::time::sleep(wait).await;
        pipeline.run_once().await;
    }
}

fn parse_trigger_time(raw: &str) -> Result<Time, CliError> {
    let invalid = || CliError::Command(format!("invalid trigger time '{raw}', expected HH:MM"));

    let (hours, minutes) = raw.split_once(':').ok_or_else(invalid)?;
    let hours: u8 = hours.parse().map_err(|_| invalid())?;
    let minutes: u8 = minutes.parse().map_err(|_| invalid())?;

    Time::from_hms(hours, minutes, 0).map_err(|_| invalid())
}

/// Time until the next daily trigger, computed in the report timezone.
fn duration_until_next(trigger: Time) -> std::time::Duration {
    let now_local = OffsetDateTime::now_utc().to_offset(report_offset());
    let mut next = now_local.replace_time(trigger);
    if next <= now_local {
        next += Duration::days(1);
    }

    let diff = next - now_local;
    std::time::Duration::from_secs_f64(diff.as_seconds_f64().max(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_trigger_times() {
        assert_eq!(
            parse_trigger_time("09:30").expect("must parse"),
            Time::from_hms(9, 30, 0).expect("valid time")
        );
        assert_eq!(
            parse_trigger_time("0:00").expect("must parse"),
            Time::MIDNIGHT
        );
    }

    #[test]
    fn rejects_malformed_trigger_times() {
        assert!(parse_trigger_time("930").is_err());
        assert!(parse_trigger_time("25:00").is_err());
        assert!(parse_trigger_time("09:66").is_err());
        assert!(parse_trigger_time("soon").is_err());
    }

    #[test]
    fn next_trigger_is_always_in_the_future() {
        let wait = duration_until_next(Time::MIDNIGHT);
        assert!(wait.as_secs() >= 1);
        assert!(wait.as_secs() <= 24 * 60 * 60);
    }
}
