//! CLI argument definitions for memetick.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `run` | Run the full pipeline once and dispatch the digest |
//! | `preview` | Run the pipeline and write the digest to a file |
//! | `harvest` | Show harvested candidates per source |
//! | `quote` | Resolve one symbol through the provider chain |
//! | `schedule` | Trigger the pipeline daily at a fixed local time |
//!
//! Configuration (credentials, API key, addresses) comes from the
//! environment; see `DigestConfig`.

use clap::{Args, Parser, Subcommand};

/// Daily meme-stock digest pipeline.
///
/// Harvests trending tickers from a forum community and a sentiment page,
/// resolves live quotes with tiered provider fallback, and emails a ranked
/// HTML digest.
#[derive(Debug, Parser)]
#[command(name = "memetick", author, version, about = "Daily meme-stock digest pipeline")]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full pipeline once and dispatch the digest.
    ///
    /// Exit code 3 when delivery fails; the report itself is always
    /// produced.
    ///
    /// # Examples
    ///
    ///   memetick run
    ///   memetick run --dry-run --pretty
    Run(RunArgs),

    /// Run the pipeline and write the digest HTML to a file, no delivery.
    ///
    /// # Examples
    ///
    ///   memetick preview
    ///   memetick preview --out /tmp/digest.html
    Preview(PreviewArgs),

    /// Harvest both sources and print the extracted candidates.
    ///
    /// # Examples
    ///
    ///   memetick harvest --pretty
    Harvest(HarvestArgs),

    /// Resolve one symbol through the provider chain.
    ///
    /// # Examples
    ///
    ///   memetick quote GME
    ///   memetick quote '$gme' --pretty
    Quote(QuoteArgs),

    /// Trigger the pipeline once daily at a fixed local (UTC-3) time.
    ///
    /// Runs until interrupted; a single loop means overlapping runs cannot
    /// happen.
    ///
    /// # Examples
    ///
    ///   memetick schedule --at 09:30
    Schedule(ScheduleArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Produce the digest but skip delivery.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

/// Arguments for the `preview` command.
#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Where the digest HTML is written.
    #[arg(long, default_value = "digest.html")]
    pub out: String,
}

/// Arguments for the `harvest` command.
#[derive(Debug, Args)]
pub struct HarvestArgs {}

/// Arguments for the `quote` command.
#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Symbol to resolve (scrubbed to uppercase letters).
    pub symbol: String,
}

/// Arguments for the `schedule` command.
#[derive(Debug, Args)]
pub struct ScheduleArgs {
    /// Daily trigger time in the report timezone, HH:MM.
    #[arg(long, default_value = "09:30")]
    pub at: String,

    /// Also run the pipeline immediately on startup.
    #[arg(long, default_value_t = false)]
    pub run_now: bool,
}
