mod harvest;
mod preview;
mod quote;
mod run;
mod schedule;

use std::process::ExitCode;

use serde::Serialize;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    match &cli.command {
        Command::Run(args) => run::run(args, cli.pretty).await,
        Command::Preview(args) => preview::run(args).await,
        Command::Harvest(args) => harvest::run(args, cli.pretty).await,
        Command::Quote(args) => quote::run(args, cli.pretty).await,
        Command::Schedule(args) => schedule::run(args).await,
    }
}

/// Print a value as (optionally pretty) JSON on stdout.
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
