//! `rtmix`: mix two WAV files.

use anyhow::Result;
use clap::Parser;
use rtmix_cli::{init_tracing, run, summary, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_format)?;
    tracing::debug!(?cli, "parsed arguments");

    let report = run(&cli)?;
    println!("{}", summary(&report));
    Ok(())
}
