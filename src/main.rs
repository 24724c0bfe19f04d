mod capture;
mod cli;
mod config;
mod metrics;
mod parse;
mod report;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::capture::{process_file, FileOutcome};
use crate::cli::{Cli, ReportFormat};
use crate::config::ReportConfig;
use crate::metrics::Aggregate;

fn run(cli: Cli) -> Result<()> {
    let config = ReportConfig::from_cli(&cli).context("Loading configuration")?;
    info!(files = config.files.len(), layout = ?config.layout, "Starting throughput report");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut outcomes: Vec<(PathBuf, FileOutcome)> = Vec::with_capacity(config.files.len());

    for path in &config.files {
        if cli.format == ReportFormat::Text {
            report::write_file_header(&mut out, path).context("Writing report")?;
            // Keep stdout ordered ahead of any diagnostics for this file
            out.flush().context("Writing report")?;
        }
        let outcome = process_file(path, &config.layout);
        debug!(file = %path.display(), bps = outcome.sentinel(), "File done");
        if cli.format == ReportFormat::Text {
            report::write_file_body(&mut out, path, &outcome).context("Writing report")?;
        }
        outcomes.push((path.clone(), outcome));
    }

    let aggregate: Aggregate = outcomes.iter().map(|(_, o)| o.throughput_bps()).collect();
    info!(
        valid = aggregate.valid_files,
        total = aggregate.total_files,
        "Aggregated throughput"
    );

    match cli.format {
        ReportFormat::Text => report::write_summary(&mut out, &aggregate).context("Writing report")?,
        ReportFormat::Json => report::write_json(&mut out, &outcomes, &aggregate)
            .context("Writing JSON report")?,
    }
    out.flush().context("Writing report")?;
    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init()
        .ok();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
}
