use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::capture::FileOutcome;
use crate::metrics::{to_mbps, Aggregate, FileStats};

const SEPARATOR: &str = "-----------------------------------";

pub fn write_file_header<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    writeln!(out, "\n{SEPARATOR}\n")?;
    writeln!(out, "Processing file: {}", path.display())
}

/// Read errors go to the diagnostics stream only, so they render nothing here.
pub fn write_file_body<W: Write>(
    out: &mut W,
    path: &Path,
    outcome: &FileOutcome,
) -> io::Result<()> {
    match outcome {
        FileOutcome::Measured(stats) => {
            writeln!(out, "Total Bytes Received: {} bytes", stats.total_bytes)?;
            writeln!(out, "Time Range: {:.2} seconds", stats.time_range_secs)?;
            writeln!(
                out,
                "Throughput: {:.2} bps ({:.2} Mbps)",
                stats.throughput_bps,
                stats.throughput_mbps()
            )?;
            writeln!(out, "\n")
        }
        FileOutcome::NoData { .. } => writeln!(out, "No valid data in file: {}", path.display()),
        FileOutcome::ReadError(_) => Ok(()),
    }
}

pub fn write_summary<W: Write>(out: &mut W, aggregate: &Aggregate) -> io::Result<()> {
    match aggregate.average_bps() {
        Some(avg) => writeln!(
            out,
            "Average Throughput: {:.2} bps ({:.2} Mbps)",
            avg,
            to_mbps(avg)
        ),
        None => writeln!(out, "No valid data to calculate average throughput."),
    }
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum FileEntry<'a> {
    Measured {
        file: String,
        #[serde(flatten)]
        stats: &'a FileStats,
        throughput_mbps: f64,
    },
    NoData {
        file: String,
        skipped_lines: u64,
        malformed_lines: u64,
    },
    ReadError {
        file: String,
        error: &'a str,
    },
}

impl<'a> FileEntry<'a> {
    fn new(path: &Path, outcome: &'a FileOutcome) -> Self {
        let file = path.display().to_string();
        match outcome {
            FileOutcome::Measured(stats) => FileEntry::Measured {
                file,
                stats,
                throughput_mbps: stats.throughput_mbps(),
            },
            FileOutcome::NoData { skipped_lines, malformed_lines } => FileEntry::NoData {
                file,
                skipped_lines: *skipped_lines,
                malformed_lines: *malformed_lines,
            },
            FileOutcome::ReadError(error) => FileEntry::ReadError {
                file,
                error: error.as_str(),
            },
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    files: Vec<FileEntry<'a>>,
    valid_files: usize,
    total_files: usize,
    average_bps: Option<f64>,
    average_mbps: Option<f64>,
}

pub fn write_json<W: Write>(
    out: &mut W,
    outcomes: &[(PathBuf, FileOutcome)],
    aggregate: &Aggregate,
) -> anyhow::Result<()> {
    let average = aggregate.average_bps();
    let report = JsonReport {
        files: outcomes.iter().map(|(p, o)| FileEntry::new(p, o)).collect(),
        valid_files: aggregate.valid_files,
        total_files: aggregate.total_files,
        average_bps: average,
        average_mbps: average.map(to_mbps),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}
