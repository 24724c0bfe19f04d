use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Capture exports to process, in order (defaults to the three tcp-example-*-0_output.txt files)
    pub files: Vec<PathBuf>,

    /// JSON config file with `files`, `timestamp_field`, `length_field`, `min_fields`
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Column holding the epoch timestamp [default: 0]
    #[arg(long)]
    pub timestamp_field: Option<usize>,

    /// Column holding the payload length in bytes [default: 5]
    #[arg(long)]
    pub length_field: Option<usize>,

    /// Lines with fewer columns are skipped [default: 7]
    #[arg(long)]
    pub min_fields: Option<usize>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}
