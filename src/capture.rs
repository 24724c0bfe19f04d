use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::metrics::{Accumulator, FileStats};
use crate::parse::{parse_line, FieldLayout, ParsedLine};

/// What processing one capture export produced.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Measured(FileStats),
    /// Readable, but not a single record parsed.
    NoData { skipped_lines: u64, malformed_lines: u64 },
    ReadError(String),
}

impl FileOutcome {
    pub const SENTINEL: f64 = -1.0;

    pub fn throughput_bps(&self) -> Option<f64> {
        match self {
            FileOutcome::Measured(stats) => Some(stats.throughput_bps),
            _ => None,
        }
    }

    /// Legacy single-number form: throughput, or -1 when nothing could be computed.
    pub fn sentinel(&self) -> f64 {
        self.throughput_bps().unwrap_or(Self::SENTINEL)
    }
}

/// Bytes that are not valid UTF-8 are replaced with U+FFFD; the line is still parsed.
pub fn process_reader<R: BufRead>(
    mut reader: R,
    layout: &FieldLayout,
) -> io::Result<Accumulator> {
    let mut acc = Accumulator::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let raw = String::from_utf8_lossy(&buf);
        let line = raw.trim_end_matches(['\n', '\r']);
        let parsed = parse_line(line, layout);
        if let ParsedLine::Malformed(e) = &parsed {
            warn!(error = %e, "Error parsing line: {line}");
        }
        acc.observe(&parsed);
    }
    Ok(acc)
}

pub fn process_file(path: &Path, layout: &FieldLayout) -> FileOutcome {
    debug!(file = %path.display(), "Opening capture export");
    // The handle lives only for this call and is closed on every return path
    let scanned = File::open(path).and_then(|f| process_reader(BufReader::new(f), layout));

    let acc = match scanned {
        Ok(acc) => acc,
        Err(e) => {
            error!("Error reading the file {}: {e}", path.display());
            return FileOutcome::ReadError(e.to_string());
        }
    };

    match acc.finish() {
        Some(stats) => {
            info!(
                file = %path.display(),
                records = stats.records,
                skipped = stats.skipped_lines,
                malformed = stats.malformed_lines,
                "Measured throughput"
            );
            FileOutcome::Measured(stats)
        }
        None => {
            info!(file = %path.display(), "No records parsed");
            FileOutcome::NoData {
                skipped_lines: acc.skipped(),
                malformed_lines: acc.malformed(),
            }
        }
    }
}
