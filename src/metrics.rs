use serde::Serialize;

use crate::parse::{PacketRecord, ParsedLine};

pub const BITS_PER_BYTE: f64 = 8.0;
pub const BITS_PER_MEGABIT: f64 = 1_000_000.0;

pub fn to_mbps(bps: f64) -> f64 {
    bps / BITS_PER_MEGABIT
}

/// Running totals for one capture file.
#[derive(Debug, Default, Clone)]
pub struct Accumulator {
    records: u64,
    total_bytes: u64,
    min_ts: f64,
    max_ts: f64,
    skipped: u64,
    malformed: u64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: PacketRecord) {
        if self.records == 0 {
            self.min_ts = record.timestamp;
            self.max_ts = record.timestamp;
        } else {
            self.min_ts = self.min_ts.min(record.timestamp);
            self.max_ts = self.max_ts.max(record.timestamp);
        }
        self.records += 1;
        self.total_bytes = self.total_bytes.saturating_add(record.length);
    }

    pub fn observe(&mut self, parsed: &ParsedLine) {
        match parsed {
            ParsedLine::Record(r) => self.push(*r),
            ParsedLine::Short => self.skipped += 1,
            ParsedLine::Malformed(_) => self.malformed += 1,
        }
    }

    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    pub fn malformed(&self) -> u64 {
        self.malformed
    }

    /// `None` when no record was parsed.
    pub fn finish(&self) -> Option<FileStats> {
        if self.records == 0 {
            return None;
        }
        let time_range_secs = self.max_ts - self.min_ts;
        // A zero range yields +inf; single-packet captures report unbounded throughput
        let throughput_bps = (self.total_bytes as f64 * BITS_PER_BYTE) / time_range_secs;
        Some(FileStats {
            records: self.records,
            total_bytes: self.total_bytes,
            time_range_secs,
            throughput_bps,
            skipped_lines: self.skipped,
            malformed_lines: self.malformed,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileStats {
    pub records: u64,
    pub total_bytes: u64,
    pub time_range_secs: f64,
    pub throughput_bps: f64,
    pub skipped_lines: u64,
    pub malformed_lines: u64,
}

impl FileStats {
    pub fn throughput_mbps(&self) -> f64 {
        to_mbps(self.throughput_bps)
    }
}

/// Average throughput across files, built by folding per-file results.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub sum_bps: f64,
    pub valid_files: usize,
    pub total_files: usize,
}

impl Aggregate {
    pub fn with(self, throughput_bps: Option<f64>) -> Self {
        match throughput_bps {
            Some(bps) if bps >= 0.0 => Self {
                sum_bps: self.sum_bps + bps,
                valid_files: self.valid_files + 1,
                total_files: self.total_files + 1,
            },
            _ => Self {
                total_files: self.total_files + 1,
                ..self
            },
        }
    }

    pub fn average_bps(&self) -> Option<f64> {
        if self.valid_files == 0 {
            None
        } else {
            Some(self.sum_bps / self.valid_files as f64)
        }
    }
}

impl FromIterator<Option<f64>> for Aggregate {
    fn from_iter<I: IntoIterator<Item = Option<f64>>>(iter: I) -> Self {
        iter.into_iter().fold(Aggregate::default(), Aggregate::with)
    }
}
