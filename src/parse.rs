use thiserror::Error;

/// Which whitespace-separated columns carry the data we need.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldLayout {
    pub timestamp_field: usize,
    pub length_field: usize,
    pub min_fields: usize,
}

impl FieldLayout {
    pub const DEFAULT_TIMESTAMP_FIELD: usize = 0;
    pub const DEFAULT_LENGTH_FIELD: usize = 5;
    pub const DEFAULT_MIN_FIELDS: usize = 7;

    pub fn new(timestamp_field: usize, length_field: usize, min_fields: usize) -> Self {
        // Never index past the end of a line that passed the field-count check
        let needed = timestamp_field.max(length_field).saturating_add(1);
        Self {
            timestamp_field,
            length_field,
            min_fields: min_fields.max(needed),
        }
    }
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_TIMESTAMP_FIELD,
            Self::DEFAULT_LENGTH_FIELD,
            Self::DEFAULT_MIN_FIELDS,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PacketRecord {
    pub timestamp: f64,
    pub length: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineError {
    #[error("invalid timestamp {value:?} in field {field}")]
    Timestamp { field: usize, value: String },
    #[error("invalid length {value:?} in field {field}")]
    Length { field: usize, value: String },
}

#[derive(Debug, PartialEq)]
pub enum ParsedLine {
    Record(PacketRecord),
    /// Too few fields: headers, blank lines, truncated rows.
    Short,
    Malformed(LineError),
}

pub fn parse_line(line: &str, layout: &FieldLayout) -> ParsedLine {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < layout.min_fields {
        return ParsedLine::Short;
    }

    let ts_raw = fields[layout.timestamp_field];
    let timestamp = match ts_raw.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            return ParsedLine::Malformed(LineError::Timestamp {
                field: layout.timestamp_field,
                value: ts_raw.to_string(),
            })
        }
    };

    let len_raw = fields[layout.length_field];
    let length = match len_raw.parse::<u64>() {
        Ok(v) => v,
        Err(_) => {
            return ParsedLine::Malformed(LineError::Length {
                field: layout.length_field,
                value: len_raw.to_string(),
            })
        }
    };

    ParsedLine::Record(PacketRecord { timestamp, length })
}
