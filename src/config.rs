use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::cli::Cli;
use crate::parse::FieldLayout;

pub const DEFAULT_FILES: [&str; 3] = [
    "tcp-example-0-0_output.txt",
    "tcp-example-1-0_output.txt",
    "tcp-example-2-0_output.txt",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk form; every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub files: Option<Vec<PathBuf>>,
    pub timestamp_field: Option<usize>,
    pub length_field: Option<usize>,
    pub min_fields: Option<usize>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub files: Vec<PathBuf>,
    pub layout: FieldLayout,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            files: DEFAULT_FILES.iter().map(PathBuf::from).collect(),
            layout: FieldLayout::default(),
        }
    }
}

impl ReportConfig {
    /// Command line beats config file beats built-in defaults.
    pub fn resolve(cli: &Cli, file: Option<ConfigFile>) -> Self {
        let defaults = Self::default();
        let file = file.unwrap_or_default();
        let files = if !cli.files.is_empty() {
            cli.files.clone()
        } else {
            file.files.unwrap_or(defaults.files)
        };
        let layout = FieldLayout::new(
            cli.timestamp_field
                .or(file.timestamp_field)
                .unwrap_or(defaults.layout.timestamp_field),
            cli.length_field
                .or(file.length_field)
                .unwrap_or(defaults.layout.length_field),
            cli.min_fields
                .or(file.min_fields)
                .unwrap_or(defaults.layout.min_fields),
        );
        Self { files, layout }
    }

    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let file = cli.config.as_deref().map(ConfigFile::load).transpose()?;
        Ok(Self::resolve(cli, file))
    }
}
