use std::path::PathBuf;

use serde::Deserialize;

use crate::codec::WireFormat;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How converted type definitions are written.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Target format when none is given on the command line.
    #[serde(default)]
    pub format: Option<WireFormat>,
    /// Indent JSON output (XML is always indented).
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { format: None, pretty: default_pretty() }
    }
}

fn default_pretty() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    /// File the configuration was read from (`None` = built-in defaults).
    pub source: Option<PathBuf>,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}
