use crate::format::{parse_size, ParseSizeError};
use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Re-sort the result store after this many appended records.
    #[serde(default = "default_sort_batch_size")]
    pub sort_batch_size: usize,

    /// Also re-sort and emit a progress event after this much wall time,
    /// whichever trigger fires first.
    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,

    /// Glob patterns pruned from the walk, e.g. `**/node_modules`.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Minimum size a file must reach to be recorded, e.g. "100MB".
    /// Absent means no floor.
    #[serde(default)]
    pub min_size: Option<String>,
}

fn default_sort_batch_size() -> usize {
    500
}

fn default_progress_interval_ms() -> u64 {
    500
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sort_batch_size: default_sort_batch_size(),
            progress_interval_ms: default_progress_interval_ms(),
            ignore_patterns: Vec::new(),
            min_size: None,
        }
    }
}

impl AppConfig {
    pub fn min_size_bytes(&self) -> Result<u64, ParseSizeError> {
        match &self.min_size {
            Some(s) if !s.trim().is_empty() => parse_size(s),
            _ => Ok(0),
        }
    }
}

/// Load configuration from an optional `Spacehog.toml` in the working
/// directory, falling back to defaults for anything unset.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Spacehog").required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}
