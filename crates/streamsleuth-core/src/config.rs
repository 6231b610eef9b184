/// Ingestion settings.
///
/// Resolution order: built-in defaults, then the JSON file named by
/// `STREAMSLEUTH_CONFIG` (missing keys keep their defaults), then the
/// `STREAMSLEUTH_WORKERS` / `STREAMSLEUTH_FFPROBE` environment overrides.
/// The result is validated before use.
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Path to an optional JSON config file.
pub const CONFIG_ENV: &str = "STREAMSLEUTH_CONFIG";
/// Probe worker count override.
pub const WORKERS_ENV: &str = "STREAMSLEUTH_WORKERS";
/// ffprobe binary override.
pub const FFPROBE_ENV: &str = "STREAMSLEUTH_FFPROBE";

/// Lines retained by the in-memory log sink when not configured.
pub const DEFAULT_LOG_CAPACITY: usize = 1_000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestConfig {
    /// Probe pool size. Each worker runs at most one ffprobe at a time.
    pub workers: usize,
    /// Explicit ffprobe location. `None` searches `PATH`.
    pub ffprobe_path: Option<PathBuf>,
    /// Kill a probe after this many seconds. `None` waits indefinitely.
    pub probe_timeout_secs: Option<u64>,
    /// Capacity of the GUI's log ring.
    pub log_capacity: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            ffprobe_path: None,
            probe_timeout_secs: None,
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}

/// Logical CPUs, clamped to 1..=4.
fn default_workers() -> usize {
    num_cpus::get().clamp(1, 4)
}

impl IngestConfig {
    /// Load from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Parse a JSON config file. Does not validate.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment-style overrides from `lookup`.
    ///
    /// Blank values are ignored so that `STREAMSLEUTH_FFPROBE=` does not
    /// clobber a configured path.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(WORKERS_ENV).filter(|v| !v.trim().is_empty()) {
            self.workers = raw.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{WORKERS_ENV} must be a positive integer, got {raw:?}"))
            })?;
        }
        if let Some(raw) = lookup(FFPROBE_ENV).filter(|v| !v.trim().is_empty()) {
            self.ffprobe_path = Some(PathBuf::from(raw.trim()));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::Invalid("workers must be at least 1".into()));
        }
        if self.log_capacity == 0 {
            return Err(ConfigError::Invalid("log_capacity must be at least 1".into()));
        }
        if self.probe_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "probe_timeout_secs must be at least 1 when set".into(),
            ));
        }
        if let Some(path) = &self.ffprobe_path {
            if !path.exists() && path.components().count() > 1 {
                warn!(path = %path.display(), "configured ffprobe does not exist");
            }
        }
        Ok(())
    }

    pub fn probe_timeout(&self) -> Option<Duration> {
        self.probe_timeout_secs.map(Duration::from_secs)
    }
}
