/// Error types, one enum per concern.
///
/// Nothing in the ingestion path propagates these to the host: probe and
/// registry errors are recovered per path and reported through the sink.
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Why a path could not be turned into a list of stream descriptors.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("{path}: file does not exist")]
    NotFound { path: String },

    #[error("{path}: not a file (directory or other)")]
    NotAFile { path: String },

    #[error("{path}: not a recognised media container ({reason})")]
    Unsupported { path: String, reason: String },

    #[error("failed to spawn {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while probing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}: {stderr}")]
    Exit {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("could not parse probe output for {path}: {message}")]
    Parse { path: String, message: String },

    #[error("probe of {path} timed out after {timeout:?}")]
    TimedOut { path: String, timeout: Duration },

    #[error("probe of {path} cancelled")]
    Cancelled { path: String },
}

impl ProbeError {
    /// `true` when the failure came from shutdown rather than the file.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Violations of the `MediaFile` / `FileRegistry` invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("path is empty")]
    EmptyPath,
}

/// Errors from the host integration boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("a drop hook is already registered")]
    AlreadyRegistered,
}

/// Errors raised while starting the ingestion controller.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to build probe pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to spawn commit thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Errors loading or validating [`crate::config::IngestConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
