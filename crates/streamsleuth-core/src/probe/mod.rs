/// Stream descriptor sources.
///
/// A [`StreamSource`] turns a path into a [`ProbeReport`]. The ingestion
/// controller calls it from worker threads, so implementations must be
/// `Send + Sync` and should poll `cancel` if they block for long.
pub mod descriptor;
pub mod ffprobe;

pub use descriptor::{FormatDescriptor, ProbeReport, StreamDescriptor};
pub use ffprobe::FfprobeSource;

use crate::error::ProbeError;
use std::path::Path;
use std::sync::atomic::AtomicBool;

/// The media-probing capability.
pub trait StreamSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Enumerate the streams of `path`.
    ///
    /// Implementations return `ProbeError::Cancelled` once `cancel` is set.
    fn probe(&self, path: &Path, cancel: &AtomicBool) -> Result<ProbeReport, ProbeError>;
}

/// Reject paths that cannot be probed before any work is spawned.
pub fn check_path(path: &Path) -> Result<(), ProbeError> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(ProbeError::NotAFile {
            path: path.display().to_string(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ProbeError::NotFound {
            path: path.display().to_string(),
        }),
        Err(source) => Err(ProbeError::Io {
            path: path.display().to_string(),
            source,
        }),
    }
}
