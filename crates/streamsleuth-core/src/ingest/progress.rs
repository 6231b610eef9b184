/// Ingest progress reporting: lightweight messages sent from the
/// ingestion threads to the host via a crossbeam channel.
use std::time::Duration;

/// Monotonic identifier of a drop batch, assigned in arrival order.
pub type BatchId = u64;

/// Progress updates sent to the host.
///
/// The probed data itself lives in the shared registry; these messages
/// carry only counters and status so the host can render without polling.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestProgress {
    /// A non-empty drop was accepted and its probes were queued.
    BatchStarted { batch: BatchId, paths: usize },
    /// One path was committed to the registry.
    FileCommitted {
        batch: BatchId,
        path: String,
        frames: usize,
        /// The path was already registered and its entry was overwritten.
        replaced: bool,
    },
    /// One path failed and was skipped.
    ProbeFailed {
        batch: BatchId,
        path: String,
        message: String,
    },
    /// Every path of the batch has been committed or skipped.
    BatchComplete {
        batch: BatchId,
        committed: usize,
        failed: usize,
        duration: Duration,
    },
    /// The commit thread exited after shutdown.
    Stopped,
}
