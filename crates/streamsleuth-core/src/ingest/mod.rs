/// Drop ingestion controller.
///
/// A drop batch is handled in two stages:
/// - **Probe (pool):** each path is probed on a bounded rayon pool of
///   `workers` threads. The caller's thread only enqueues.
/// - **Commit (single thread):** one dedicated thread receives the probe
///   results, puts them back into batch path order, writes the sink lines,
///   normalises the streams, and appends to the shared registry. It is the
///   only registry writer.
///
/// Batches commit in the order [`IngestHandle::handle`] accepted them.
///
/// # Cancellation
///
/// [`IngestHandle::shutdown`] sets a shared flag. Queued probes report
/// `Cancelled` without touching the source, running ffprobe children are
/// killed, and the commit thread stops committing and exits. Dropping the
/// handle shuts down and joins the commit thread.
mod commit;
pub mod progress;

use crate::config::IngestConfig;
use crate::error::{IngestError, ProbeError};
use crate::host::DropEvent;
use crate::model::SharedRegistry;
use crate::probe::{ProbeReport, StreamSource};
use crate::sink::LogSink;
use commit::Committer;
use progress::{BatchId, IngestProgress};

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Maximum number of progress messages that may queue up in the channel.
///
/// The UI drains this channel once per frame. Progress is advisory (the
/// registry is authoritative), so when the host falls this far behind new
/// messages are dropped rather than stalling the commit thread.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 4_096;

/// Messages from the host thread and probe jobs to the commit thread.
pub(crate) enum CommitMessage {
    /// A new batch. Always sent before any of its probe results.
    Open {
        batch: BatchId,
        paths: Vec<String>,
        started: Instant,
    },
    /// The probe result for `paths[seq]` of `batch`.
    Probed {
        batch: BatchId,
        seq: usize,
        result: Result<ProbeReport, ProbeError>,
    },
}

/// Batch numbering and the commit sender. One lock so that `Open` messages
/// reach the commit thread in batch-id order.
struct Dispatch {
    next_batch: BatchId,
    commit_tx: Option<Sender<CommitMessage>>,
}

/// Handle to the running ingestion controller.
///
/// `Sync`: the host's drop hook may call [`handle`](Self::handle) from any
/// thread.
pub struct IngestHandle {
    /// Receiver for progress updates from the ingestion threads.
    pub progress_rx: Receiver<IngestProgress>,
    /// Used only for `BatchStarted`; the commit thread reports the rest.
    progress_tx: Sender<IngestProgress>,
    dispatch: Mutex<Dispatch>,
    cancel_flag: Arc<AtomicBool>,
    pool: rayon::ThreadPool,
    workers: usize,
    source: Arc<dyn StreamSource>,
    sink: Arc<dyn LogSink>,
    registry: SharedRegistry,
    committer: Option<thread::JoinHandle<()>>,
}

/// Start the controller: build the probe pool and spawn the commit thread.
pub fn start_ingest(
    config: &IngestConfig,
    source: Arc<dyn StreamSource>,
    registry: SharedRegistry,
    sink: Arc<dyn LogSink>,
) -> Result<IngestHandle, IngestError> {
    let workers = config.workers.max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("streamsleuth-probe-{i}"))
        .build()?;

    let (progress_tx, progress_rx) =
        crossbeam_channel::bounded::<IngestProgress>(PROGRESS_CHANNEL_CAPACITY);
    let (commit_tx, commit_rx) = crossbeam_channel::unbounded::<CommitMessage>();
    let cancel_flag = Arc::new(AtomicBool::new(false));

    let committer = Committer::new(
        commit_rx,
        progress_tx.clone(),
        Arc::clone(&registry),
        Arc::clone(&sink),
        Arc::clone(&cancel_flag),
    );
    let committer = thread::Builder::new()
        .name("streamsleuth-commit".into())
        .spawn(move || committer.run())?;

    info!(workers, source = source.name(), "ingest controller started");

    Ok(IngestHandle {
        progress_rx,
        progress_tx,
        dispatch: Mutex::new(Dispatch {
            next_batch: 0,
            commit_tx: Some(commit_tx),
        }),
        cancel_flag,
        pool,
        workers,
        source,
        sink,
        registry,
        committer: Some(committer),
    })
}

impl IngestHandle {
    /// Accept one drop event.
    ///
    /// Logs `OnFileDrop: [...]` to the sink on the caller's thread, then
    /// queues one probe per path and returns immediately with the batch id.
    /// Empty drops and drops after shutdown are ignored and return `None`.
    pub fn handle(&self, event: DropEvent) -> Option<BatchId> {
        let DropEvent { x, y, paths } = event;
        if paths.is_empty() {
            debug!(x, y, "ignoring drop with no paths");
            return None;
        }
        if self.is_cancelled() {
            debug!(x, y, paths = paths.len(), "ignoring drop after shutdown");
            return None;
        }

        // Numbering, the sink line, and the announcements all happen under
        // one lock so concurrent callers observe the same batch order.
        let (batch, commit_tx) = {
            let mut dispatch = self.dispatch.lock();
            let commit_tx = dispatch.commit_tx.clone()?;
            let batch = dispatch.next_batch;
            let open = CommitMessage::Open {
                batch,
                paths: paths.clone(),
                started: Instant::now(),
            };
            if commit_tx.send(open).is_err() {
                warn!(batch, "commit thread is gone; drop discarded");
                return None;
            }
            dispatch.next_batch += 1;

            self.sink.log_print(&format!("OnFileDrop: {paths:?}"));
            debug!(batch, x, y, paths = paths.len(), "drop accepted");
            self.report(IngestProgress::BatchStarted {
                batch,
                paths: paths.len(),
            });
            (batch, commit_tx)
        };

        for (seq, path) in paths.into_iter().enumerate() {
            let tx = commit_tx.clone();
            let source = Arc::clone(&self.source);
            let cancel = Arc::clone(&self.cancel_flag);
            self.pool.spawn(move || {
                let result = probe_one(source.as_ref(), &path, &cancel);
                let _ = tx.send(CommitMessage::Probed { batch, seq, result });
            });
        }

        Some(batch)
    }

    /// Request shutdown. Non-blocking; later drops are ignored.
    pub fn shutdown(&self) {
        if !self.cancel_flag.swap(true, Ordering::SeqCst) {
            info!("ingest shutdown requested");
        }
        self.dispatch.lock().commit_tx = None;
    }

    /// Check whether shutdown has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }

    /// The registry this controller commits into.
    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Name of the stream source, for status display.
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    fn report(&self, msg: IngestProgress) {
        commit::report(&self.progress_tx, msg);
    }
}

impl Drop for IngestHandle {
    fn drop(&mut self) {
        self.shutdown();
        if let Some(committer) = self.committer.take() {
            if committer.join().is_err() {
                warn!("commit thread panicked");
            }
        }
    }
}

/// Run on a pool thread: probe `path` unless shutdown was requested.
///
/// Empty paths are not probed; the commit thread rejects them when it
/// builds the `MediaFile`.
fn probe_one(
    source: &dyn StreamSource,
    path: &str,
    cancel: &AtomicBool,
) -> Result<ProbeReport, ProbeError> {
    if cancel.load(Ordering::Relaxed) {
        return Err(ProbeError::Cancelled {
            path: path.to_owned(),
        });
    }
    if path.is_empty() {
        return Ok(ProbeReport::default());
    }
    let started = Instant::now();
    let result = source.probe(Path::new(path), cancel);
    debug!(
        path,
        ok = result.is_ok(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "probe finished"
    );
    result
}
