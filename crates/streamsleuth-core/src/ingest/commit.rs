/// The commit thread: the registry's single writer.
///
/// Probe results arrive in completion order. Each open batch keeps a
/// reorder buffer indexed by path position; results are committed only
/// from the front of the oldest open batch, so the registry and the sink
/// see paths in exactly the order they were dropped.
use super::progress::{BatchId, IngestProgress};
use super::CommitMessage;
use crate::error::ProbeError;
use crate::model::media_type::detect_path;
use crate::model::{MediaFile, SharedRegistry};
use crate::normalize::normalize;
use crate::probe::ProbeReport;
use crate::sink::LogSink;

use crossbeam_channel::{Receiver, Sender, TrySendError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

type ProbeResult = Result<ProbeReport, ProbeError>;

/// Send a progress message without blocking.
///
/// A full channel means the host is not draining; the message is dropped.
pub(super) fn report(tx: &Sender<IngestProgress>, msg: IngestProgress) {
    if let Err(TrySendError::Full(msg)) = tx.try_send(msg) {
        warn!(?msg, "progress channel full; update dropped");
    }
}

struct PendingBatch {
    id: BatchId,
    paths: Vec<String>,
    results: Vec<Option<ProbeResult>>,
    /// Next path position to commit.
    next: usize,
    committed: usize,
    failed: usize,
    started: Instant,
}

impl PendingBatch {
    fn is_done(&self) -> bool {
        self.next == self.paths.len()
    }
}

/// Where committed work goes.
struct Outputs {
    progress: Sender<IngestProgress>,
    registry: SharedRegistry,
    sink: Arc<dyn LogSink>,
}

pub(super) struct Committer {
    rx: Receiver<CommitMessage>,
    out: Outputs,
    cancel: Arc<AtomicBool>,
    pending: VecDeque<PendingBatch>,
}

impl Committer {
    pub(super) fn new(
        rx: Receiver<CommitMessage>,
        progress: Sender<IngestProgress>,
        registry: SharedRegistry,
        sink: Arc<dyn LogSink>,
        cancel: Arc<AtomicBool>,
    ) -> Self {
        Self {
            rx,
            out: Outputs {
                progress,
                registry,
                sink,
            },
            cancel,
            pending: VecDeque::new(),
        }
    }

    /// Run until shutdown or until every sender is gone.
    pub(super) fn run(mut self) {
        while let Ok(msg) = self.rx.recv() {
            if self.cancelled() {
                break;
            }
            match msg {
                CommitMessage::Open {
                    batch,
                    paths,
                    started,
                } => {
                    let len = paths.len();
                    self.pending.push_back(PendingBatch {
                        id: batch,
                        paths,
                        results: std::iter::repeat_with(|| None).take(len).collect(),
                        next: 0,
                        committed: 0,
                        failed: 0,
                        started,
                    });
                }
                CommitMessage::Probed { batch, seq, result } => {
                    match self
                        .pending
                        .iter_mut()
                        .find(|p| p.id == batch)
                        .and_then(|p| p.results.get_mut(seq))
                    {
                        Some(slot) => *slot = Some(result),
                        None => warn!(batch, seq, "probe result for unknown batch slot"),
                    }
                }
            }
            self.commit_ready();
        }

        if !self.pending.is_empty() {
            info!(
                batches = self.pending.len(),
                "commit thread stopping with uncommitted batches"
            );
        }
        report(&self.out.progress, IngestProgress::Stopped);
        debug!("commit thread exited");
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Commit every result that is next in line, batch by batch.
    fn commit_ready(&mut self) {
        while let Some(batch) = self.pending.front_mut() {
            while !batch.is_done() {
                if self.cancel.load(Ordering::Relaxed) {
                    return;
                }
                let Some(result) = batch.results[batch.next].take() else {
                    return;
                };
                let path = std::mem::take(&mut batch.paths[batch.next]);
                batch.next += 1;
                if self.out.commit(batch.id, path, result) {
                    batch.committed += 1;
                } else {
                    batch.failed += 1;
                }
            }

            let duration = batch.started.elapsed();
            info!(
                batch = batch.id,
                committed = batch.committed,
                failed = batch.failed,
                ?duration,
                "batch complete"
            );
            report(
                &self.out.progress,
                IngestProgress::BatchComplete {
                    batch: batch.id,
                    committed: batch.committed,
                    failed: batch.failed,
                    duration,
                },
            );
            self.pending.pop_front();
        }
    }
}

impl Outputs {
    /// Commit one path. Returns `false` if it failed and was skipped.
    fn commit(&self, batch: BatchId, path: String, result: ProbeResult) -> bool {
        let report_result = result.map_err(|e| e.to_string()).and_then(|report| {
            MediaFile::new(path.clone())
                .map(|file| (file, report))
                .map_err(|e| e.to_string())
        });
        let (mut file, probe) = match report_result {
            Ok(pair) => pair,
            Err(message) => {
                self.sink.log_print(&format!("Error: {message}"));
                debug!(batch, path = %path, %message, "path skipped");
                report(
                    &self.progress,
                    IngestProgress::ProbeFailed {
                        batch,
                        path,
                        message,
                    },
                );
                return false;
            }
        };

        file.set_media_type(detect_path(&path));
        for descriptor in &probe.streams {
            self.sink.log_print(&format!("Stream: {descriptor}"));
            file.push_frame(normalize(descriptor));
        }
        if let Some(format) = &probe.format {
            file.set_container(format.size_bytes().unwrap_or(0), format.duration());
        }

        let frames = file.data().len();
        let outcome = self.registry.write().append(file);
        let replaced = outcome.is_replacement();
        if replaced {
            self.sink.log_print(&format!("Replaced: {path}"));
            warn!(
                path = %path,
                position = outcome.position(),
                "path dropped again; registry entry replaced in place"
            );
        }
        debug!(batch, path = %path, frames, "file committed");

        report(
            &self.progress,
            IngestProgress::FileCommitted {
                batch,
                path,
                frames,
                replaced,
            },
        );
        true
    }
}
