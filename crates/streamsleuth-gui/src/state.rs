/// Application state management.
///
/// Centralises all mutable state that the UI reads and writes.
/// The ingestion threads communicate via channels; state updates happen
/// in `process_ingest_messages()` which runs once per frame.
///
/// Probed files live in the **shared registry** (`Arc<RwLock<FileRegistry>>`)
/// so panels read committed results directly; progress messages only drive
/// counters and the status line.
use std::sync::Arc;
use std::time::Duration;
use streamsleuth_core::config::IngestConfig;
use streamsleuth_core::error::{HostError, IngestError};
use streamsleuth_core::host::{DropEvent, DropHookGuard, DropHookRegistry};
use streamsleuth_core::ingest::progress::IngestProgress;
use streamsleuth_core::ingest::{start_ingest, IngestHandle};
use streamsleuth_core::model::{FileRegistry, SharedRegistry};
use streamsleuth_core::probe::{FfprobeSource, StreamSource};
use streamsleuth_core::sink::{LogSink, MemorySink, TeeSink, TracingSink};
use tracing::{info, warn};

/// The current phase of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    /// Idle: nothing queued, showing whatever has been committed.
    Idle,
    /// At least one drop batch is still being probed.
    Probing,
    /// The ingestion controller has shut down; drops are ignored.
    Stopped,
}

/// Summary of the most recently completed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub committed: usize,
    pub failed: usize,
    pub duration: Duration,
}

/// Maximum number of ingest-progress messages drained from the channel per frame.
///
/// Prevents a backlog (e.g. after the window was hidden) from blocking the
/// render thread for a perceptible duration when it is eventually shown again.
const MAX_MESSAGES_PER_FRAME: usize = 300;

/// Maximum retained `(path, message)` failures for the error list.
const MAX_ERRORS: usize = 1_000;

/// All application state.
///
/// Field order matters for teardown: `drop_hook` is declared before
/// `ingest`, so the hook is released before the controller is joined.
pub struct AppState {
    // ── Host integration ───────────────────────────────
    drop_hook: Option<DropHookGuard>,
    pub hooks: DropHookRegistry,
    pub ingest: Arc<IngestHandle>,
    pub registry: SharedRegistry,
    /// Sink lines shown in the log panel.
    pub log: Arc<MemorySink>,

    // ── Ingestion progress ─────────────────────────────
    pub phase: AppPhase,
    /// Batches announced but not yet complete.
    pub active_batches: usize,
    /// Paths queued but not yet committed or failed.
    pub pending_paths: usize,
    pub files_committed: u64,
    pub files_failed: u64,
    pub files_replaced: u64,
    pub last_batch: Option<BatchSummary>,
    pub errors: Vec<(String, String)>,

    // ── Probe tool ─────────────────────────────────────
    /// Human-readable description of the probing tool.
    pub probe_label: String,
    pub probe_available: bool,

    // ── UI state ───────────────────────────────────────
    /// Position of the selected file in the registry.
    pub selected_file: Option<usize>,
    /// Index of the selected row in the stream table.
    pub selected_stream: Option<usize>,
    /// Number of files currently hovering over the window.
    pub hovered_files: usize,
    pub file_filter: String,
    pub show_log_panel: bool,
    pub show_errors: bool,
    pub show_about: bool,
    /// `true` = dark mode (default), `false` = light mode.
    pub dark_mode: bool,
}

impl AppState {
    /// Create state backed by ffprobe, located per `config`.
    pub fn new(config: &IngestConfig) -> Result<Self, IngestError> {
        let source = FfprobeSource::from_config(config);
        let available = source.is_available();
        let label = format!("ffprobe: {}", source.ffprobe_path().display());
        if !available {
            warn!("{label} is not available; drops will be logged as errors");
        }
        let mut state = Self::with_source(config, Arc::new(source))?;
        state.probe_label = label;
        state.probe_available = available;
        Ok(state)
    }

    /// Create state backed by an arbitrary stream source.
    ///
    /// The drop hook is attached before returning.
    pub fn with_source(
        config: &IngestConfig,
        source: Arc<dyn StreamSource>,
    ) -> Result<Self, IngestError> {
        let registry = FileRegistry::shared();
        let log = Arc::new(MemorySink::new(config.log_capacity));
        let sink: Arc<dyn LogSink> = Arc::new(TeeSink::new(vec![
            log.clone(),
            Arc::new(TracingSink),
        ]));
        let probe_label = source.name().to_owned();
        let ingest = Arc::new(start_ingest(config, source, Arc::clone(&registry), sink)?);

        let mut state = Self {
            drop_hook: None,
            hooks: DropHookRegistry::new(),
            ingest,
            registry,
            log,
            phase: AppPhase::Idle,
            active_batches: 0,
            pending_paths: 0,
            files_committed: 0,
            files_failed: 0,
            files_replaced: 0,
            last_batch: None,
            errors: Vec::new(),
            probe_label,
            probe_available: true,
            selected_file: None,
            selected_stream: None,
            hovered_files: 0,
            file_filter: String::new(),
            show_log_panel: true,
            show_errors: false,
            show_about: false,
            dark_mode: true,
        };
        if let Err(e) = state.attach_drop_hook() {
            warn!("drop hook not attached: {e}");
        }
        Ok(state)
    }

    /// Route window drops into the ingestion controller.
    pub fn attach_drop_hook(&mut self) -> Result<(), HostError> {
        if self.drop_hook.is_some() {
            return Ok(());
        }
        let target = Arc::clone(&self.ingest);
        let guard = self.hooks.register(move |event| {
            target.handle(event);
        })?;
        self.drop_hook = Some(guard);
        Ok(())
    }

    /// Stop routing drops. Later drops are ignored until re-attached.
    pub fn detach_drop_hook(&mut self) {
        if self.drop_hook.take().is_some() {
            info!("drop hook detached");
        }
    }

    pub fn is_drop_hook_attached(&self) -> bool {
        self.drop_hook.is_some()
    }

    /// Deliver a window drop through the hook.
    ///
    /// Returns `false` when no hook is attached and the drop was ignored.
    pub fn deliver_drop(&mut self, event: DropEvent) -> bool {
        self.hovered_files = 0;
        self.hooks.dispatch(event)
    }

    /// Stop accepting drops and shut the controller down.
    pub fn shutdown(&mut self) {
        self.detach_drop_hook();
        self.ingest.shutdown();
    }

    /// Process pending ingest progress messages. Called once per frame.
    ///
    /// Returns `true` if the UI should repaint (new data arrived).
    pub fn process_ingest_messages(&mut self) -> bool {
        let mut repaint = false;

        // Drain available messages without blocking, subject to a per-frame
        // budget.
        let mut messages_this_frame = 0usize;
        while messages_this_frame < MAX_MESSAGES_PER_FRAME {
            let msg = match self.ingest.progress_rx.try_recv() {
                Ok(m) => m,
                Err(crossbeam_channel::TryRecvError::Empty) => break,
                Err(crossbeam_channel::TryRecvError::Disconnected) => {
                    self.phase = AppPhase::Stopped;
                    break;
                }
            };
            messages_this_frame += 1;
            repaint = true;
            self.apply(msg);
        }
        repaint
    }

    fn apply(&mut self, msg: IngestProgress) {
        match msg {
            IngestProgress::BatchStarted { paths, .. } => {
                self.active_batches += 1;
                self.pending_paths += paths;
                self.phase = AppPhase::Probing;
            }
            IngestProgress::FileCommitted { path, replaced, .. } => {
                self.pending_paths = self.pending_paths.saturating_sub(1);
                self.files_committed += 1;
                if replaced {
                    self.files_replaced += 1;
                }
                // Select the first file that arrives so the stream table
                // is not empty after the first drop.
                if self.selected_file.is_none() {
                    self.selected_file = self.registry.read().position(&path);
                }
            }
            IngestProgress::ProbeFailed { path, message, .. } => {
                self.pending_paths = self.pending_paths.saturating_sub(1);
                self.files_failed += 1;
                if self.errors.len() < MAX_ERRORS {
                    self.errors.push((path, message));
                }
            }
            IngestProgress::BatchComplete {
                committed,
                failed,
                duration,
                ..
            } => {
                self.active_batches = self.active_batches.saturating_sub(1);
                self.last_batch = Some(BatchSummary {
                    committed,
                    failed,
                    duration,
                });
                if self.active_batches == 0 {
                    self.pending_paths = 0;
                    self.phase = AppPhase::Idle;
                }
            }
            IngestProgress::Stopped => {
                self.phase = AppPhase::Stopped;
                self.active_batches = 0;
                self.pending_paths = 0;
            }
        }
    }

    /// Select a file by registry position, resetting the stream selection.
    pub fn select_file(&mut self, position: usize) {
        if self.selected_file != Some(position) {
            self.selected_file = Some(position);
            self.selected_stream = None;
        }
    }

    /// Registry positions matching the filter, in drop order.
    pub fn filtered_positions(&self) -> Vec<usize> {
        let needle = self.file_filter.trim().to_lowercase();
        let registry = self.registry.read();
        registry
            .files()
            .iter()
            .enumerate()
            .filter(|(_, f)| needle.is_empty() || f.path().to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }
}

impl Drop for AppState {
    /// Window closed: release the drop hook, then stop the controller.
    fn drop(&mut self) {
        self.shutdown();
    }
}
