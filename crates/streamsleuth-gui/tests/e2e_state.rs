/// End-to-end tests for `AppState`, the GUI application state machine.
///
/// These exercise the real drop path (hook registry, ingestion controller,
/// commit thread, shared registry, log sink) without spinning up an egui
/// window. Probing is answered by an in-memory source so no ffprobe is
/// needed.
///
/// **Scope:**
///   - Drop lifecycle (hook dispatch, progress messages, completion)
///   - Counters, error list and selection
///   - Hook detach/re-attach and shutdown
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use streamsleuth_core::config::IngestConfig;
use streamsleuth_core::error::ProbeError;
use streamsleuth_core::host::DropEvent;
use streamsleuth_core::probe::{ProbeReport, StreamDescriptor, StreamSource};
use streamsleuth_gui::state::{AppPhase, AppState};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Answers from a fixed table; unknown paths fail with `NotFound`.
struct TableSource {
    table: HashMap<String, Vec<StreamDescriptor>>,
}

impl StreamSource for TableSource {
    fn name(&self) -> &'static str {
        "table"
    }

    fn probe(&self, path: &Path, _cancel: &AtomicBool) -> Result<ProbeReport, ProbeError> {
        let key = path.to_string_lossy().into_owned();
        match self.table.get(&key) {
            Some(streams) => Ok(ProbeReport::from_streams(streams.clone())),
            None => Err(ProbeError::NotFound { path: key }),
        }
    }
}

fn stream(index: u32, kind: &str, codec: &str) -> StreamDescriptor {
    StreamDescriptor {
        index,
        codec_type: Some(kind.into()),
        codec_name: Some(codec.into()),
        ..Default::default()
    }
}

/// State backed by a table with two known files.
fn make_state() -> AppState {
    let mut table = HashMap::new();
    table.insert(
        "/media/movie.mkv".to_owned(),
        vec![
            stream(0, "video", "h264"),
            stream(1, "audio", "aac"),
            stream(2, "subtitle", "subrip"),
        ],
    );
    table.insert("/media/song.flac".to_owned(), vec![stream(0, "audio", "flac")]);

    let config = IngestConfig {
        workers: 2,
        ..IngestConfig::default()
    };
    AppState::with_source(&config, Arc::new(TableSource { table })).unwrap()
}

fn drop_paths(paths: &[&str]) -> DropEvent {
    DropEvent::new(10, 20, paths.iter().map(|p| p.to_string()).collect())
}

/// Pump `process_ingest_messages()` until `done` holds or the deadline
/// expires.
fn pump_until(state: &mut AppState, done: impl Fn(&AppState) -> bool) {
    let deadline = Instant::now() + Duration::from_secs(30);
    loop {
        state.process_ingest_messages();
        if done(state) {
            return;
        }
        assert!(
            Instant::now() < deadline,
            "ingest did not settle within 30 seconds"
        );
        std::thread::sleep(Duration::from_millis(10));
    }
}

/// Pump until `n` paths have been committed or failed and nothing is queued.
fn pump_files(state: &mut AppState, n: u64) {
    pump_until(state, |s| {
        s.phase == AppPhase::Idle && s.files_committed + s.files_failed >= n
    });
}

// ── Initial state ─────────────────────────────────────────────────────────────

#[test]
fn new_state_is_idle_with_hook_attached() {
    let state = make_state();
    assert_eq!(state.phase, AppPhase::Idle);
    assert!(state.is_drop_hook_attached());
    assert!(state.hooks.is_registered());
    assert!(state.registry.read().is_empty());
    assert!(state.log.is_empty());
    assert_eq!(state.probe_label, "table");
}

// ── Drop lifecycle ────────────────────────────────────────────────────────────

/// A delivered drop flips the phase to `Probing` as soon as the
/// `BatchStarted` message is processed.
#[test]
fn drop_sets_probing_phase() {
    let mut state = make_state();
    assert!(state.deliver_drop(drop_paths(&["/media/movie.mkv"])));
    state.process_ingest_messages();
    assert!(
        matches!(state.phase, AppPhase::Probing | AppPhase::Idle),
        "phase must be Probing (or already Idle on a fast machine)"
    );
    pump_files(&mut state, 1);
    assert_eq!(state.phase, AppPhase::Idle);
}

#[test]
fn drop_commits_files_in_order_and_selects_first() {
    let mut state = make_state();
    state.deliver_drop(drop_paths(&["/media/song.flac", "/media/movie.mkv"]));
    pump_files(&mut state, 2);

    assert_eq!(state.files_committed, 2);
    assert_eq!(state.files_failed, 0);
    assert_eq!(state.pending_paths, 0);

    let registry = state.registry.read();
    let paths: Vec<&str> = registry.files().iter().map(|f| f.path()).collect();
    assert_eq!(paths, ["/media/song.flac", "/media/movie.mkv"]);
    assert_eq!(registry.total_frames(), 4);
    drop(registry);

    assert_eq!(state.selected_file, Some(0));
    let summary = state.last_batch.expect("batch summary recorded");
    assert_eq!((summary.committed, summary.failed), (2, 0));
}

#[test]
fn log_receives_drop_and_stream_lines() {
    let mut state = make_state();
    state.deliver_drop(drop_paths(&["/media/song.flac"]));
    pump_files(&mut state, 1);

    let messages = state.log.messages();
    assert_eq!(messages.len(), 2, "one drop line and one stream line: {messages:?}");
    assert!(messages[0].starts_with("OnFileDrop: "));
    assert!(messages[0].contains("/media/song.flac"));
    assert!(messages[1].starts_with("Stream: "));
    assert!(messages[1].contains("flac"));
}

#[test]
fn failed_path_is_counted_and_listed() {
    let mut state = make_state();
    state.deliver_drop(drop_paths(&["/media/missing.avi", "/media/song.flac"]));
    pump_files(&mut state, 2);

    assert_eq!(state.files_committed, 1);
    assert_eq!(state.files_failed, 1);
    assert_eq!(state.errors.len(), 1);
    assert_eq!(state.errors[0].0, "/media/missing.avi");
    assert!(state
        .log
        .messages()
        .iter()
        .any(|m| m.starts_with("Error: ")));
    // The successful path still became the first selection.
    assert_eq!(state.selected_file, Some(0));
}

#[test]
fn redrop_counts_replacement() {
    let mut state = make_state();
    state.deliver_drop(drop_paths(&["/media/movie.mkv"]));
    pump_files(&mut state, 1);
    state.deliver_drop(drop_paths(&["/media/movie.mkv"]));
    pump_files(&mut state, 2);

    assert_eq!(state.files_committed, 2);
    assert_eq!(state.files_replaced, 1);
    assert_eq!(state.registry.read().len(), 1);
}

#[test]
fn empty_drop_changes_nothing() {
    let mut state = make_state();
    // The hook still fires; the controller ignores the empty batch.
    assert!(state.deliver_drop(DropEvent::new(0, 0, Vec::new())));
    std::thread::sleep(Duration::from_millis(50));
    state.process_ingest_messages();
    assert_eq!(state.phase, AppPhase::Idle);
    assert!(state.log.is_empty());
}

// ── Hook and shutdown ─────────────────────────────────────────────────────────

#[test]
fn detached_hook_ignores_drops_until_reattached() {
    let mut state = make_state();
    state.detach_drop_hook();
    assert!(!state.is_drop_hook_attached());
    assert!(!state.deliver_drop(drop_paths(&["/media/song.flac"])));
    state.process_ingest_messages();
    assert!(state.log.is_empty());

    state.attach_drop_hook().unwrap();
    assert!(state.deliver_drop(drop_paths(&["/media/song.flac"])));
    pump_files(&mut state, 1);
    assert_eq!(state.files_committed, 1);
}

#[test]
fn shutdown_reaches_stopped_and_rejects_drops() {
    let mut state = make_state();
    state.shutdown();
    pump_until(&mut state, |s| s.phase == AppPhase::Stopped);
    assert!(!state.is_drop_hook_attached());
    assert!(!state.deliver_drop(drop_paths(&["/media/song.flac"])));
    assert!(state.registry.read().is_empty());
}

// ── Selection and filtering ───────────────────────────────────────────────────

#[test]
fn select_file_resets_stream_selection() {
    let mut state = make_state();
    state.deliver_drop(drop_paths(&["/media/movie.mkv", "/media/song.flac"]));
    pump_files(&mut state, 2);

    state.selected_stream = Some(2);
    state.select_file(0);
    assert_eq!(state.selected_stream, Some(2), "same file keeps stream selection");
    state.select_file(1);
    assert_eq!(state.selected_file, Some(1));
    assert_eq!(state.selected_stream, None);
}

#[test]
fn filter_matches_path_case_insensitively() {
    let mut state = make_state();
    state.deliver_drop(drop_paths(&["/media/movie.mkv", "/media/song.flac"]));
    pump_files(&mut state, 2);

    assert_eq!(state.filtered_positions(), vec![0, 1]);
    state.file_filter = "  FLAC ".into();
    assert_eq!(state.filtered_positions(), vec![1]);
    state.file_filter = "nothing".into();
    assert!(state.filtered_positions().is_empty());
}
