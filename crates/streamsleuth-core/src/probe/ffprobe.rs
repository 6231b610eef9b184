//! ffprobe-backed [`StreamSource`].
//!
//! Shells out to `ffprobe -v error -print_format json -show_format
//! -show_streams <path>` and parses the JSON into a [`ProbeReport`].
//!
//! The child is waited on in short `wait_timeout` slices so that shutdown
//! (the shared cancel flag) and the optional timeout can kill it promptly.
//! stdout and stderr are drained on their own threads so a chatty child can
//! never block on a full pipe; both threads are joined on every exit path.

use super::{check_path, ProbeReport, StreamSource};
use crate::config::IngestConfig;
use crate::error::ProbeError;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use wait_timeout::ChildExt;

/// Longest single wait before the cancel flag is checked again.
const CANCEL_SLICE: Duration = Duration::from_millis(50);

const TOOL_NAME: &str = "ffprobe";

/// A stream source backed by the `ffprobe` CLI.
#[derive(Debug, Clone)]
pub struct FfprobeSource {
    ffprobe_path: PathBuf,
    timeout: Option<Duration>,
}

impl FfprobeSource {
    /// Use the ffprobe binary at `ffprobe_path`, with no timeout.
    pub fn new(ffprobe_path: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
            timeout: None,
        }
    }

    /// Find ffprobe on `PATH`.
    pub fn from_path() -> Option<Self> {
        which::which(TOOL_NAME).ok().map(Self::new)
    }

    /// Build from configuration.
    ///
    /// An explicit `ffprobe_path` wins. Otherwise `PATH` is searched, and if
    /// that fails the bare name is used so that every probe reports a
    /// spawn error through the normal per-path failure route.
    pub fn from_config(config: &IngestConfig) -> Self {
        let source = match &config.ffprobe_path {
            Some(path) => Self::new(path.clone()),
            None => Self::from_path().unwrap_or_else(|| {
                warn!("ffprobe not found on PATH; every probe will fail until it is installed");
                Self::new(TOOL_NAME)
            }),
        };
        source.with_timeout(config.probe_timeout())
    }

    /// Kill the child and report `TimedOut` after `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn ffprobe_path(&self) -> &Path {
        &self.ffprobe_path
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// `true` if the configured binary exists or resolves on `PATH`.
    pub fn is_available(&self) -> bool {
        self.ffprobe_path.is_file() || which::which(&self.ffprobe_path).is_ok()
    }

    fn tool(&self) -> String {
        self.ffprobe_path.display().to_string()
    }

    /// Wait for `child`, honouring cancellation and the timeout.
    ///
    /// On cancellation or timeout the child is killed and reaped before
    /// returning.
    fn wait(
        &self,
        child: &mut Child,
        shown: &str,
        cancel: &AtomicBool,
    ) -> Result<ExitStatus, ProbeError> {
        let deadline = self.timeout.map(|limit| Instant::now() + limit);
        loop {
            if cancel.load(Ordering::Relaxed) {
                kill_and_reap(child);
                return Err(ProbeError::Cancelled {
                    path: shown.to_owned(),
                });
            }

            let slice = match deadline {
                Some(deadline) => {
                    let left = deadline.saturating_duration_since(Instant::now());
                    if left.is_zero() {
                        kill_and_reap(child);
                        return Err(ProbeError::TimedOut {
                            path: shown.to_owned(),
                            timeout: self.timeout.unwrap_or_default(),
                        });
                    }
                    left.min(CANCEL_SLICE)
                }
                None => CANCEL_SLICE,
            };

            match child.wait_timeout(slice) {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {}
                Err(source) => {
                    kill_and_reap(child);
                    return Err(ProbeError::Io {
                        path: shown.to_owned(),
                        source,
                    });
                }
            }
        }
    }
}

impl StreamSource for FfprobeSource {
    fn name(&self) -> &'static str {
        TOOL_NAME
    }

    fn probe(&self, path: &Path, cancel: &AtomicBool) -> Result<ProbeReport, ProbeError> {
        let shown = path.display().to_string();
        if cancel.load(Ordering::Relaxed) {
            return Err(ProbeError::Cancelled { path: shown });
        }
        check_path(path)?;

        let mut child = Command::new(&self.ffprobe_path)
            .args(["-v", "error", "-print_format", "json"])
            .args(["-show_format", "-show_streams"])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ProbeError::Spawn {
                tool: self.tool(),
                source,
            })?;

        let readers = match (child.stdout.take(), child.stderr.take()) {
            (Some(out), Some(err)) => drain(out, "ffprobe-stdout")
                .and_then(|o| drain(err, "ffprobe-stderr").map(|e| (o, e))),
            _ => Err(io::Error::other("child pipes were not captured")),
        };
        let (stdout, stderr) = match readers {
            Ok(pair) => pair,
            Err(source) => {
                kill_and_reap(&mut child);
                return Err(ProbeError::Io {
                    path: shown,
                    source,
                });
            }
        };

        // The child is reaped on every path out of `wait`, so its pipes are
        // closed and the drain threads finish.
        let waited = self.wait(&mut child, &shown, cancel);
        let stdout = stdout.join().unwrap_or_default();
        let stderr = stderr.join().unwrap_or_default();
        let status = waited?;
        let stderr = String::from_utf8_lossy(&stderr).trim().to_owned();

        debug!(path = %shown, %status, stdout_bytes = stdout.len(), "ffprobe finished");

        if !status.success() {
            if stderr.contains("Invalid data found") {
                return Err(ProbeError::Unsupported {
                    path: shown,
                    reason: stderr,
                });
            }
            return Err(ProbeError::Exit {
                tool: self.tool(),
                status: status.to_string(),
                stderr,
            });
        }

        ProbeReport::from_json(&shown, &String::from_utf8_lossy(&stdout))
    }
}

/// Read `reader` to the end on a named background thread.
fn drain<R: Read + Send + 'static>(mut reader: R, name: &str) -> io::Result<JoinHandle<Vec<u8>>> {
    thread::Builder::new().name(name.into()).spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        buf
    })
}

fn kill_and_reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never() -> AtomicBool {
        AtomicBool::new(false)
    }

    #[test]
    fn missing_file_is_not_found() {
        let source = FfprobeSource::new("ffprobe");
        let err = source
            .probe(Path::new("/definitely/not/here.mp4"), &never())
            .unwrap_err();
        assert!(matches!(err, ProbeError::NotFound { .. }), "got {err:?}");
    }

    #[test]
    fn directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = FfprobeSource::new("ffprobe");
        let err = source.probe(dir.path(), &never()).unwrap_err();
        assert!(matches!(err, ProbeError::NotAFile { .. }), "got {err:?}");
    }

    #[test]
    fn missing_tool_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("clip.mp4");
        std::fs::write(&file, b"not really a video").unwrap();

        let source = FfprobeSource::new(dir.path().join("no-such-ffprobe"));
        assert!(!source.is_available());
        let err = source.probe(&file, &never()).unwrap_err();
        assert!(matches!(err, ProbeError::Spawn { .. }), "got {err:?}");
    }

    #[test]
    fn cancelled_before_start() {
        let source = FfprobeSource::new("ffprobe");
        let cancel = AtomicBool::new(true);
        let err = source.probe(Path::new("whatever.mkv"), &cancel).unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn config_overrides_path_and_timeout() {
        let config = IngestConfig {
            ffprobe_path: Some(PathBuf::from("/opt/ff/ffprobe")),
            probe_timeout_secs: Some(7),
            ..IngestConfig::default()
        };
        let source = FfprobeSource::from_config(&config);
        assert_eq!(source.ffprobe_path(), Path::new("/opt/ff/ffprobe"));
        assert_eq!(source.timeout(), Some(Duration::from_secs(7)));
    }

    /// Write an executable stand-in for ffprobe that runs `body`.
    #[cfg(unix)]
    fn fake_ffprobe(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let tool = dir.join("ffprobe");
        std::fs::write(&tool, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();
        tool
    }

    #[cfg(unix)]
    fn media_file(dir: &Path) -> PathBuf {
        let file = dir.join("clip.mkv");
        std::fs::write(&file, b"bytes").unwrap();
        file
    }

    #[cfg(unix)]
    #[test]
    fn hung_ffprobe_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let tool = fake_ffprobe(dir.path(), "exec sleep 30");
        let file = media_file(dir.path());
        let source = FfprobeSource::new(tool).with_timeout(Some(Duration::from_millis(300)));

        let started = Instant::now();
        let err = source.probe(&file, &never()).unwrap_err();
        let elapsed = started.elapsed();

        assert!(
            matches!(err, ProbeError::TimedOut { timeout, .. } if timeout == Duration::from_millis(300)),
            "got {err:?}"
        );
        assert!(elapsed >= Duration::from_millis(300), "returned early: {elapsed:?}");
        assert!(elapsed < Duration::from_secs(10), "kill was not prompt: {elapsed:?}");
    }

    #[cfg(unix)]
    #[test]
    fn cancel_kills_running_ffprobe() {
        let dir = tempfile::tempdir().unwrap();
        let tool = fake_ffprobe(dir.path(), "exec sleep 30");
        let file = media_file(dir.path());
        let source = FfprobeSource::new(tool);

        let cancel = std::sync::Arc::new(AtomicBool::new(false));
        let flag = std::sync::Arc::clone(&cancel);
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(200));
            flag.store(true, Ordering::SeqCst);
        });

        let started = Instant::now();
        let err = source.probe(&file, &cancel).unwrap_err();
        canceller.join().unwrap();

        assert!(err.is_cancelled(), "got {err:?}");
        assert!(
            started.elapsed() < Duration::from_secs(10),
            "cancel was not prompt"
        );
    }

    #[cfg(unix)]
    #[test]
    fn fake_ffprobe_output_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let tool = fake_ffprobe(
            dir.path(),
            r#"echo '{"streams":[{"index":0,"codec_type":"audio","codec_name":"opus"}]}'"#,
        );
        let file = media_file(dir.path());

        let report = FfprobeSource::new(tool).probe(&file, &never()).unwrap();
        assert_eq!(report.streams.len(), 1);
        assert_eq!(report.streams[0].kind(), "audio");
    }

    #[cfg(unix)]
    #[test]
    fn rejected_container_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let tool = fake_ffprobe(
            dir.path(),
            "echo 'clip.mkv: Invalid data found when processing input' >&2; exit 1",
        );
        let file = media_file(dir.path());

        let err = FfprobeSource::new(tool).probe(&file, &never()).unwrap_err();
        assert!(matches!(err, ProbeError::Unsupported { .. }), "got {err:?}");
    }

    /// Runs only where ffprobe is installed: a text file is rejected.
    #[test]
    fn real_ffprobe_rejects_garbage() {
        let Some(source) = FfprobeSource::from_path() else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("garbage.mp4");
        std::fs::write(&file, b"hello, this is plainly not a container").unwrap();

        let err = source.probe(&file, &never()).unwrap_err();
        assert!(
            matches!(err, ProbeError::Unsupported { .. } | ProbeError::Exit { .. }),
            "got {err:?}"
        );
    }
}
