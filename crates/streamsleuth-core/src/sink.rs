/// Diagnostic sinks: free-form strings with no levels.
///
/// The ingestion controller writes one line per drop batch, failure,
/// reported stream, and registry replacement. Sinks must never fail and
/// never block for long; they are called from the host thread and from
/// the commit thread.
use chrono::{DateTime, Local};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Receiver of free-form diagnostic lines.
pub trait LogSink: Send + Sync {
    fn log_print(&self, message: &str);
}

/// Forwards every line to `tracing` at INFO with target `streamsleuth::sink`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log_print(&self, message: &str) {
        tracing::info!(target: "streamsleuth::sink", "{message}");
    }
}

/// One line held by a [`MemorySink`].
#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    /// Wall-clock time the line was logged.
    pub at: DateTime<Local>,
    pub message: String,
}

/// Bounded in-memory ring of recent lines.
///
/// Oldest lines are evicted once `capacity` is reached. Used by the GUI
/// log panel and by tests asserting on exact sink output.
#[derive(Debug)]
pub struct MemorySink {
    inner: Mutex<Ring>,
}

#[derive(Debug)]
struct Ring {
    lines: VecDeque<LogLine>,
    capacity: usize,
    /// Lines ever logged, including evicted ones.
    total: u64,
}

impl MemorySink {
    /// `capacity` is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Mutex::new(Ring {
                lines: VecDeque::with_capacity(capacity.min(1024)),
                capacity,
                total: 0,
            }),
        }
    }

    /// Copy of the retained lines, oldest first.
    pub fn lines(&self) -> Vec<LogLine> {
        self.inner.lock().lines.iter().cloned().collect()
    }

    /// Retained messages without timestamps, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.inner
            .lock()
            .lines
            .iter()
            .map(|l| l.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity
    }

    pub fn total_logged(&self) -> u64 {
        self.inner.lock().total
    }

    pub fn clear(&self) {
        self.inner.lock().lines.clear();
    }
}

impl LogSink for MemorySink {
    fn log_print(&self, message: &str) {
        let line = LogLine {
            at: Local::now(),
            message: message.to_owned(),
        };
        let mut ring = self.inner.lock();
        if ring.lines.len() >= ring.capacity {
            ring.lines.pop_front();
        }
        ring.lines.push_back(line);
        ring.total += 1;
    }
}

/// Fans every line out to several sinks, in order.
#[derive(Clone, Default)]
pub struct TeeSink {
    sinks: Vec<Arc<dyn LogSink>>,
}

impl TeeSink {
    pub fn new(sinks: Vec<Arc<dyn LogSink>>) -> Self {
        Self { sinks }
    }

    pub fn with(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl LogSink for TeeSink {
    fn log_print(&self, message: &str) {
        for sink in &self.sinks {
            sink.log_print(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_keeps_order() {
        let sink = MemorySink::new(10);
        sink.log_print("one");
        sink.log_print("two");
        assert_eq!(sink.messages(), ["one", "two"]);
        assert_eq!(sink.total_logged(), 2);
    }

    #[test]
    fn memory_sink_evicts_oldest() {
        let sink = MemorySink::new(2);
        for msg in ["a", "b", "c"] {
            sink.log_print(msg);
        }
        assert_eq!(sink.messages(), ["b", "c"]);
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.total_logged(), 3);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let sink = MemorySink::new(0);
        sink.log_print("x");
        assert_eq!(sink.capacity(), 1);
        assert_eq!(sink.messages(), ["x"]);
    }

    #[test]
    fn clear_keeps_total() {
        let sink = MemorySink::new(4);
        sink.log_print("x");
        sink.clear();
        assert!(sink.is_empty());
        assert_eq!(sink.total_logged(), 1);
    }

    #[test]
    fn tee_fans_out() {
        let a = Arc::new(MemorySink::new(4));
        let b = Arc::new(MemorySink::new(4));
        let tee = TeeSink::new(vec![a.clone()]).with(b.clone());
        tee.log_print("hello");
        assert_eq!(a.messages(), ["hello"]);
        assert_eq!(b.messages(), ["hello"]);
    }
}
