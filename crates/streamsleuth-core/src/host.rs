/// Drop-hook registration with scoped release.
///
/// The host window owns a [`DropHookRegistry`]. The application registers a
/// callback and keeps the returned [`DropHookGuard`] for as long as it wants
/// drops. Dropping the guard deregisters the callback, so release happens on
/// every exit path including unwinding.
///
/// ```ignore
/// let hooks = DropHookRegistry::new();
/// let guard = hooks.register(move |event| ingest.handle(event))?;
/// hooks.dispatch(DropEvent::new(10, 20, vec!["a.mkv".into()]));
/// drop(guard); // later dispatches are ignored
/// ```
use crate::error::HostError;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// A file drop delivered by the host window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    /// Pointer position in window coordinates. Informational only.
    pub x: i32,
    pub y: i32,
    /// Dropped paths, in the order the host delivered them.
    pub paths: Vec<String>,
}

impl DropEvent {
    pub fn new(x: i32, y: i32, paths: Vec<String>) -> Self {
        Self { x, y, paths }
    }
}

type Callback = Arc<dyn Fn(DropEvent) + Send + Sync>;

struct Hook {
    id: u64,
    callback: Callback,
}

#[derive(Default)]
struct Slot {
    hook: Mutex<Option<Hook>>,
    next_id: AtomicU64,
}

/// Holds at most one drop callback at a time.
#[derive(Clone, Default)]
pub struct DropHookRegistry {
    slot: Arc<Slot>,
}

impl DropHookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `callback` as the drop hook.
    ///
    /// Fails with [`HostError::AlreadyRegistered`] while another guard is alive.
    pub fn register<F>(&self, callback: F) -> Result<DropHookGuard, HostError>
    where
        F: Fn(DropEvent) + Send + Sync + 'static,
    {
        let mut hook = self.slot.hook.lock();
        if hook.is_some() {
            return Err(HostError::AlreadyRegistered);
        }
        let id = self.slot.next_id.fetch_add(1, Ordering::Relaxed);
        *hook = Some(Hook {
            id,
            callback: Arc::new(callback),
        });
        debug!(id, "drop hook registered");
        Ok(DropHookGuard {
            slot: Arc::clone(&self.slot),
            id,
        })
    }

    pub fn is_registered(&self) -> bool {
        self.slot.hook.lock().is_some()
    }

    /// Deliver `event` to the registered hook.
    ///
    /// Returns `false` (and drops the event) when no hook is registered.
    /// The callback runs outside the lock so it may itself query the
    /// registry or release its guard.
    pub fn dispatch(&self, event: DropEvent) -> bool {
        let callback = self
            .slot
            .hook
            .lock()
            .as_ref()
            .map(|h| Arc::clone(&h.callback));
        match callback {
            Some(cb) => {
                cb(event);
                true
            }
            None => {
                debug!(paths = event.paths.len(), "drop ignored: no hook registered");
                false
            }
        }
    }
}

/// Keeps a drop hook registered. Deregisters it on drop.
#[must_use = "dropping the guard immediately deregisters the hook"]
pub struct DropHookGuard {
    slot: Arc<Slot>,
    id: u64,
}

impl DropHookGuard {
    /// Explicitly deregister. Equivalent to dropping the guard.
    pub fn release(self) {}
}

impl Drop for DropHookGuard {
    fn drop(&mut self) {
        let mut hook = self.slot.hook.lock();
        if hook.as_ref().is_some_and(|h| h.id == self.id) {
            *hook = None;
            debug!(id = self.id, "drop hook released");
        }
    }
}
