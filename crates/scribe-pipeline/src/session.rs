//! Per-pipeline session state.

use std::sync::Arc;

use parking_lot::Mutex;
use scribe_protocols::ElementId;
use tokio::task::JoinHandle;

/// Mutable state shared by the event loop, the debounce timer and the
/// request task. The lock is never held across an await point.
#[derive(Debug, Default)]
pub struct SessionState {
    /// Element that most recently received a qualifying focus.
    pub active_element: Option<ElementId>,
    /// Scheduled debounce timer, if any.
    pub pending_timer: Option<JoinHandle<()>>,
    /// Bumped every time a timer is scheduled.
    pub timer_generation: u64,
    /// Last text that passed the gate and was sent to a provider.
    pub last_processed_text: String,
    /// A provider request is running.
    pub in_flight: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort the pending timer, if any. Returns whether one was pending.
    pub fn cancel_timer(&mut self) -> bool {
        match self.pending_timer.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

pub type SharedSession = Arc<Mutex<SessionState>>;

/// Marks a request as in flight for as long as it lives.
///
/// The flag is cleared on drop, so every exit path of a request releases it.
#[derive(Debug)]
pub struct InFlightGuard {
    session: SharedSession,
}

impl InFlightGuard {
    /// Set `in_flight` on an already locked session.
    pub(crate) fn acquire(session: &SharedSession, state: &mut SessionState) -> Self {
        state.in_flight = true;
        Self {
            session: Arc::clone(session),
        }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.session.lock().in_flight = false;
    }
}
