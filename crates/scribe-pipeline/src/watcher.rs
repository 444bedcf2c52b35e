//! Input watcher.
//!
//! Tracks which elements are observed for input. An element qualifies when it
//! is a `TEXTAREA`, an `INPUT` of type `text`, or content-editable. Every
//! qualifying focus makes the element active; arming happens once per element.

use std::collections::HashSet;

use tracing::debug;

use scribe_protocols::{ElementDescriptor, ElementId};

use crate::session::SharedSession;

pub struct InputWatcher {
    session: SharedSession,
    armed: HashSet<ElementId>,
}

impl InputWatcher {
    pub fn new(session: SharedSession) -> Self {
        Self {
            session,
            armed: HashSet::new(),
        }
    }

    /// Whether an element is one the pipeline should observe.
    pub fn qualifies(element: &ElementDescriptor) -> bool {
        if element.content_editable || element.tag.eq_ignore_ascii_case("TEXTAREA") {
            return true;
        }
        element.tag.eq_ignore_ascii_case("INPUT")
            && element
                .input_type
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case("text"))
    }

    /// Handle a focus event.
    ///
    /// Returns `true` if the element was armed by this call.
    pub fn on_focus(&mut self, element: &ElementDescriptor) -> bool {
        if !Self::qualifies(element) {
            return false;
        }

        self.session.lock().active_element = Some(element.id);

        let newly_armed = self.armed.insert(element.id);
        if newly_armed {
            debug!("Armed element {} ({})", element.id, element.tag);
        }
        newly_armed
    }

    pub fn is_armed(&self, element: ElementId) -> bool {
        self.armed.contains(&element)
    }

    /// Forget an element the host no longer has.
    pub fn disarm(&mut self, element: ElementId) -> bool {
        let mut session = self.session.lock();
        if session.active_element == Some(element) {
            session.active_element = None;
        }
        drop(session);

        let removed = self.armed.remove(&element);
        if removed {
            debug!("Disarmed element {}", element);
        }
        removed
    }

    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
