//! In-process surface.
//!
//! Holds elements, their text and the mounted overlays in memory. Hosts drive
//! it with [`MemorySurface::focus`], [`MemorySurface::type_text`] and
//! [`MemorySurface::trigger`]; overlay changes are published on
//! [`MemorySurface::watch_overlays`].

use std::collections::HashMap;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::debug;

use scribe_protocols::{
    ElementDescriptor, ElementId, EventKind, Overlay, OverlayAction, Rect, Subscription, Surface,
    SurfaceEvent,
};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Overlay mount or removal published by a [`MemorySurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayChange {
    Mounted(Overlay),
    Removed(String),
}

struct ElementEntry {
    descriptor: ElementDescriptor,
    text: String,
    rect: Rect,
}

#[derive(Default)]
struct SurfaceState {
    elements: HashMap<ElementId, ElementEntry>,
    overlays: HashMap<String, Overlay>,
    mounted: Vec<Overlay>,
    writes: Vec<(ElementId, String)>,
    dispatched: Vec<ElementId>,
}

pub struct MemorySurface {
    state: RwLock<SurfaceState>,
    events: broadcast::Sender<SurfaceEvent>,
    overlay_changes: broadcast::Sender<OverlayChange>,
}

impl MemorySurface {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (overlay_changes, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: RwLock::new(SurfaceState::default()),
            events,
            overlay_changes,
        }
    }

    /// Add an element with empty text.
    pub fn add_element(&self, descriptor: ElementDescriptor, rect: Rect) {
        self.state.write().elements.insert(
            descriptor.id,
            ElementEntry {
                descriptor,
                text: String::new(),
                rect,
            },
        );
    }

    /// Remove an element and report it to subscribers.
    pub fn remove_element(&self, element: ElementId) {
        if self.state.write().elements.remove(&element).is_some() {
            self.emit(SurfaceEvent::ElementRemoved(element));
        }
    }

    /// Focus an element. Unknown ids are ignored.
    pub fn focus(&self, element: ElementId) {
        if let Some(descriptor) = self.descriptor(element) {
            self.emit(SurfaceEvent::Focus(descriptor));
        }
    }

    /// Replace an element's text as if the user typed it.
    pub fn type_text(&self, element: ElementId, text: &str) {
        let descriptor = {
            let mut state = self.state.write();
            match state.elements.get_mut(&element) {
                Some(entry) => {
                    entry.text = text.to_string();
                    entry.descriptor.clone()
                }
                None => return,
            }
        };
        self.emit(SurfaceEvent::Input(descriptor));
    }

    /// Act on a mounted overlay as if the user clicked it.
    pub fn trigger(&self, overlay_id: &str, action: OverlayAction) {
        self.emit(SurfaceEvent::OverlayAction {
            overlay_id: overlay_id.to_string(),
            action,
        });
    }

    /// Subscribe to overlay mounts and removals.
    pub fn watch_overlays(&self) -> broadcast::Receiver<OverlayChange> {
        self.overlay_changes.subscribe()
    }

    pub fn descriptor(&self, element: ElementId) -> Option<ElementDescriptor> {
        self.state
            .read()
            .elements
            .get(&element)
            .map(|e| e.descriptor.clone())
    }

    pub fn overlay(&self, overlay_id: &str) -> Option<Overlay> {
        self.state.read().overlays.get(overlay_id).cloned()
    }

    /// Overlays currently mounted.
    pub fn overlays(&self) -> Vec<Overlay> {
        self.state.read().overlays.values().cloned().collect()
    }

    /// Every overlay ever mounted, in order.
    pub fn mounted_history(&self) -> Vec<Overlay> {
        self.state.read().mounted.clone()
    }

    /// Programmatic text writes, in order.
    pub fn writes(&self) -> Vec<(ElementId, String)> {
        self.state.read().writes.clone()
    }

    /// Number of synthetic input notifications dispatched to an element.
    pub fn dispatch_count(&self, element: ElementId) -> usize {
        self.state
            .read()
            .dispatched
            .iter()
            .filter(|id| **id == element)
            .count()
    }

    fn emit(&self, event: SurfaceEvent) {
        // No receivers just means nobody is listening yet.
        let _ = self.events.send(event);
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for MemorySurface {
    fn subscribe_many(&self, kinds: &[EventKind]) -> Subscription {
        Subscription::new(kinds, self.events.subscribe())
    }

    fn read_text(&self, element: ElementId) -> Option<String> {
        self.state
            .read()
            .elements
            .get(&element)
            .map(|e| e.text.clone())
    }

    fn write_text(&self, element: ElementId, text: &str) {
        let mut state = self.state.write();
        if let Some(entry) = state.elements.get_mut(&element) {
            entry.text = text.to_string();
            state.writes.push((element, text.to_string()));
        }
    }

    fn dispatch_input(&self, element: ElementId) {
        let descriptor = {
            let mut state = self.state.write();
            state.dispatched.push(element);
            state.elements.get(&element).map(|e| e.descriptor.clone())
        };
        if let Some(descriptor) = descriptor {
            self.emit(SurfaceEvent::Input(descriptor));
        }
    }

    fn bounding_box(&self, element: ElementId) -> Option<Rect> {
        self.state.read().elements.get(&element).map(|e| e.rect)
    }

    fn mount_overlay(&self, overlay: Overlay) {
        debug!("Mounting overlay {}", overlay.id);
        {
            let mut state = self.state.write();
            state.overlays.insert(overlay.id.clone(), overlay.clone());
            state.mounted.push(overlay.clone());
        }
        let _ = self.overlay_changes.send(OverlayChange::Mounted(overlay));
    }

    fn remove_overlay(&self, overlay_id: &str) {
        if self.state.write().overlays.remove(overlay_id).is_some() {
            let _ = self
                .overlay_changes
                .send(OverlayChange::Removed(overlay_id.to_string()));
        }
    }
}
