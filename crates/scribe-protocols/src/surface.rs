//! Host surface protocol.
//!
//! The surface is everything the pipeline needs from the page it runs on:
//! focus and input events, element text access, and overlay rendering.
//! Event listeners are explicit subscriptions; dropping a [`Subscription`]
//! unsubscribes it.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::warn;

/// Opaque handle to a host element.
pub type ElementId = u64;

/// Structural description of an element, carried with every event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementDescriptor {
    pub id: ElementId,
    /// Tag name as reported by the host, e.g. `TEXTAREA`.
    pub tag: String,
    /// `type` attribute for `INPUT` elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(default)]
    pub content_editable: bool,
}

impl ElementDescriptor {
    pub fn new(id: ElementId, tag: impl Into<String>) -> Self {
        Self {
            id,
            tag: tag.into(),
            input_type: None,
            content_editable: false,
        }
    }

    pub fn textarea(id: ElementId) -> Self {
        Self::new(id, "TEXTAREA")
    }

    pub fn text_input(id: ElementId) -> Self {
        Self::new(id, "INPUT").with_input_type("text")
    }

    pub fn editable(id: ElementId, tag: impl Into<String>) -> Self {
        let mut element = Self::new(id, tag);
        element.content_editable = true;
        element
    }

    pub fn with_input_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = Some(input_type.into());
        self
    }

    /// Whether the element is a form control whose text lives in its value.
    pub fn is_form_control(&self) -> bool {
        self.tag.eq_ignore_ascii_case("INPUT") || self.tag.eq_ignore_ascii_case("TEXTAREA")
    }
}

/// Kind of event a subscription listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Focus,
    Input,
    OverlayAction,
    ElementRemoved,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::Focus,
        EventKind::Input,
        EventKind::OverlayAction,
        EventKind::ElementRemoved,
    ];
}

/// User action on a mounted overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    Accept,
    Dismiss,
}

/// Event delivered by the host surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Focus(ElementDescriptor),
    /// Text of the element changed, by the user or by a synthetic dispatch.
    Input(ElementDescriptor),
    OverlayAction {
        overlay_id: String,
        action: OverlayAction,
    },
    ElementRemoved(ElementId),
}

impl SurfaceEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SurfaceEvent::Focus(_) => EventKind::Focus,
            SurfaceEvent::Input(_) => EventKind::Input,
            SurfaceEvent::OverlayAction { .. } => EventKind::OverlayAction,
            SurfaceEvent::ElementRemoved(_) => EventKind::ElementRemoved,
        }
    }
}

/// Live subscription to one or more kinds of surface event.
///
/// Events of every subscribed kind arrive through one receiver, so their
/// relative order is the order in which the surface emitted them.
pub struct Subscription {
    kinds: Vec<EventKind>,
    receiver: broadcast::Receiver<SurfaceEvent>,
}

impl Subscription {
    /// Wrap a broadcast receiver carrying every surface event.
    pub fn new(kinds: &[EventKind], receiver: broadcast::Receiver<SurfaceEvent>) -> Self {
        Self {
            kinds: kinds.to_vec(),
            receiver,
        }
    }

    pub fn kinds(&self) -> &[EventKind] {
        &self.kinds
    }

    pub fn accepts(&self, kind: EventKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Wait for the next event of a subscribed kind.
    ///
    /// Returns `None` once the surface is gone. Events dropped because the
    /// receiver fell behind are logged and skipped.
    pub async fn recv(&mut self) -> Option<SurfaceEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.accepts(event.kind()) => return Some(event),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Surface subscription lagged, skipped {} events", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// Screen-space point in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Element bounding box in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastTone {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OverlayKind {
    /// Actionable suggestion with accept and dismiss affordances.
    Suggestion { text: String },
    /// Transient status message.
    Toast { tone: ToastTone, message: String },
}

/// Element layered above page content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub id: String,
    pub kind: OverlayKind,
    pub anchor: Point,
    pub z_index: i32,
}

/// Host rendering and event surface.
pub trait Surface: Send + Sync {
    /// Subscribe to several event kinds through one ordered stream.
    fn subscribe_many(&self, kinds: &[EventKind]) -> Subscription;

    /// Subscribe to events of one kind.
    fn subscribe(&self, kind: EventKind) -> Subscription {
        self.subscribe_many(&[kind])
    }

    /// Current text of an element: its value for form controls, its text
    /// content otherwise. `None` if the element no longer exists.
    fn read_text(&self, element: ElementId) -> Option<String>;

    /// Replace the text of an element.
    fn write_text(&self, element: ElementId, text: &str);

    /// Dispatch a synthetic input notification so other observers see a
    /// programmatic change.
    fn dispatch_input(&self, element: ElementId);

    /// Screen position of an element.
    fn bounding_box(&self, element: ElementId) -> Option<Rect>;

    /// Render an overlay. An overlay with the same id replaces the old one.
    fn mount_overlay(&self, overlay: Overlay);

    /// Remove an overlay by id. Unknown ids are ignored.
    fn remove_overlay(&self, overlay_id: &str);
}

#[cfg(test)]
#[path = "surface_tests.rs"]
mod tests;
