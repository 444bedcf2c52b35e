//! Suggestion presenter.
//!
//! Renders results as overlays anchored to the element they belong to. At most
//! one suggestion is mounted at a time; toasts remove themselves after their
//! configured lifetime.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info};

use scribe_config::PresenterConfig;
use scribe_protocols::{
    ElementId, Overlay, OverlayAction, OverlayKind, Point, Surface, ToastTone,
};

pub const SUGGESTION_OVERLAY_ID: &str = "scribe-suggestion";
pub const OVERLAY_Z_INDEX: i32 = i32::MAX;
pub const SUCCESS_TOAST_TEXT: &str = "✓ Perfect!";
pub const ERROR_TOAST_PREFIX: &str = "⚠ ";

const SUGGESTION_OFFSET_X: f64 = 10.0;
const SUGGESTION_OFFSET_Y: f64 = 50.0;
const TOAST_OFFSET_Y: f64 = 35.0;

#[derive(Debug, Clone)]
struct ShownSuggestion {
    element: ElementId,
    text: String,
}

pub struct SuggestionPresenter {
    surface: Arc<dyn Surface>,
    config: PresenterConfig,
    current: Mutex<Option<ShownSuggestion>>,
    next_toast: AtomicU64,
}

impl SuggestionPresenter {
    pub fn new(surface: Arc<dyn Surface>, config: PresenterConfig) -> Self {
        Self {
            surface,
            config,
            current: Mutex::new(None),
            next_toast: AtomicU64::new(1),
        }
    }

    /// Route a provider result for `source` to the matching overlay.
    ///
    /// No text, or text equal to the source ignoring case, counts as
    /// already correct.
    pub fn present(&self, element: ElementId, source: &str, corrected: Option<&str>) {
        match corrected {
            Some(text) if text.to_lowercase() != source.to_lowercase() => {
                self.show_suggestion(text, element)
            }
            _ => self.show_success(element),
        }
    }

    /// Mount the suggestion overlay, replacing any existing one.
    pub fn show_suggestion(&self, text: &str, element: ElementId) {
        self.surface.remove_overlay(SUGGESTION_OVERLAY_ID);

        let rect = self.surface.bounding_box(element).unwrap_or_default();
        let anchor = Point {
            x: rect.left + SUGGESTION_OFFSET_X,
            y: rect.bottom() - SUGGESTION_OFFSET_Y,
        };

        *self.current.lock() = Some(ShownSuggestion {
            element,
            text: text.to_string(),
        });

        info!("Showing suggestion for element {}", element);
        self.surface.mount_overlay(Overlay {
            id: SUGGESTION_OVERLAY_ID.to_string(),
            kind: OverlayKind::Suggestion {
                text: text.to_string(),
            },
            anchor,
            z_index: OVERLAY_Z_INDEX,
        });
    }

    /// Text of the mounted suggestion, if any.
    pub fn current_suggestion(&self) -> Option<String> {
        self.current.lock().as_ref().map(|s| s.text.clone())
    }

    /// Write the suggestion into its element.
    ///
    /// Returns `false` if no suggestion is mounted.
    pub fn accept(&self) -> bool {
        let Some(shown) = self.current.lock().take() else {
            return false;
        };

        self.surface.write_text(shown.element, &shown.text);
        self.surface.dispatch_input(shown.element);
        self.surface.remove_overlay(SUGGESTION_OVERLAY_ID);
        info!("Suggestion accepted for element {}", shown.element);

        self.show_success(shown.element);
        true
    }

    /// Remove the suggestion without applying it.
    pub fn dismiss(&self) -> bool {
        if self.current.lock().take().is_none() {
            return false;
        }
        self.surface.remove_overlay(SUGGESTION_OVERLAY_ID);
        debug!("Suggestion dismissed");
        true
    }

    /// Handle a user action on an overlay. Actions on other overlays are
    /// ignored.
    pub fn handle_action(&self, overlay_id: &str, action: OverlayAction) -> bool {
        if overlay_id != SUGGESTION_OVERLAY_ID {
            return false;
        }
        match action {
            OverlayAction::Accept => self.accept(),
            OverlayAction::Dismiss => self.dismiss(),
        }
    }

    pub fn show_success(&self, element: ElementId) {
        self.show_toast(
            element,
            ToastTone::Success,
            SUCCESS_TOAST_TEXT.to_string(),
            self.config.success_toast_ms,
        );
    }

    pub fn show_error(&self, element: ElementId, message: &str) {
        self.show_toast(
            element,
            ToastTone::Error,
            format!("{}{}", ERROR_TOAST_PREFIX, message),
            self.config.error_toast_ms,
        );
    }

    fn show_toast(&self, element: ElementId, tone: ToastTone, message: String, lifetime_ms: u64) {
        let rect = self.surface.bounding_box(element).unwrap_or_default();
        let id = format!(
            "scribe-toast-{}",
            self.next_toast.fetch_add(1, Ordering::Relaxed)
        );

        self.surface.mount_overlay(Overlay {
            id: id.clone(),
            kind: OverlayKind::Toast { tone, message },
            anchor: Point {
                x: rect.center_x(),
                y: rect.top - TOAST_OFFSET_Y,
            },
            z_index: OVERLAY_Z_INDEX,
        });

        let surface = Arc::clone(&self.surface);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(lifetime_ms)).await;
            surface.remove_overlay(&id);
        });
    }
}

#[cfg(test)]
#[path = "presenter_tests.rs"]
mod tests;
