//! # Scribe Pipeline
//!
//! Watches editable elements on a [`Surface`](scribe_protocols::Surface),
//! debounces typing, sends settled text to the selected provider and shows
//! the result as an overlay.
//!
//! ## Components
//!
//! - [`InputWatcher`] - decides which focused elements are observed
//! - [`DebounceController`] - quiet-period scheduling and duplicate suppression
//! - [`SuggestionPresenter`] - suggestion and toast overlays
//! - [`Pipeline`] - wires the above to surface events and settings changes
//! - [`MemorySurface`] - in-process surface for headless hosts and tests

mod debounce;
mod error;
mod memory_surface;
mod pipeline;
mod presenter;
mod session;
mod watcher;

pub use debounce::{DebounceController, GateDecision};
pub use error::PipelineError;
pub use memory_surface::{MemorySurface, OverlayChange};
pub use pipeline::{Pipeline, PipelineHandle};
pub use presenter::{
    ERROR_TOAST_PREFIX, OVERLAY_Z_INDEX, SUCCESS_TOAST_TEXT, SUGGESTION_OVERLAY_ID,
    SuggestionPresenter,
};
pub use session::{InFlightGuard, SessionState, SharedSession};
pub use watcher::InputWatcher;
