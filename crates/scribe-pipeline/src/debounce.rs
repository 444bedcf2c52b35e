//! Debounce and dedup controller.
//!
//! Each input restarts a quiet-period timer. When the timer fires the current
//! text is read and gated; text that passes is sent to the provider on its
//! own task, so cancelling a later timer never cancels a running request.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, error, info, warn};

use scribe_config::PipelineConfig;
use scribe_core::ProviderRegistry;
use scribe_protocols::{ElementId, Settings, Surface};

use crate::error::PipelineError;
use crate::presenter::SuggestionPresenter;
use crate::session::{InFlightGuard, SessionState, SharedSession};

/// Outcome of checking settled text against the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Fewer words than the configured minimum.
    TooShort,
    /// Same text as the last request.
    Duplicate,
    /// A request is already running.
    InFlight,
    Proceed,
}

impl GateDecision {
    pub fn evaluate(state: &SessionState, text: &str, min_words: usize) -> Self {
        if text.split_whitespace().count() < min_words {
            GateDecision::TooShort
        } else if text == state.last_processed_text {
            GateDecision::Duplicate
        } else if state.in_flight {
            GateDecision::InFlight
        } else {
            GateDecision::Proceed
        }
    }
}

struct Request {
    element: ElementId,
    text: String,
    settings: Settings,
    guard: InFlightGuard,
}

pub struct DebounceController {
    session: SharedSession,
    surface: Arc<dyn Surface>,
    registry: Arc<ProviderRegistry>,
    settings: Arc<RwLock<Settings>>,
    presenter: Arc<SuggestionPresenter>,
    config: PipelineConfig,
}

impl DebounceController {
    pub fn new(
        session: SharedSession,
        surface: Arc<dyn Surface>,
        registry: Arc<ProviderRegistry>,
        settings: Arc<RwLock<Settings>>,
        presenter: Arc<SuggestionPresenter>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            session,
            surface,
            registry,
            settings,
            presenter,
            config,
        }
    }

    /// Restart the quiet period for `element`.
    pub fn on_input(self: &Arc<Self>, element: ElementId) {
        let delay = Duration::from_millis(self.config.debounce_ms);
        let mut session = self.session.lock();

        if session.cancel_timer() {
            debug!("Debounce timer restarted for element {}", element);
        }
        session.timer_generation += 1;
        let generation = session.timer_generation;

        let this = Arc::clone(self);
        session.pending_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            this.fire(element, generation);
        }));
    }

    /// Abort the pending timer. Running requests are unaffected.
    pub fn cancel(&self) -> bool {
        self.session.lock().cancel_timer()
    }

    pub fn has_pending(&self) -> bool {
        self.session.lock().pending_timer.is_some()
    }

    pub fn is_in_flight(&self) -> bool {
        self.session.lock().in_flight
    }

    fn fire(self: &Arc<Self>, element: ElementId, generation: u64) {
        {
            let mut session = self.session.lock();
            if session.timer_generation == generation {
                session.pending_timer = None;
            }
        }

        match self.begin(element) {
            Ok(Some(request)) => {
                let this = Arc::clone(self);
                tokio::spawn(async move { this.process(request).await });
            }
            Ok(None) => {}
            Err(e) => warn!("Skipping correction for element {}: {}", element, e),
        }
    }

    /// Gate the element's text and claim the in-flight slot.
    fn begin(&self, element: ElementId) -> Result<Option<Request>, PipelineError> {
        let Some(text) = self.surface.read_text(element) else {
            debug!("Element {} is gone", element);
            return Ok(None);
        };
        let settings = self.settings.read().clone();

        let mut session = self.session.lock();
        let decision = GateDecision::evaluate(&session, &text, self.config.min_words);
        if decision != GateDecision::Proceed {
            debug!("Gate for element {}: {:?}", element, decision);
            return Ok(None);
        }

        session.last_processed_text = text.clone();
        if !settings.has_credentials() {
            return Err(PipelineError::MissingCredential);
        }

        let guard = InFlightGuard::acquire(&self.session, &mut session);
        Ok(Some(Request {
            element,
            text,
            settings,
            guard,
        }))
    }

    async fn process(self: Arc<Self>, request: Request) {
        let Request {
            element,
            text,
            settings,
            guard,
        } = request;

        info!(
            "Processing {} words for element {}",
            text.split_whitespace().count(),
            element
        );
        let result = self.generate(&text, &settings).await;
        drop(guard);

        if self.config.discard_stale_responses
            && self.session.lock().active_element != Some(element)
        {
            debug!("Discarding result for element {}: focus moved", element);
            return;
        }

        match result {
            Ok(corrected) => self.presenter.present(element, &text, corrected.as_deref()),
            Err(e) => {
                error!("Correction failed for element {}: {}", element, e);
                self.presenter.show_error(element, &e.to_string());
            }
        }
    }

    async fn generate(
        &self,
        text: &str,
        settings: &Settings,
    ) -> Result<Option<String>, PipelineError> {
        Ok(self.registry.generate(text, settings).await?)
    }
}

#[cfg(test)]
#[path = "debounce_tests.rs"]
mod tests;
