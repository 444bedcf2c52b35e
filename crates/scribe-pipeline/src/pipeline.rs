//! Pipeline wiring.
//!
//! Subscribes to the surface and the settings store and routes each event to
//! the watcher, the debounce controller or the presenter. One task owns the
//! loop; [`PipelineHandle::shutdown`] ends it and drops every subscription.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::{broadcast, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use scribe_config::Config;
use scribe_core::ProviderRegistry;
use scribe_protocols::{
    EventKind, Settings, SettingsChange, SettingsStore, Subscription, Surface, SurfaceEvent,
};

use crate::debounce::DebounceController;
use crate::error::PipelineError;
use crate::presenter::SuggestionPresenter;
use crate::session::{SessionState, SharedSession};
use crate::watcher::InputWatcher;

pub struct Pipeline;

impl Pipeline {
    /// Load settings, subscribe to everything and start the event task.
    pub fn start(
        surface: Arc<dyn Surface>,
        registry: Arc<ProviderRegistry>,
        store: Arc<dyn SettingsStore>,
        config: &Config,
    ) -> Result<PipelineHandle, PipelineError> {
        let settings_rx = store.subscribe();
        let settings = Arc::new(RwLock::new(store.load()?));

        let session: SharedSession = Arc::new(Mutex::new(SessionState::new()));
        let presenter = Arc::new(SuggestionPresenter::new(
            Arc::clone(&surface),
            config.presenter.clone(),
        ));
        let controller = Arc::new(DebounceController::new(
            Arc::clone(&session),
            Arc::clone(&surface),
            registry,
            Arc::clone(&settings),
            Arc::clone(&presenter),
            config.pipeline.clone(),
        ));

        let event_loop = EventLoop {
            watcher: InputWatcher::new(Arc::clone(&session)),
            controller: Arc::clone(&controller),
            presenter: Arc::clone(&presenter),
            store,
            settings: Arc::clone(&settings),
            events: surface.subscribe_many(&EventKind::ALL),
            settings_rx,
        };

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(event_loop.run(shutdown_rx));

        info!(
            "Pipeline started (provider={}, debounce={}ms)",
            settings.read().api_provider,
            config.pipeline.debounce_ms
        );

        Ok(PipelineHandle {
            task,
            shutdown_tx,
            session,
            settings,
            presenter,
            controller,
        })
    }
}

/// Running pipeline.
pub struct PipelineHandle {
    task: JoinHandle<()>,
    shutdown_tx: oneshot::Sender<()>,
    session: SharedSession,
    settings: Arc<RwLock<Settings>>,
    presenter: Arc<SuggestionPresenter>,
    controller: Arc<DebounceController>,
}

impl PipelineHandle {
    /// Settings the next request will use.
    pub fn settings(&self) -> Settings {
        self.settings.read().clone()
    }

    pub fn presenter(&self) -> &Arc<SuggestionPresenter> {
        &self.presenter
    }

    pub fn is_in_flight(&self) -> bool {
        self.controller.is_in_flight()
    }

    pub fn last_processed_text(&self) -> String {
        self.session.lock().last_processed_text.clone()
    }

    /// Stop the event task, cancel any pending timer and remove the
    /// suggestion overlay.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.task.await {
            warn!("Pipeline task ended abnormally: {}", e);
        }
        self.controller.cancel();
        self.presenter.dismiss();
        info!("Pipeline stopped");
    }
}

struct EventLoop {
    watcher: InputWatcher,
    controller: Arc<DebounceController>,
    presenter: Arc<SuggestionPresenter>,
    store: Arc<dyn SettingsStore>,
    settings: Arc<RwLock<Settings>>,
    /// Every surface event kind on one receiver, so a focus is always
    /// handled before the input that follows it.
    events: Subscription,
    settings_rx: broadcast::Receiver<SettingsChange>,
}

impl EventLoop {
    async fn run(mut self, mut shutdown_rx: oneshot::Receiver<()>) {
        let mut settings_open = true;

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => {
                    debug!("Pipeline shutdown requested");
                    break;
                }
                event = self.events.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => {
                        debug!("Surface closed");
                        break;
                    }
                },
                change = self.settings_rx.recv(), if settings_open => match change {
                    Ok(change) => self.apply_settings(&change),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Missed {} settings changes, reloading", skipped);
                        self.reload_settings();
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("Settings store closed");
                        settings_open = false;
                    }
                },
            }
        }
    }

    fn handle_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::Focus(element) => {
                self.watcher.on_focus(&element);
            }
            SurfaceEvent::Input(element) => {
                if self.watcher.is_armed(element.id) {
                    self.controller.on_input(element.id);
                }
            }
            SurfaceEvent::OverlayAction { overlay_id, action } => {
                self.presenter.handle_action(&overlay_id, action);
            }
            SurfaceEvent::ElementRemoved(element) => {
                self.watcher.disarm(element);
            }
        }
    }

    fn apply_settings(&self, change: &SettingsChange) {
        let mut settings = self.settings.write();
        match settings.apply(&change.values) {
            Ok(()) => info!(
                "Settings updated (provider={}, language={})",
                settings.api_provider, settings.target_language
            ),
            Err(e) => warn!("Ignoring invalid settings change: {}", e),
        }
    }

    fn reload_settings(&self) {
        match self.store.load() {
            Ok(loaded) => *self.settings.write() = loaded,
            Err(e) => warn!("Failed to reload settings: {}", e),
        }
    }
}
