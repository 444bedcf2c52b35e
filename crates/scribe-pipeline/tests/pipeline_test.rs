//! End-to-end tests for the typing pipeline.
//!
//! A [`MemorySurface`] stands in for the page and a scripted provider stands
//! in for the remote model. Time is paused so debounce windows are exact.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use scribe_config::{Config, MemorySettingsStore};
use scribe_core::ProviderRegistry;
use scribe_pipeline::{
    MemorySurface, Pipeline, PipelineHandle, SUCCESS_TOAST_TEXT, SUGGESTION_OVERLAY_ID,
};
use scribe_protocols::{
    ElementDescriptor, OverlayAction, OverlayKind, ProviderError, ProviderId, Rect, SettingKey,
    Settings, SettingsStore, Surface, TextProvider, ToastTone,
};

// ============================================================================
// Test Helpers
// ============================================================================

enum Reply {
    Text(&'static str),
    Nothing,
    Status(u16),
}

/// Provider that records every request and answers from a script.
struct ScriptedProvider {
    calls: AtomicUsize,
    seen: Mutex<Vec<(String, Settings)>>,
    reply: Mutex<Reply>,
    delay: Duration,
}

impl ScriptedProvider {
    fn new(reply: Reply, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            reply: Mutex::new(reply),
            delay,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn set_reply(&self, reply: Reply) {
        *self.reply.lock() = reply;
    }
}

#[async_trait]
impl TextProvider for ScriptedProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    async fn generate(
        &self,
        text: &str,
        settings: &Settings,
    ) -> Result<Option<String>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push((text.to_string(), settings.clone()));
        tokio::time::sleep(self.delay).await;

        match *self.reply.lock() {
            Reply::Text(text) => Ok(Some(text.to_string())),
            Reply::Nothing => Ok(None),
            Reply::Status(status) => Err(ProviderError::Http {
                provider: ProviderId::Gemini,
                status,
            }),
        }
    }

    async fn test_connection(&self, _api_key: &str) -> Result<(), ProviderError> {
        Ok(())
    }
}

struct Fixture {
    surface: Arc<MemorySurface>,
    provider: Arc<ScriptedProvider>,
    store: Arc<MemorySettingsStore>,
    handle: PipelineHandle,
}

const FIELD: u64 = 1;
const OTHER_FIELD: u64 = 2;

fn start(api_key: &str, reply: Reply, delay: Duration, config: Config) -> Fixture {
    let surface = Arc::new(MemorySurface::new());
    surface.add_element(
        ElementDescriptor::textarea(FIELD),
        Rect::new(20.0, 300.0, 500.0, 120.0),
    );
    surface.add_element(
        ElementDescriptor::text_input(OTHER_FIELD),
        Rect::new(20.0, 500.0, 500.0, 30.0),
    );

    let provider = ScriptedProvider::new(reply, delay);
    let registry = Arc::new(ProviderRegistry::new());
    registry.register(provider.clone()).unwrap();

    let mut values = HashMap::new();
    values.insert(SettingKey::ApiKey, api_key.to_string());
    let store = Arc::new(MemorySettingsStore::with_values(values));

    let handle = Pipeline::start(surface.clone(), registry, store.clone(), &config).unwrap();

    Fixture {
        surface,
        provider,
        store,
        handle,
    }
}

fn start_default(reply: Reply) -> Fixture {
    start("test-key", reply, Duration::ZERO, Config::default())
}

/// Let the pipeline task drain queued events.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

impl Fixture {
    async fn focus(&self, element: u64) {
        self.surface.focus(element);
        settle().await;
    }

    async fn type_and_wait(&self, element: u64, text: &str) {
        self.surface.type_text(element, text);
        advance(1100).await;
    }

    fn toast_messages(&self) -> Vec<(ToastTone, String)> {
        self.surface
            .mounted_history()
            .into_iter()
            .filter_map(|o| match o.kind {
                OverlayKind::Toast { tone, message } => Some((tone, message)),
                _ => None,
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_suggestion_shown_after_quiet_period() {
    let f = start_default(Reply::Text("Hello world"));
    f.focus(FIELD).await;

    f.surface.type_text(FIELD, "helo world");
    advance(900).await;
    assert_eq!(f.provider.calls(), 0);

    advance(200).await;
    assert_eq!(f.provider.calls(), 1);

    let overlay = f.surface.overlay(SUGGESTION_OVERLAY_ID).unwrap();
    assert_eq!(
        overlay.kind,
        OverlayKind::Suggestion {
            text: "Hello world".to_string()
        }
    );
    assert_eq!(overlay.anchor.x, 30.0);
    assert_eq!(overlay.anchor.y, 370.0);

    let (text, settings) = f.provider.seen.lock()[0].clone();
    assert_eq!(text, "helo world");
    assert_eq!(settings.target_language, "English");
}

#[tokio::test(start_paused = true)]
async fn test_input_before_focus_is_ignored() {
    let f = start_default(Reply::Text("Hello world"));

    f.type_and_wait(FIELD, "helo world").await;

    assert_eq!(f.provider.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_input_right_after_focus_is_processed() {
    // Both events are queued before the pipeline task runs; it must still
    // see the focus first.
    for _ in 0..20 {
        let f = start_default(Reply::Text("Hello world"));
        f.surface.focus(FIELD);
        f.surface.type_text(FIELD, "helo world");
        advance(1100).await;

        assert_eq!(f.provider.calls(), 1);
        assert!(f.surface.overlay(SUGGESTION_OVERLAY_ID).is_some());
        f.handle.shutdown().await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_focus_after_removal_rearms_in_order() {
    let f = start_default(Reply::Text("Hello world"));
    f.surface.focus(FIELD);
    f.surface.remove_element(FIELD);
    f.surface.add_element(
        ElementDescriptor::textarea(FIELD),
        Rect::new(20.0, 300.0, 500.0, 120.0),
    );
    f.surface.focus(FIELD);
    f.surface.type_text(FIELD, "helo world");
    advance(1100).await;

    assert_eq!(f.provider.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_keystroke_burst_makes_one_call() {
    let f = start_default(Reply::Nothing);
    f.focus(FIELD).await;

    let mut typed = String::new();
    for ch in "this is a test".chars() {
        typed.push(ch);
        f.surface.type_text(FIELD, &typed);
        advance(150).await;
    }
    assert_eq!(f.provider.calls(), 0);
    advance(1000).await;

    assert_eq!(f.provider.calls(), 1);
    assert_eq!(f.handle.last_processed_text(), "this is a test");
}

#[tokio::test(start_paused = true)]
async fn test_single_word_makes_no_call() {
    let f = start_default(Reply::Text("Hello"));
    f.focus(FIELD).await;

    f.type_and_wait(FIELD, "helo").await;

    assert_eq!(f.provider.calls(), 0);
    assert!(f.surface.mounted_history().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_unchanged_text_makes_no_new_call() {
    let f = start_default(Reply::Nothing);
    f.focus(FIELD).await;

    f.type_and_wait(FIELD, "hello world").await;
    f.type_and_wait(FIELD, "hello world").await;

    assert_eq!(f.provider.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_one_request_in_flight() {
    let f = start("test-key", Reply::Nothing, Duration::from_secs(4), Config::default());
    f.focus(FIELD).await;

    f.type_and_wait(FIELD, "hello world").await;
    assert!(f.handle.is_in_flight());

    f.type_and_wait(FIELD, "hello brave world").await;
    assert_eq!(f.provider.calls(), 1);

    advance(4000).await;
    assert!(!f.handle.is_in_flight());
}

#[tokio::test(start_paused = true)]
async fn test_case_insensitive_match_shows_success() {
    let f = start_default(Reply::Text("HELLO WORLD"));
    f.focus(FIELD).await;

    f.type_and_wait(FIELD, "hello world").await;

    assert!(f.surface.overlay(SUGGESTION_OVERLAY_ID).is_none());
    assert_eq!(
        f.toast_messages(),
        vec![(ToastTone::Success, SUCCESS_TOAST_TEXT.to_string())]
    );
}

#[tokio::test(start_paused = true)]
async fn test_empty_result_shows_success() {
    let f = start_default(Reply::Nothing);
    f.focus(FIELD).await;

    f.type_and_wait(FIELD, "hello world").await;

    assert_eq!(f.toast_messages().len(), 1);
    assert_eq!(f.toast_messages()[0].0, ToastTone::Success);
}

#[tokio::test(start_paused = true)]
async fn test_accept_applies_suggestion() {
    let f = start_default(Reply::Text("Hello world"));
    f.focus(FIELD).await;
    f.type_and_wait(FIELD, "helo world").await;

    f.surface.trigger(SUGGESTION_OVERLAY_ID, OverlayAction::Accept);
    settle().await;

    assert_eq!(f.surface.writes(), vec![(FIELD, "Hello world".to_string())]);
    assert_eq!(f.surface.dispatch_count(FIELD), 1);
    assert!(f.surface.overlay(SUGGESTION_OVERLAY_ID).is_none());
    assert_eq!(f.toast_messages()[0].1, SUCCESS_TOAST_TEXT);
}

#[tokio::test(start_paused = true)]
async fn test_dismiss_removes_suggestion() {
    let f = start_default(Reply::Text("Hello world"));
    f.focus(FIELD).await;
    f.type_and_wait(FIELD, "helo world").await;

    f.surface.trigger(SUGGESTION_OVERLAY_ID, OverlayAction::Dismiss);
    settle().await;

    assert!(f.surface.overlays().is_empty());
    assert!(f.surface.writes().is_empty());
    assert_eq!(f.surface.read_text(FIELD).as_deref(), Some("helo world"));
}

#[tokio::test(start_paused = true)]
async fn test_http_error_shows_toast_and_allows_retry() {
    let f = start_default(Reply::Status(429));
    f.focus(FIELD).await;

    f.type_and_wait(FIELD, "helo world").await;

    let toasts = f.toast_messages();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].0, ToastTone::Error);
    assert!(toasts[0].1.contains("429"));
    assert!(!f.handle.is_in_flight());

    f.provider.set_reply(Reply::Text("Hello world"));
    f.type_and_wait(FIELD, "helo world!").await;
    assert_eq!(f.provider.calls(), 2);
    assert!(f.surface.overlay(SUGGESTION_OVERLAY_ID).is_some());
}

#[tokio::test(start_paused = true)]
async fn test_missing_key_is_silent() {
    let f = start("", Reply::Text("Hello world"), Duration::ZERO, Config::default());
    f.focus(FIELD).await;

    f.type_and_wait(FIELD, "helo world").await;

    assert_eq!(f.provider.calls(), 0);
    assert!(f.surface.mounted_history().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_settings_change_applies_to_next_request() {
    let f = start("", Reply::Nothing, Duration::ZERO, Config::default());
    f.focus(FIELD).await;

    let mut values = HashMap::new();
    values.insert(SettingKey::ApiKey, "new-key".to_string());
    values.insert(SettingKey::TargetLanguage, "French".to_string());
    f.store.set(values).unwrap();
    settle().await;

    assert_eq!(f.handle.settings().api_key, "new-key");

    f.type_and_wait(FIELD, "hello world").await;
    assert_eq!(f.provider.calls(), 1);
    let (_, settings) = f.provider.seen.lock()[0].clone();
    assert_eq!(settings.target_language, "French");
}

#[tokio::test(start_paused = true)]
async fn test_stale_result_kept_by_default() {
    let f = start("test-key", Reply::Text("Hello world"), Duration::from_secs(2), Config::default());
    f.focus(FIELD).await;
    f.type_and_wait(FIELD, "helo world").await;

    f.focus(OTHER_FIELD).await;
    advance(2000).await;

    assert!(f.surface.overlay(SUGGESTION_OVERLAY_ID).is_some());
}

#[tokio::test(start_paused = true)]
async fn test_stale_result_discarded_when_configured() {
    let mut config = Config::default();
    config.pipeline.discard_stale_responses = true;
    let f = start("test-key", Reply::Text("Hello world"), Duration::from_secs(2), config);
    f.focus(FIELD).await;
    f.type_and_wait(FIELD, "helo world").await;

    f.focus(OTHER_FIELD).await;
    advance(2000).await;

    assert!(f.surface.mounted_history().is_empty());
    assert!(!f.handle.is_in_flight());
}

#[tokio::test(start_paused = true)]
async fn test_removed_element_is_disarmed() {
    let f = start_default(Reply::Nothing);
    f.focus(FIELD).await;

    f.surface.remove_element(FIELD);
    settle().await;
    f.surface.add_element(ElementDescriptor::textarea(FIELD), Rect::default());
    f.type_and_wait(FIELD, "hello world").await;

    assert_eq!(f.provider.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_stops_processing() {
    let f = start_default(Reply::Text("Hello world"));
    f.focus(FIELD).await;
    f.surface.type_text(FIELD, "helo world");
    settle().await;

    let Fixture {
        surface,
        provider,
        handle,
        ..
    } = f;
    handle.shutdown().await;

    advance(1500).await;
    surface.focus(FIELD);
    surface.type_text(FIELD, "helo world again");
    advance(1500).await;

    assert_eq!(provider.calls(), 0);
    assert!(surface.overlays().is_empty());
}
