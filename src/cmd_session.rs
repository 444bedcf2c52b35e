//! Interactive terminal session.
//!
//! The terminal plays the page: one text field whose content is replaced by
//! every line typed, and overlays printed as they are mounted.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing::debug;

use scribe_config::Config;
use scribe_core::ProviderRegistry;
use scribe_pipeline::{MemorySurface, OverlayChange, Pipeline, SUGGESTION_OVERLAY_ID};
use scribe_protocols::{
    ElementDescriptor, ElementId, Overlay, OverlayAction, OverlayKind, Rect, SettingsStore,
    Surface,
};

const FIELD: ElementId = 1;

const HELP: &str = "Type text and pause to get a suggestion.
  :accept   apply the current suggestion
  :dismiss  discard the current suggestion
  :text     print the field text
  :help     show this help
  :quit     exit";

#[derive(Debug, PartialEq, Eq)]
enum SessionCommand {
    Accept,
    Dismiss,
    Show,
    Help,
    Quit,
    Text(String),
}

impl SessionCommand {
    fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        let command = match trimmed {
            ":accept" | ":a" => SessionCommand::Accept,
            ":dismiss" | ":d" => SessionCommand::Dismiss,
            ":text" | ":t" => SessionCommand::Show,
            ":help" | ":h" => SessionCommand::Help,
            ":quit" | ":q" => SessionCommand::Quit,
            _ => SessionCommand::Text(line.trim_end_matches(['\r', '\n']).to_string()),
        };
        Some(command)
    }
}

/// Run the session until `:quit` or end of input.
pub(crate) async fn run_session(
    config: &Config,
    registry: Arc<ProviderRegistry>,
    store: Arc<dyn SettingsStore>,
) -> Result<(), Box<dyn std::error::Error>> {
    let surface = Arc::new(MemorySurface::new());
    surface.add_element(
        ElementDescriptor::textarea(FIELD),
        Rect::new(0.0, 0.0, 80.0, 24.0),
    );

    let printer = tokio::spawn(print_overlays(surface.watch_overlays()));
    let handle = Pipeline::start(surface.clone(), registry, store, config)?;
    surface.focus(FIELD);

    if !handle.settings().has_credentials() {
        println!("No API key configured. Run `scribe settings set --api-key <KEY>` first.");
    }
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = SessionCommand::parse(&line) else {
            continue;
        };
        match command {
            SessionCommand::Quit => break,
            SessionCommand::Help => println!("{}", HELP),
            SessionCommand::Show => {
                println!("{}", surface.read_text(FIELD).unwrap_or_default())
            }
            SessionCommand::Accept | SessionCommand::Dismiss
                if handle.presenter().current_suggestion().is_none() =>
            {
                println!("No suggestion to act on");
            }
            SessionCommand::Accept => surface.trigger(SUGGESTION_OVERLAY_ID, OverlayAction::Accept),
            SessionCommand::Dismiss => {
                surface.trigger(SUGGESTION_OVERLAY_ID, OverlayAction::Dismiss)
            }
            SessionCommand::Text(text) => surface.type_text(FIELD, &text),
        }
    }

    handle.shutdown().await;
    printer.abort();
    Ok(())
}

async fn print_overlays(mut changes: broadcast::Receiver<OverlayChange>) {
    loop {
        match changes.recv().await {
            Ok(OverlayChange::Mounted(overlay)) => println!("{}", render(&overlay)),
            Ok(OverlayChange::Removed(id)) => debug!("Overlay {} removed", id),
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

fn render(overlay: &Overlay) -> String {
    match &overlay.kind {
        OverlayKind::Suggestion { text } => {
            format!("💡 {}\n   (:accept to apply, :dismiss to discard)", text)
        }
        OverlayKind::Toast { message, .. } => message.clone(),
    }
}
