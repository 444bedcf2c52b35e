//! Scribe - grammar correction and translation suggestions while you type.
//!
//! Main entry point for the Scribe CLI.

mod cli;
mod cmd_serve;
mod cmd_session;
mod cmd_settings;
mod register;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use scribe_config::{Config, ConfigLoader, ConfigValidator, FileSettingsStore};
use scribe_core::ProviderRegistry;
use scribe_pipeline::{PipelineError, SUCCESS_TOAST_TEXT};
use scribe_protocols::SettingsStore;

use crate::cli::{Cli, Commands};

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.scribe/logs/ with daily rotation.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = ConfigLoader::scribe_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("scribe")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes the file writer when dropped, so it must outlive main.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        // Console output goes to stderr so it does not mix with session output.
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let config = ConfigLoader::load_or_default(path)?;
    let warnings = ConfigValidator::validate(&config).into_result()?;
    for warning in warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(ConfigLoader::default_path);
    let config = load_config(&config_path)?;

    let settings_path = ConfigLoader::expand_path(&config.settings.path);
    let store = Arc::new(FileSettingsStore::open(settings_path)?);

    match cli.command {
        Some(Commands::Settings { action }) => {
            cmd_settings::handle_settings_command(action, &store)
        }
        Some(Commands::Correct { text }) => {
            let registry = register::build_registry(&config.providers)?;
            correct(&text.join(" "), &registry, store.as_ref()).await
        }
        Some(Commands::Serve(args)) => cmd_serve::run_serve(&config, args).await,
        Some(Commands::Check) => {
            let registry = register::build_registry(&config.providers)?;
            check(&registry, store.as_ref()).await
        }
        Some(Commands::Session) | None => {
            info!("Starting Scribe v{}", env!("CARGO_PKG_VERSION"));
            let registry = register::build_registry(&config.providers)?;
            cmd_session::run_session(&config, registry, store).await
        }
    }
}

/// Rewrite `text` once with the configured provider.
async fn correct(
    text: &str,
    registry: &ProviderRegistry,
    store: &dyn SettingsStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = store.load()?;
    if !settings.has_credentials() {
        return Err(PipelineError::MissingCredential.into());
    }

    match registry.generate(text, &settings).await? {
        Some(corrected) if corrected.to_lowercase() != text.to_lowercase() => {
            println!("{}", corrected)
        }
        _ => println!("{}", SUCCESS_TOAST_TEXT),
    }
    Ok(())
}

/// Test the selected provider with the configured key.
async fn check(
    registry: &ProviderRegistry,
    store: &dyn SettingsStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = store.load()?;
    if !settings.has_credentials() {
        return Err(PipelineError::MissingCredential.into());
    }

    registry
        .test_connection(settings.api_provider, &settings.api_key)
        .await?;
    println!("{} connection OK", settings.api_provider.display_name());
    Ok(())
}
