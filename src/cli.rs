//! CLI definitions for Scribe.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Scribe CLI.
#[derive(Parser)]
#[command(name = "scribe")]
#[command(about = "Grammar correction and translation suggestions while you type")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.scribe/config.toml)
    #[arg(short, long, global = true, env = "SCRIBE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Interactive session: each line you enter replaces the field text (default)
    Session,

    /// Correct or translate text once and print the result
    Correct {
        /// Text to rewrite
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Check that the active provider accepts the configured API key
    Check,

    /// Settings management commands
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Run the self-hosted translation endpoint
    Serve(ServeArgs),
}

/// Overrides for the `[server]` config section.
#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind
    #[arg(long)]
    pub port: Option<u16>,

    /// Hugging Face model to translate with
    #[arg(long, env = "MODEL_ID")]
    pub model: Option<String>,

    /// Hugging Face access token
    #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
    pub hf_token: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum SettingsAction {
    /// Show current settings (API key masked)
    Show,

    /// Write default values for settings that are not set yet
    Init,

    /// Update one or more settings
    Set {
        /// Target language, e.g. English
        #[arg(long)]
        language: Option<String>,

        /// API key for the selected provider
        #[arg(long)]
        api_key: Option<String>,

        /// Hugging Face API key, kept for when that provider is selected
        #[arg(long)]
        hf_api_key: Option<String>,

        /// Provider: gemini or huggingface
        #[arg(long)]
        provider: Option<String>,

        /// Hugging Face model id, e.g. mistralai/Mixtral-8x7B-Instruct-v0.1
        #[arg(long)]
        model: Option<String>,
    },
}
