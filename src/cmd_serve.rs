//! Serve subcommand: the self-hosted translation endpoint.

use std::sync::Arc;

use tracing::info;

use scribe_api::{ApiError, AppState, TranslateServer};
use scribe_config::{Config, ServerConfig};
use scribe_provider_huggingface::HuggingFaceProvider;

use crate::cli::ServeArgs;
use crate::register::huggingface_config;

pub(crate) async fn run_serve(
    config: &Config,
    args: ServeArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let server_config = server_config(&config.server, &args);
    let token = args.hf_token.ok_or(ApiError::MissingToken)?;

    let provider = HuggingFaceProvider::new(huggingface_config(&config.providers.huggingface))?;
    let state = AppState::new(provider, server_config.model.clone(), token)?;

    info!("Starting translation server on {}", server_config.addr());
    TranslateServer::new(server_config, Arc::new(state)).run().await
}

/// Apply command-line overrides on top of the `[server]` section.
fn server_config(base: &ServerConfig, args: &ServeArgs) -> ServerConfig {
    ServerConfig {
        host: args.host.clone().unwrap_or_else(|| base.host.clone()),
        port: args.port.unwrap_or(base.port),
        model: args
            .model
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| base.model.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_keeps_file_values() {
        let merged = server_config(&ServerConfig::default(), &ServeArgs::default());
        assert_eq!(merged.addr(), "127.0.0.1:8000");
        assert_eq!(merged.model, "microsoft/Phi-3-mini-4k-instruct");
    }

    #[test]
    fn test_server_config_overrides() {
        let args = ServeArgs {
            host: Some("0.0.0.0".to_string()),
            port: Some(8080),
            model: Some("org/other".to_string()),
            hf_token: None,
        };
        let merged = server_config(&ServerConfig::default(), &args);
        assert_eq!(merged.addr(), "0.0.0.0:8080");
        assert_eq!(merged.model, "org/other");
    }

    #[test]
    fn test_blank_model_falls_back() {
        let args = ServeArgs {
            model: Some(" ".to_string()),
            ..Default::default()
        };
        let merged = server_config(&ServerConfig::default(), &args);
        assert_eq!(merged.model, "microsoft/Phi-3-mini-4k-instruct");
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_binding() {
        let err = run_serve(&Config::default(), ServeArgs::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("HF_TOKEN"));
    }
}
