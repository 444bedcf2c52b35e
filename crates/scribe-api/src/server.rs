//! Translation server.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use scribe_config::ServerConfig;

use crate::http::routes::create_router;
use crate::state::AppState;

pub struct TranslateServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl TranslateServer {
    pub fn new(config: ServerConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Get the server address.
    pub fn addr(&self) -> String {
        self.config.addr()
    }

    /// Bind the configured address and serve until Ctrl-C.
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let addr: SocketAddr = self.addr().parse()?;
        let listener = TcpListener::bind(addr).await?;

        self.serve(listener, async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
    }

    /// Serve on an already bound listener until `shutdown` completes.
    pub async fn serve(
        &self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let app = create_router(self.state.clone());

        info!(
            "Translation server listening on {} (model={})",
            listener.local_addr()?,
            self.state.model
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Translation server stopped");
        Ok(())
    }
}
