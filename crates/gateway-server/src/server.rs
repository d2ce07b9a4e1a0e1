//! Listener setup and the serve loop.

use std::future::Future;
use tokio::net::TcpListener;
use tracing::info;

use crate::{error::ServerError, routes::create_router, shutdown::shutdown_signal, state::AppState};

/// Bind address
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
}

impl ServerConfig {
    /// `host:port`
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// The gateway HTTP server
#[derive(Debug)]
pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    /// Create a server
    #[must_use]
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Serve until SIGINT or SIGTERM, then drain in-flight requests.
    pub async fn run(self) -> Result<(), ServerError> {
        self.run_until(async {
            shutdown_signal().await;
        })
        .await
    }

    /// Serve until `shutdown` resolves.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let address = self.config.address();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| ServerError::Bind {
                address: address.clone(),
                source,
            })?;

        let local = listener.local_addr().map_or(address, |a| a.to_string());
        info!(
            address = %local,
            provider = %self.state.assistant.provider_name(),
            model = %self.state.assistant.model(),
            configured_credential = self.state.assistant.has_configured_credential(),
            "Assistant gateway listening"
        );

        axum::serve(listener, create_router(self.state))
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::Serve)?;

        info!("Server stopped");
        Ok(())
    }
}
