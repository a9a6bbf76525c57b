//! Server setup and lifecycle management

use std::sync::Arc;

use carbon_core::FootprintPredictor;
use tokio::net::TcpListener;

use crate::api::{create_router, AppState};
use crate::config::DaemonConfig;
use crate::error::{DaemonError, DaemonResult};

/// Carbon prediction daemon server
pub struct Server {
    config: DaemonConfig,
    predictor: Arc<FootprintPredictor>,
}

impl Server {
    /// Create a new server with the given configuration
    pub fn new(config: DaemonConfig) -> Self {
        Self {
            config,
            predictor: Arc::new(FootprintPredictor::new()),
        }
    }

    /// Run the server until a shutdown signal arrives
    pub async fn run(self) -> DaemonResult<()> {
        let addr = self.config.server.listen_addr;

        let state = AppState::new(self.predictor.clone());
        let app = create_router(state, self.config.server.enable_cors);

        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Carbon prediction daemon listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DaemonError::Server(e.to_string()))?;

        tracing::info!("Carbon prediction daemon shutting down");

        Ok(())
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
