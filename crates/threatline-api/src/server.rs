//! HTTP server implementation

use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use threatline_engine::Refresher;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::{handlers::AppState, routes::create_router};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Timeline API server
pub struct ApiServer {
    config: ServerConfig,
    app_state: AppState,
}

impl ApiServer {
    /// Create new server with default configuration
    pub fn new(refresher: Arc<Refresher>) -> Self {
        Self::with_config(ServerConfig::default(), refresher)
    }

    /// Create new server with custom configuration
    pub fn with_config(config: ServerConfig, refresher: Arc<Refresher>) -> Self {
        Self {
            config,
            app_state: AppState::new(refresher),
        }
    }

    /// Get the server address
    pub fn address(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.config.host, self.config.port).parse()?)
    }

    /// Create the application router
    pub fn create_app(&self) -> Router {
        create_router(Arc::new(self.app_state.clone()))
    }

    /// Start the server
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.address()?;
        let app = self.create_app();

        info!("Starting timeline API server on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        info!("Server listening on {}", addr);

        axum::serve(listener, app).await.map_err(|e| {
            error!("Server error: {}", e);
            e.into()
        })
    }

    /// Run the server with graceful shutdown
    pub async fn run_with_shutdown(
        self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let addr = self.address()?;
        let app = self.create_app();

        info!("Starting timeline API server on {} with graceful shutdown", addr);

        let listener = TcpListener::bind(addr).await?;
        info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| {
                error!("Server error: {}", e);
                e.into()
            })
    }
}

/// Utility function to create a shutdown signal
pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
