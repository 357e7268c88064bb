//! ServerBuilder for fluent API to build HTTP servers

use super::router::build_router;
use super::state::AppStores;
use crate::config::AppConfig;
use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;

/// Builder for the inventory API server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(AppConfig::load()?)
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    stores: Option<AppStores>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with default configuration
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            stores: None,
            custom_routes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Serve from existing stores instead of fresh empty ones
    ///
    /// `AppStores` clones share their records, so the caller can keep a copy
    /// to seed or inspect data.
    pub fn with_stores(mut self, stores: AppStores) -> Self {
        self.stores = Some(stores);
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for endpoints that don't fit the CRUD pattern.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final router
    ///
    /// Fails if the configuration is invalid.
    pub fn build(self) -> Result<Router> {
        self.config.validate()?;
        let stores = self.stores.unwrap_or_default();

        Ok(build_router(
            &stores,
            self.config.page_policy(),
            self.custom_routes,
        ))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the configured address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_address();
        let max_limit = self.config.listing.max_limit;
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!(max_limit, "Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for SIGTERM or Ctrl+C
///
/// If a handler cannot be installed the error is logged and that signal is
/// ignored; the other one still triggers shutdown.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
