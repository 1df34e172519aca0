//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{ExplainError, Result};
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| ExplainError::config("Configuration is required"))?;

        HttpServer::new(&config).await
    }
}

/// Build and run the server for `config`
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting ErrExplain v{}", crate::VERSION);

    let server = ServerBuilder::new().with_config(config).build().await?;
    let state = server.state();
    info!(
        storage_mode = ?state.storage_mode(),
        quota = state.quota_backend,
        analyzer = state.analyzer_name,
        "Server starting at: http://{}",
        server.config().address()
    );
    info!("API Endpoints:");
    info!("   GET    /health");
    info!("   POST   /api/classify");
    info!("   POST   /api/analyze-error");
    info!("   GET    /api/analyze-status");
    info!("   GET    /api/user-history");
    info!("   DELETE /api/user-history?id=...");
    info!("   POST   /api/share-error");
    info!("   GET    /api/shared-error?shareId=...");

    server.start().await
}
