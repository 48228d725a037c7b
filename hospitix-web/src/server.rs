//! Hospitix Web Server
//!
//! Main web server implementation using Axum.

use crate::{create_app, AppState, WebConfig, WebError, WebResult};
use axum::serve;
use hospitix_core::StorageBackend;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Main Hospitix server
pub struct HospitixServer {
    config: WebConfig,
    state: AppState,
}

impl HospitixServer {
    /// Create a new server, restoring any persisted session
    pub async fn new(config: WebConfig) -> WebResult<Self> {
        let state = AppState::new(config.clone()).await?;

        Ok(Self { config, state })
    }

    /// Start the web server
    pub async fn start(self) -> WebResult<()> {
        let address = self.config.address();

        info!("Starting Hospitix web server");
        info!("Server address: http://{}", address);
        info!("Development mode: {}", self.config.dev_mode);

        let app = create_app(self.state.clone());

        let listener = TcpListener::bind(&address)
            .await
            .map_err(WebError::Server)?;

        info!("Server listening on http://{}", address);

        if let Err(e) = serve(listener, app).await {
            error!("Server error: {}", e);
            return Err(WebError::Server(e));
        }

        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &WebConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Builder for HospitixServer
pub struct HospitixServerBuilder {
    config: WebConfig,
}

impl HospitixServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self {
            config: WebConfig::default(),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: WebConfig) -> Self {
        Self { config }
    }

    /// Set the server host
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Enable development mode
    pub fn dev_mode(mut self, dev_mode: bool) -> Self {
        self.config.dev_mode = dev_mode;
        self
    }

    pub fn session_storage(mut self, storage: StorageBackend) -> Self {
        self.config.session_storage = Some(storage);
        self
    }

    pub fn session_path<S: Into<String>>(mut self, path: S) -> Self {
        self.config.session_path = Some(path.into());
        self
    }

    /// Artificial latency for login and registration
    pub fn auth_delay_ms(mut self, delay: u64) -> Self {
        self.config.auth_delay_ms = Some(delay);
        self
    }

    pub fn assistant_url<S: Into<String>>(mut self, url: S) -> Self {
        self.config.assistant_url = Some(url.into());
        self
    }

    /// Build the server
    pub async fn build(self) -> WebResult<HospitixServer> {
        HospitixServer::new(self.config).await
    }
}

impl Default for HospitixServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
