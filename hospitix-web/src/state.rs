//! Application state shared by every handler

use crate::{WebConfig, WebResult};
use hospitix_applications::{HospitixApplication, SessionStore};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: WebConfig,
    /// The single session and the assistant client
    pub application: HospitixApplication,
}

impl AppState {
    /// Resolve the layered configuration and start the application
    pub async fn new(config: WebConfig) -> WebResult<Self> {
        let app_config = config.application_config()?;
        info!(
            "Session storage: {:?}, assistant at {}",
            app_config.session.storage, app_config.assistant.base_url
        );

        let application = HospitixApplication::new(&app_config).await?;
        Ok(Self::with_application(config, application))
    }

    pub fn with_application(config: WebConfig, application: HospitixApplication) -> Self {
        Self {
            config,
            application,
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.application.session
    }
}
