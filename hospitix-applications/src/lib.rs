//! Hospitix Applications
//!
//! The session store, the role router and the outbound health assistant
//! client, wired together by [`HospitixApplication`].

pub mod assistant;
pub mod auth;
pub mod routing;
pub mod session;

pub use assistant::{HealthAssistantClient, Severity, SymptomAnalysis, SymptomImage};
pub use auth::{DemoDirectory, RegistrationProfile, DEMO_SECRET};
pub use routing::{landing_path, navigate, AuthView, Navigation, Page, ProtectedRoute};
pub use session::{open_storage, SessionState, SessionStorage, SessionStore};

pub use hospitix_core::{HospitixConfig, Identity, Role};

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Application layer errors
#[derive(thiserror::Error, Debug)]
pub enum ApplicationError {
    #[error("Core error: {0}")]
    Core(#[from] hospitix_core::HospitixError),

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Health assistant error: {message}")]
    Assistant { message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[cfg(feature = "sqlite")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;

impl ApplicationError {
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn validation<S: Into<String>>(message: S, field: &str) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.to_string()),
        }
    }

    pub fn assistant<S: Into<String>>(message: S) -> Self {
        Self::Assistant {
            message: message.into(),
        }
    }
}

/// Everything the host needs: the single session and the assistant client
#[derive(Clone)]
pub struct HospitixApplication {
    pub session: Arc<SessionStore>,
    pub assistant: Arc<HealthAssistantClient>,
}

impl HospitixApplication {
    /// Open storage, restore any persisted session and build the assistant client
    pub async fn new(config: &HospitixConfig) -> ApplicationResult<Self> {
        config.validate()?;

        let storage = open_storage(&config.session).await?;
        let session = SessionStore::new(storage)
            .with_auth_delay(Duration::from_millis(config.session.auth_delay_ms));

        let state = session.restore().await;
        info!("Session restored as {}", state);

        let assistant = HealthAssistantClient::new(&config.assistant)?;

        Ok(Self {
            session: Arc::new(session),
            assistant: Arc::new(assistant),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hospitix_core::StorageBackend;

    #[tokio::test]
    async fn test_application_starts_anonymous_with_memory_storage() {
        let mut config = HospitixConfig::default();
        config.session.storage = StorageBackend::Memory;
        config.session.auth_delay_ms = 0;

        let app = HospitixApplication::new(&config).await.unwrap();
        assert_eq!(app.session.state().await, SessionState::Anonymous);
        assert!(!app.session.is_loading());
    }

    #[tokio::test]
    async fn test_application_restores_file_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = HospitixConfig::default();
        config.session.storage = StorageBackend::File;
        config.session.path = Some(dir.path().join("session.json").display().to_string());
        config.session.auth_delay_ms = 0;

        let first = HospitixApplication::new(&config).await.unwrap();
        assert!(first.session.login("pathology", DEMO_SECRET).await.unwrap());
        drop(first);

        let second = HospitixApplication::new(&config).await.unwrap();
        assert_eq!(
            second.session.state().await,
            SessionState::Authenticated(Role::Pathology)
        );
    }
}
