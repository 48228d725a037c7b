//! Hospitix Web Server
//!
//! Hosts the single application session and renders the role dashboards
//! server-side. Every page request goes through the role router.

pub mod auth;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
pub mod templates;

// Re-export main types
pub use server::HospitixServer;
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Router,
};
use hospitix_applications::ApplicationError;
use hospitix_core::{HospitixConfig, LogFormat, LoggingConfig, StorageBackend};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the main application router
pub fn create_app(state: AppState) -> Router {
    let cors = if state.config.dev_mode {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    routes::all_routes()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024)) // 10MB max body size
        .with_state(state)
}

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    /// Enable development mode (permissive CORS)
    pub dev_mode: bool,
    /// Optional TOML file with the application configuration
    pub config_path: Option<String>,
    /// Overrides applied on top of the application configuration
    pub session_storage: Option<StorageBackend>,
    pub session_path: Option<String>,
    pub auth_delay_ms: Option<u64>,
    pub assistant_url: Option<String>,
    /// Fallback sqlite location, used only when no layer names a backend
    pub database_url: Option<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            dev_mode: false,
            config_path: None,
            session_storage: None,
            session_path: None,
            auth_delay_ms: None,
            assistant_url: None,
            database_url: None,
        }
    }
}

impl WebConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        Self {
            host: var("HOSPITIX_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: var("HOSPITIX_PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or(8080),
            dev_mode: var("HOSPITIX_DEV_MODE")
                .and_then(|flag| flag.parse().ok())
                .unwrap_or(false),
            config_path: var("HOSPITIX_CONFIG"),
            session_storage: var("HOSPITIX_SESSION_STORE").and_then(|s| s.parse().ok()),
            session_path: var("HOSPITIX_SESSION_PATH"),
            auth_delay_ms: var("HOSPITIX_AUTH_DELAY_MS").and_then(|ms| ms.parse().ok()),
            assistant_url: var("HOSPITIX_ASSISTANT_URL"),
            database_url: var("DATABASE_URL"),
        }
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Layer the config file, `HOSPITIX__SECTION__KEY` environment variables
    /// and finally the explicit overrides on this struct
    pub fn application_config(&self) -> WebResult<HospitixConfig> {
        let mut builder = config::Config::builder();

        if let Some(path) = &self.config_path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        let layered = builder
            .add_source(
                config::Environment::with_prefix("HOSPITIX")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .map_err(|e| WebError::Config(e.to_string()))?;
        let backend_named = layered.get_string("session.storage").is_ok();

        let mut app_config: HospitixConfig = layered
            .try_deserialize()
            .map_err(|e| WebError::Config(e.to_string()))?;

        match (self.session_storage, &self.database_url) {
            (Some(storage), _) => app_config.session.storage = storage,
            (None, Some(url)) if !backend_named => {
                app_config.session.storage = StorageBackend::Sqlite;
                app_config.session.path = Some(url.clone());
            }
            _ => {}
        }
        if let Some(path) = &self.session_path {
            app_config.session.path = Some(path.clone());
        }
        if let Some(delay) = self.auth_delay_ms {
            app_config.session.auth_delay_ms = delay;
        }
        if let Some(url) = &self.assistant_url {
            app_config.assistant.base_url = url.clone();
        }

        app_config
            .validate()
            .map_err(|e| WebError::Config(e.to_string()))?;
        Ok(app_config)
    }
}

/// Error types for the web server
#[derive(thiserror::Error, Debug)]
pub enum WebError {
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Form error: {0}")]
    Form(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            WebError::Form(_) => (StatusCode::BAD_REQUEST, "invalid_form"),
            WebError::Application(ApplicationError::Validation { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_failed")
            }
            WebError::Application(ApplicationError::Http(_))
            | WebError::Application(ApplicationError::Assistant { .. }) => {
                (StatusCode::BAD_GATEWAY, "assistant_unavailable")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        tracing::error!("Request failed: {}", self);

        let body = Json(serde_json::json!({
            "error": error_code,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Initialize logging for the web server
pub fn init_logging(level: &str, format: LogFormat) -> WebResult<()> {
    let config = LoggingConfig {
        level: level.to_string(),
        format,
        filter_directives: vec![
            format!("hospitix_web={}", level),
            "tower_http=debug".to_string(),
        ],
        ..Default::default()
    };

    hospitix_core::init_logging(&config).map_err(|e| WebError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win_over_defaults() {
        let config = WebConfig {
            session_storage: Some(StorageBackend::Memory),
            auth_delay_ms: Some(5),
            assistant_url: Some("http://assistant.internal:9000".to_string()),
            ..Default::default()
        };

        let resolved = config.application_config().unwrap();
        assert_eq!(resolved.session.storage, StorageBackend::Memory);
        assert_eq!(resolved.session.auth_delay_ms, 5);
        assert_eq!(resolved.assistant.base_url, "http://assistant.internal:9000");
        assert_eq!(resolved.assistant.timeout_secs, 30);
    }

    #[test]
    fn test_config_file_layer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hospitix.toml");
        std::fs::write(
            &path,
            "[session]\nstorage = \"memory\"\nauth_delay_ms = 42\n\n[assistant]\ntimeout_secs = 3\n",
        )
        .unwrap();

        let config = WebConfig {
            config_path: Some(path.display().to_string()),
            ..Default::default()
        };

        let resolved = config.application_config().unwrap();
        assert_eq!(resolved.session.storage, StorageBackend::Memory);
        assert_eq!(resolved.session.auth_delay_ms, 42);
        assert_eq!(resolved.assistant.timeout_secs, 3);
        assert_eq!(resolved.assistant.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_database_url_only_applies_when_no_backend_is_named() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hospitix.toml");
        std::fs::write(&path, "[session]\nstorage = \"memory\"\n").unwrap();

        let config = WebConfig {
            config_path: Some(path.display().to_string()),
            database_url: Some("sqlite://session.db".to_string()),
            ..Default::default()
        };
        let resolved = config.application_config().unwrap();
        assert_eq!(resolved.session.storage, StorageBackend::Memory);

        let without_file = WebConfig {
            config_path: None,
            ..config.clone()
        };
        let resolved = without_file.application_config().unwrap();
        assert_eq!(resolved.session.storage, StorageBackend::Sqlite);
        assert_eq!(resolved.session.path.as_deref(), Some("sqlite://session.db"));

        let explicit = WebConfig {
            session_storage: Some(StorageBackend::Memory),
            ..without_file
        };
        let resolved = explicit.application_config().unwrap();
        assert_eq!(resolved.session.storage, StorageBackend::Memory);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let config = WebConfig {
            config_path: Some("/definitely/not/here/hospitix.toml".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.application_config(),
            Err(WebError::Config(_))
        ));
    }

    #[test]
    fn test_error_status_codes() {
        let response = WebError::Form("bad multipart".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response =
            WebError::Application(ApplicationError::assistant("upstream down")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = WebError::Application(ApplicationError::storage("disk full")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_address() {
        let config = WebConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            ..Default::default()
        };
        assert_eq!(config.address(), "0.0.0.0:3000");
    }
}
