//! File based configuration

use crate::error::{HospitixError, HospitixResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top level configuration loaded from `hospitix.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HospitixConfig {
    pub session: SessionConfig,
    pub assistant: AssistantConfig,
}

/// Where the persisted session record lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
    Sqlite,
}

impl std::str::FromStr for StorageBackend {
    type Err = HospitixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "file" => Ok(StorageBackend::File),
            "sqlite" => Ok(StorageBackend::Sqlite),
            _ => Err(HospitixError::config(format!(
                "Unknown session storage backend: {}",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub storage: StorageBackend,
    /// File path for `file` storage, database URL for `sqlite`
    pub path: Option<String>,
    /// Artificial latency applied to login and registration
    pub auth_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::File,
            path: default_session_path().map(|p| p.to_string_lossy().into_owned()),
            auth_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Base URL of the symptom analysis / health bot service
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// `<data dir>/hospitix/session.json`, if the platform has a data directory
pub fn default_session_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("hospitix").join("session.json"))
}

impl HospitixConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> HospitixResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| HospitixError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
        })?;

        let config: HospitixConfig = toml::from_str(&content).map_err(|e| HospitixError::Config {
            message: format!("Failed to parse config: {}", e),
            source: Some(Box::new(e)),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> HospitixResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| HospitixError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
        })?;

        std::fs::write(path, content).map_err(|e| HospitixError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> HospitixResult<()> {
        match self.session.storage {
            StorageBackend::File | StorageBackend::Sqlite => {
                if self.session.path.as_deref().map_or(true, str::is_empty) {
                    return Err(HospitixError::config(format!(
                        "session.path is required for {:?} storage",
                        self.session.storage
                    )));
                }
            }
            StorageBackend::Memory => {}
        }

        if self.assistant.base_url.trim().is_empty() {
            return Err(HospitixError::config("assistant.base_url must not be empty"));
        }

        if self.assistant.timeout_secs == 0 {
            return Err(HospitixError::config(
                "assistant.timeout_secs must be greater than 0",
            ));
        }

        Ok(())
    }
}
