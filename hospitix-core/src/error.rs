//! Core error handling

use thiserror::Error;
use tracing::{error, warn};

pub type HospitixResult<T> = Result<T, HospitixError>;

/// Main error type for the Hospitix core
#[derive(Error, Debug)]
pub enum HospitixError {
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HospitixError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    pub fn validation<S: Into<String>>(message: S, field: Option<&str>) -> Self {
        Self::Validation {
            message: message.into(),
            field: field.map(str::to_string),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            HospitixError::Validation { field, .. } => {
                warn!(error = %self, field = ?field, "Validation failed");
            }
            HospitixError::UnknownRole(_) => {
                warn!(error = %self, "Rejected unknown role");
            }
            _ => {
                error!(error = %self, "Error occurred");
            }
        }
    }
}

/// Shorthand for building a [`HospitixError::Validation`]
#[macro_export]
macro_rules! validation_error {
    ($msg:expr) => {
        $crate::HospitixError::validation($msg, None)
    };
    ($msg:expr, $field:expr) => {
        $crate::HospitixError::validation($msg, Some($field))
    };
}
