//! Hospitix Core - Identity, role and configuration types
//!
//! Shared by the application layer and the web host.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use types::*;

// Re-export commonly used external types
pub use tracing;
