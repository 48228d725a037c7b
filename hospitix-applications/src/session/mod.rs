//! Session Module
//!
//! The single process-wide session, its persisted record and the storage
//! backends that hold it.

pub mod manager;
pub mod storage;
pub mod types;

pub use manager::{SessionStore, SESSION_KEY};
pub use storage::{open_storage, FileStorage, MemoryStorage, SessionStorage};
pub use types::SessionState;

#[cfg(feature = "sqlite")]
pub use storage::SqliteStorage;
