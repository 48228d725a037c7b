//! Session Storage - key-value persistence for the session record
//!
//! The session only ever stores one entry, but backends expose a small
//! key-value surface so the record's key stays a concern of the store.

use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use hospitix_core::{SessionConfig, StorageBackend};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// Key-value medium that outlives the process
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn get(&self, key: &str) -> ApplicationResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> ApplicationResult<()>;

    /// Removing a missing key is not an error
    async fn remove(&self, key: &str) -> ApplicationResult<()>;
}

/// In-memory storage (for development and testing)
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStorage for MemoryStorage {
    async fn get(&self, key: &str) -> ApplicationResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> ApplicationResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> ApplicationResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// JSON object file of key -> value, replaced atomically on every write
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    async fn load_entries(&self) -> ApplicationResult<HashMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(ApplicationError::Io(e)),
        }
    }

    /// Writers start over from an empty map when the file is unreadable JSON
    async fn load_entries_for_write(&self) -> ApplicationResult<HashMap<String, String>> {
        match self.load_entries().await {
            Ok(entries) => Ok(entries),
            Err(ApplicationError::Serialization(e)) => {
                warn!(
                    "Discarding unparsable storage file {}: {}",
                    self.path.display(),
                    e
                );
                Ok(HashMap::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn save_entries(&self, entries: &HashMap<String, String>) -> ApplicationResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json_data = serde_json::to_string_pretty(entries)?;
        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        tokio::fs::write(&tmp_path, json_data).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        debug!("Saved {} entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl SessionStorage for FileStorage {
    async fn get(&self, key: &str) -> ApplicationResult<Option<String>> {
        Ok(self.load_entries().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> ApplicationResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load_entries_for_write().await?;
        entries.insert(key.to_string(), value.to_string());
        self.save_entries(&entries).await
    }

    async fn remove(&self, key: &str) -> ApplicationResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load_entries_for_write().await?;
        if entries.remove(key).is_some() {
            self.save_entries(&entries).await?;
        }
        Ok(())
    }
}

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStorage;

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::SessionStorage;
    use crate::ApplicationResult;
    use async_trait::async_trait;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
    use std::str::FromStr;
    use tracing::info;

    /// SQLite backed storage using a `kv_store` table
    #[derive(Debug, Clone)]
    pub struct SqliteStorage {
        pool: SqlitePool,
    }

    impl SqliteStorage {
        pub async fn connect(database_url: &str) -> ApplicationResult<Self> {
            let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

            // A single connection keeps `sqlite::memory:` databases shared
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .connect_with(options)
                .await?;

            sqlx::query(
                "CREATE TABLE IF NOT EXISTS kv_store (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                )",
            )
            .execute(&pool)
            .await?;

            info!("SQLite session storage ready at {}", database_url);
            Ok(Self { pool })
        }
    }

    #[async_trait]
    impl SessionStorage for SqliteStorage {
        async fn get(&self, key: &str) -> ApplicationResult<Option<String>> {
            let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
            Ok(value)
        }

        async fn set(&self, key: &str, value: &str) -> ApplicationResult<()> {
            sqlx::query(
                "INSERT INTO kv_store (key, value) VALUES (?, ?)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            )
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;
            Ok(())
        }

        async fn remove(&self, key: &str) -> ApplicationResult<()> {
            sqlx::query("DELETE FROM kv_store WHERE key = ?")
                .bind(key)
                .execute(&self.pool)
                .await?;
            Ok(())
        }
    }
}

/// Build the storage backend selected in the session configuration
pub async fn open_storage(config: &SessionConfig) -> ApplicationResult<Arc<dyn SessionStorage>> {
    let path = || {
        config
            .path
            .clone()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ApplicationError::storage("session.path is not configured"))
    };

    match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory session storage");
            Ok(Arc::new(MemoryStorage::new()))
        }
        StorageBackend::File => {
            let path = path()?;
            info!("Using file session storage at {}", path);
            Ok(Arc::new(FileStorage::new(path)))
        }
        #[cfg(feature = "sqlite")]
        StorageBackend::Sqlite => Ok(Arc::new(SqliteStorage::connect(&path()?).await?)),
        #[cfg(not(feature = "sqlite"))]
        StorageBackend::Sqlite => Err(ApplicationError::storage(
            "SQLite storage requires the `sqlite` feature",
        )),
    }
}
