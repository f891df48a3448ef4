//! SQLite-backed key/value store. Values are JSON documents, one per key.

pub mod migrations;

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

pub type DbConnection = Arc<Mutex<Connection>>;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage lock poisoned")]
    LockPoisoned,

    #[error("Could not determine local data directory")]
    NoDataDir,
}

/// Returns the path to the storage database
///
/// # Platform-specific paths
///
/// - **macOS**: `~/Library/Application Support/contact-import/storage.sqlite3`
/// - **Linux**: `~/.local/share/contact-import/storage.sqlite3`
/// - **Windows**: `%LOCALAPPDATA%\contact-import\storage.sqlite3`
pub fn default_db_path() -> Result<PathBuf, StorageError> {
    let data_dir = dirs::data_local_dir().ok_or(StorageError::NoDataDir)?;
    Ok(data_dir.join("contact-import").join("storage.sqlite3"))
}

pub struct LocalStorage {
    connection: DbConnection,
}

impl LocalStorage {
    /// Open (or create) the store and run migrations
    pub fn open(db_path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        migrations::run_migrations(&conn)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.connection.lock().map_err(|_| StorageError::LockPoisoned)
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let conn = self.lock()?;
        read_value(&conn, key)
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let conn = self.lock()?;
        write_value(&conn, key, value)
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Read-modify-write of one key while holding the connection lock, so
    /// concurrent updates of the same key are applied one after another.
    pub fn update<T, F>(&self, key: &str, apply: F) -> Result<T, StorageError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(Option<T>) -> T,
    {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let updated = apply(read_value(&tx, key)?);
        write_value(&tx, key, &updated)?;

        tx.commit()?;
        Ok(updated)
    }
}

fn read_value<T: DeserializeOwned>(conn: &Connection, key: &str) -> Result<Option<T>, StorageError> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value FROM local_storage WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;

    match raw {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

fn write_value<T: Serialize>(conn: &Connection, key: &str, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    let now = chrono::Utc::now().timestamp();

    conn.execute(
        "INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, json, now],
    )?;
    Ok(())
}
