use std::fs;
use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use crate::app::AppId;

const SETTINGS_ROW_ID: i64 = 1;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("preference store lock poisoned")]
    Lock,
}

pub struct PreferenceStore {
    conn: Mutex<Connection>,
    default_app: AppId,
}

impl PreferenceStore {
    /// Open (creating if needed) the store at `path`.
    pub fn open(path: &Path, default_app: AppId) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "opened preference store");
        Self::with_connection(conn, default_app)
    }

    pub fn open_in_memory(default_app: AppId) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?, default_app)
    }

    fn with_connection(conn: Connection, default_app: AppId) -> Result<Self, StoreError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                id INTEGER PRIMARY KEY,
                last_used_app TEXT
            );
            "#,
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
            default_app,
        })
    }

    pub fn default_app(&self) -> AppId {
        self.default_app
    }

    pub fn set_last_used(&self, app: AppId) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;
        conn.execute(
            r#"
            INSERT INTO settings (id, last_used_app)
            VALUES (?1, ?2)
            ON CONFLICT(id) DO UPDATE SET last_used_app = ?2
            "#,
            params![SETTINGS_ROW_ID, app.slug()],
        )?;
        Ok(())
    }

    /// The stored application, or the default when nothing usable is stored.
    pub fn get_last_used(&self) -> Result<AppId, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;
        let stored: Option<Option<String>> = conn
            .query_row(
                "SELECT last_used_app FROM settings WHERE id = ?1",
                [SETTINGS_ROW_ID],
                |row| row.get(0),
            )
            .optional()?;

        let app = stored
            .flatten()
            .and_then(|slug| match slug.parse::<AppId>() {
                Ok(app) => Some(app),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring stored preference");
                    None
                }
            })
            .unwrap_or(self.default_app);
        Ok(app)
    }

    /// Flush and close the underlying connection.
    pub fn close(self) -> Result<(), StoreError> {
        let conn = self.conn.into_inner().map_err(|_| StoreError::Lock)?;
        conn.close().map_err(|(_, e)| StoreError::Database(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_store_returns_default() {
        let store = PreferenceStore::open_in_memory(AppId::Cursor).unwrap();
        assert_eq!(store.get_last_used().unwrap(), AppId::Cursor);
    }

    #[test]
    fn test_set_then_get() {
        let store = PreferenceStore::open_in_memory(AppId::Cursor).unwrap();
        store.set_last_used(AppId::Zed).unwrap();
        assert_eq!(store.get_last_used().unwrap(), AppId::Zed);
    }

    #[test]
    fn test_set_twice_is_idempotent() {
        let store = PreferenceStore::open_in_memory(AppId::Cursor).unwrap();
        store.set_last_used(AppId::Vscode).unwrap();
        store.set_last_used(AppId::Vscode).unwrap();
        assert_eq!(store.get_last_used().unwrap(), AppId::Vscode);

        let conn = store.conn.lock().unwrap();
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM settings", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_last_write_wins() {
        let store = PreferenceStore::open_in_memory(AppId::Cursor).unwrap();
        store.set_last_used(AppId::Vscode).unwrap();
        store.set_last_used(AppId::Finder).unwrap();
        assert_eq!(store.get_last_used().unwrap(), AppId::Finder);
    }

    #[test]
    fn test_unknown_stored_value_reads_as_default() {
        let store = PreferenceStore::open_in_memory(AppId::Sublime).unwrap();
        {
            let conn = store.conn.lock().unwrap();
            conn.execute(
                "INSERT INTO settings (id, last_used_app) VALUES (1, 'notepad')",
                [],
            )
            .unwrap();
        }
        assert_eq!(store.get_last_used().unwrap(), AppId::Sublime);
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/openin.db");

        let store = PreferenceStore::open(&path, AppId::Cursor).unwrap();
        store.set_last_used(AppId::Webstorm).unwrap();
        store.close().unwrap();

        let store = PreferenceStore::open(&path, AppId::Cursor).unwrap();
        assert_eq!(store.get_last_used().unwrap(), AppId::Webstorm);
    }
}
