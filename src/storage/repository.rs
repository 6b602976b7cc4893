//! SQLite repository for stored files and user credentials
//!
//! One connection serves the whole process, serialized by a mutex: every
//! operation locks, runs to completion and unlocks, so concurrent requests
//! can never interleave on a shared cursor.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::StoredFileEntry;

/// SQLite repository for file blobs and users
///
/// Clones share the same connection and mutex.
#[derive(Clone)]
pub struct FileRepository {
    conn: Arc<Mutex<Connection>>,
}

impl FileRepository {
    /// Create or open the database at the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::storage(format!("Failed to create data dir: {}", e)))?;
        }

        let conn = Connection::open(path)
            .map_err(|e| Error::storage(format!("Failed to open database: {}", e)))?;

        let repo = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        repo.migrate()?;
        Ok(repo)
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::storage(format!("Failed to open in-memory database: {}", e)))?;

        let repo = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        repo.migrate()?;
        Ok(repo)
    }

    /// Run database migrations
    fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            PRAGMA temp_store=MEMORY;
        "#,
        )
        .map_err(|e| Error::storage(format!("Failed to set pragmas: {}", e)))?;

        conn.execute_batch(
            r#"
            -- Stored file blobs. Names are deliberately NOT unique: repeated
            -- uploads under the same name each get their own row.
            CREATE TABLE IF NOT EXISTS stored_files (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                content BLOB NOT NULL,
                uploaded_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_stored_files_name ON stored_files(name);

            -- Registered users, checked by plain equality on login
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL
            );
        "#,
        )
        .map_err(|e| Error::storage(format!("Failed to run migrations: {}", e)))?;

        tracing::info!("Database migrations complete");
        Ok(())
    }

    // ==================== Stored file operations ====================

    /// Insert a new stored file row unconditionally and return its ID.
    ///
    /// Duplicate names are never checked for or rejected.
    pub fn put(&self, name: &str, content: &[u8]) -> Result<i64> {
        let conn = self.conn.lock();

        conn.execute(
            "INSERT INTO stored_files (name, content, uploaded_at) VALUES (?1, ?2, ?3)",
            params![name, content, Utc::now().to_rfc3339()],
        )
        .map_err(|e| Error::storage(format!("Failed to insert file: {}", e)))?;

        Ok(conn.last_insert_rowid())
    }

    /// List all stored names, one per row (duplicates included).
    ///
    /// Ordering is unspecified; callers must not rely on it.
    pub fn list(&self) -> Result<Vec<String>> {
        let conn = self.conn.lock();

        let mut stmt = conn
            .prepare("SELECT name FROM stored_files")
            .map_err(|e| Error::storage(format!("Failed to prepare query: {}", e)))?;

        let names = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| Error::storage(format!("Failed to list files: {}", e)))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(names)
    }

    /// List metadata for all stored rows
    pub fn list_entries(&self) -> Result<Vec<StoredFileEntry>> {
        let conn = self.conn.lock();

        let mut stmt = conn
            .prepare("SELECT id, name, LENGTH(content), uploaded_at FROM stored_files")
            .map_err(|e| Error::storage(format!("Failed to prepare query: {}", e)))?;

        let entries = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .map_err(|e| Error::storage(format!("Failed to list files: {}", e)))?
            .filter_map(|r| r.ok())
            .map(|(id, name, size, uploaded_at)| StoredFileEntry {
                id,
                name,
                size: size.max(0) as u64,
                uploaded_at: uploaded_at
                    .parse::<DateTime<Utc>>()
                    .unwrap_or_else(|_| Utc::now()),
            })
            .collect();

        Ok(entries)
    }

    /// Fetch the content of some row matching `name`.
    ///
    /// When duplicates exist it is unspecified which row is returned.
    pub fn get(&self, name: &str) -> Result<Vec<u8>> {
        let conn = self.conn.lock();

        let content: Option<Vec<u8>> = conn
            .query_row(
                "SELECT content FROM stored_files WHERE name = ?1 LIMIT 1",
                params![name],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| Error::storage(format!("Failed to fetch file: {}", e)))?;

        content.ok_or_else(|| Error::NotFound(name.to_string()))
    }

    // ==================== User operations ====================

    /// Register a new user; fails if the email is already taken
    pub fn create_user(&self, email: &str, password: &str) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute(
            "INSERT INTO users (email, password) VALUES (?1, ?2)",
            params![email, password],
        )
        .map_err(|e| Error::storage(format!("Failed to register user: {}", e)))?;

        Ok(())
    }

    /// Check credentials by two-column equality
    pub fn verify_user(&self, email: &str, password: &str) -> Result<bool> {
        let conn = self.conn.lock();

        let found: Option<i64> = conn
            .query_row(
                "SELECT id FROM users WHERE email = ?1 AND password = ?2",
                params![email, password],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| Error::storage(format!("Failed to check credentials: {}", e)))?;

        Ok(found.is_some())
    }
}
