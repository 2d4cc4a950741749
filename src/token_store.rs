//! Persisted access credential.
//!
//! The credential lives under a single fixed key in origin-scoped key-value
//! storage, the way a browser page keeps it in local storage. No expiry is
//! tracked and nothing is encrypted.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use std::fmt;
use std::path::Path;

/// Opaque bearer token.
///
/// `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Get/set/clear access to the one persisted credential.
pub trait TokenStore {
    /// `None` when nothing is stored.
    fn load(&self) -> Result<Option<Credential>>;
    fn save(&mut self, credential: &Credential) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

/// In-process store. Forgets everything on drop.
#[derive(Debug, Default, Clone)]
pub struct MemoryTokenStore {
    credential: Option<Credential>,
}

impl MemoryTokenStore {
    pub fn with_credential(credential: Credential) -> Self {
        Self { credential: Some(credential) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<Credential>> {
        Ok(self.credential.clone())
    }

    fn save(&mut self, credential: &Credential) -> Result<()> {
        self.credential = Some(credential.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.credential = None;
        Ok(())
    }
}

/// SQLite-backed store. Rows are scoped by `(origin, key)` so several
/// redirect origins can share one database file without seeing each other.
pub struct SqliteTokenStore {
    conn: Connection,
    origin: String,
    key: String,
}

impl SqliteTokenStore {
    /// Opens (or creates) the storage database at `path`.
    pub fn open(path: &Path, origin: &str, key: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open storage database at {}", path.display()))?;
        Self::with_connection(conn, origin, key)
    }

    /// Wraps an existing connection, creating the table if missing.
    pub fn with_connection(conn: Connection, origin: &str, key: &str) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS local_storage (
                origin TEXT NOT NULL,
                key    TEXT NOT NULL,
                value  TEXT NOT NULL,
                PRIMARY KEY (origin, key)
            )",
            [],
        )
        .context("Failed to create local_storage table")?;

        Ok(Self {
            conn,
            origin: origin.to_string(),
            key: key.to_string(),
        })
    }
}

impl TokenStore for SqliteTokenStore {
    fn load(&self) -> Result<Option<Credential>> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE origin = ?1 AND key = ?2",
                [self.origin.as_str(), self.key.as_str()],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read `{}' from storage", self.key))?;

        log::trace!("Stored credential present for {}: {}", self.origin, value.is_some());
        Ok(value.map(Credential))
    }

    fn save(&mut self, credential: &Credential) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO local_storage (origin, key, value) VALUES (?1, ?2, ?3)
                 ON CONFLICT(origin, key) DO UPDATE SET value = excluded.value",
                [self.origin.as_str(), self.key.as_str(), credential.as_str()],
            )
            .with_context(|| format!("Failed to write `{}' to storage", self.key))?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.conn
            .execute(
                "DELETE FROM local_storage WHERE origin = ?1 AND key = ?2",
                [self.origin.as_str(), self.key.as_str()],
            )
            .with_context(|| format!("Failed to remove `{}' from storage", self.key))?;
        Ok(())
    }
}
