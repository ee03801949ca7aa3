//! SQLite-backed recipe store, one row per name.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::types::RecipeName;

use super::{PersistResult, RecipeStore};

/// SQLite implementation of [`crate::persist::RecipeStore`].
pub struct SqliteRecipeStore {
    conn: Connection,
}

impl SqliteRecipeStore {
    /// Opens or creates a SQLite-backed store at `path`.
    ///
    /// Enables WAL mode and sets `synchronous=NORMAL`.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        let conn = Connection::open(path)?;
        Self::init_connection(conn)
    }

    /// Opens an in-memory SQLite store.
    pub fn open_in_memory() -> PersistResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(conn)
    }

    fn init_connection(conn: Connection) -> PersistResult<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(Self { conn })
    }

    /// Milliseconds timestamp of the last write to `name`.
    pub fn updated_ms(&self, name: &RecipeName) -> PersistResult<Option<u64>> {
        let ts: Option<i64> = self
            .conn
            .query_row(
                "SELECT updated_ms FROM recipes WHERE name = ?1",
                params![name.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(ts.map(|v| v as u64))
    }
}

impl RecipeStore for SqliteRecipeStore {
    fn read(&self, name: &RecipeName) -> PersistResult<Option<Vec<u8>>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM recipes WHERE name = ?1",
                params![name.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn write(&mut self, name: &RecipeName, payload: &[u8]) -> PersistResult<()> {
        self.conn.execute(
            "INSERT INTO recipes(name, payload, updated_ms) VALUES (?1, ?2, ?3)
             ON CONFLICT(name) DO UPDATE SET payload = excluded.payload, updated_ms = excluded.updated_ms",
            params![name.as_str(), payload, now_ms() as i64],
        )?;
        debug!(%name, bytes = payload.len(), "recipe row written");
        Ok(())
    }

    fn remove(&mut self, name: &RecipeName) -> PersistResult<bool> {
        let count = self
            .conn
            .execute("DELETE FROM recipes WHERE name = ?1", params![name.as_str()])?;
        Ok(count > 0)
    }

    fn names(&self) -> PersistResult<Vec<RecipeName>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM recipes ORDER BY name ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut out = Vec::new();
        for row in rows {
            let raw = row?;
            match RecipeName::new(raw.as_str()) {
                Ok(name) => out.push(name),
                Err(err) => debug!(row = %raw, %err, "skipping row with invalid recipe name"),
            }
        }
        Ok(out)
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
