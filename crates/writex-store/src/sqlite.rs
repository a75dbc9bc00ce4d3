//! SQLite implementation of the WriterStore trait.
//!
//! This is the primary storage backend for WriteX. It uses rusqlite with
//! bundled SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use writex_core::{WriterAddress, WriterId, WriterIdentity};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{InsertResult, WriterFilter, WriterStore};

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
#[derive(Clone)]
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking pool.
    async fn blocking<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| StoreError::Poisoned(e.to_string()))?;
            f(&conn)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

fn row_to_writer(row: &rusqlite::Row<'_>) -> rusqlite::Result<WriterIdentity> {
    let id: String = row.get("id")?;
    let address: String = row.get("address")?;

    let invalid = |idx: usize, e: writex_core::CoreError| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    };

    Ok(WriterIdentity {
        id: WriterId::from_hex(&id).map_err(|e| invalid(0, e))?,
        public_key: row.get("public_key")?,
        address: WriterAddress::parse(&address).map_err(|e| invalid(2, e))?,
        created_at: row.get("created_at")?,
    })
}

#[async_trait]
impl WriterStore for SqliteStore {
    async fn insert_writer(&self, writer: &WriterIdentity) -> Result<InsertResult> {
        let writer = writer.clone();

        self.blocking(move |conn| {
            // The UNIQUE(public_key) constraint decides the race; a losing
            // insert changes zero rows.
            let changed = conn
                .execute(
                    "INSERT INTO writers (id, public_key, address, created_at)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT(public_key) DO NOTHING",
                    params![
                        writer.id.to_hex(),
                        writer.public_key,
                        writer.address.as_str(),
                        writer.created_at,
                    ],
                )
                .map_err(|e| match e {
                    rusqlite::Error::SqliteFailure(f, _)
                        if f.code == rusqlite::ErrorCode::ConstraintViolation =>
                    {
                        StoreError::DuplicateId(writer.id.to_hex())
                    }
                    other => StoreError::Database(other),
                })?;

            if changed == 0 {
                Ok(InsertResult::AlreadyExists)
            } else {
                Ok(InsertResult::Inserted)
            }
        })
        .await
    }

    async fn find_writer(&self, filter: &WriterFilter) -> Result<Option<WriterIdentity>> {
        let (column, value) = match filter {
            WriterFilter::PublicKey(pk) => ("public_key", pk.clone()),
            WriterFilter::Address(addr) => ("address", addr.as_str().to_string()),
            WriterFilter::Id(id) => ("id", id.to_hex()),
        };

        self.blocking(move |conn| {
            let sql = format!(
                "SELECT id, public_key, address, created_at FROM writers WHERE {} = ?1 LIMIT 1",
                column
            );
            conn.query_row(&sql, params![value], row_to_writer)
                .optional()
                .map_err(StoreError::from)
        })
        .await
    }

    async fn count_writers(&self) -> Result<usize> {
        self.blocking(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM writers", [], |row| row.get(0))?;
            usize::try_from(count).map_err(|e| StoreError::InvalidData(e.to_string()))
        })
        .await
    }
}
