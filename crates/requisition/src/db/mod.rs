//! Database module for the request store.
//!
//! Uses rusqlite (SQLite) with a thread-safe `Database` handle.
//! All access is serialized through a `Mutex<Connection>`.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tokio::sync::OnceCell;

pub mod error;
pub mod lookup_repo;
pub mod migrations;
pub mod request_repo;

pub use error::DatabaseError;

/// Thread-safe database handle wrapping a single rusqlite connection.
///
/// Cloning is cheap (inner `Arc`). All access is serialized through
/// a `Mutex`, which is fine for SQLite (which serializes writes anyway).
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens (or creates) the database at the given path and runs all
    /// pending migrations.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        migrations::run_all(&conn)?;

        log::info!("Database opened at {}", path.display());

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Opens an in-memory database. Runs all migrations.
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        migrations::run_all(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Provides locked access to the underlying connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&Connection) -> Result<T, DatabaseError>,
    {
        let conn = self.conn.lock().map_err(|_| DatabaseError::LockPoisoned)?;
        f(&conn)
    }

    /// Runs a blocking repository call on the tokio blocking pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&Database) -> Result<T, DatabaseError> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.clone();
        tokio::task::spawn_blocking(move || f(&db))
            .await
            .map_err(|e| DatabaseError::Task(e.to_string()))?
    }
}

/// Where the shared database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    Memory,
}

impl DatabaseLocation {
    fn open(&self) -> Result<Database, DatabaseError> {
        match self {
            DatabaseLocation::File(path) => Database::open(path),
            DatabaseLocation::Memory => Database::open_in_memory(),
        }
    }
}

/// Process-wide database handle that is opened on first use.
///
/// The first caller of [`SharedDatabase::get`] opens the database and runs
/// migrations; every later caller reuses the same handle. There is no
/// teardown: the connection lives as long as the last clone of the handle.
/// A failed open is not cached, so the next request tries again.
pub struct SharedDatabase {
    location: DatabaseLocation,
    cell: OnceCell<Database>,
}

impl SharedDatabase {
    pub fn new(location: DatabaseLocation) -> Self {
        Self {
            location,
            cell: OnceCell::new(),
        }
    }

    pub fn location(&self) -> &DatabaseLocation {
        &self.location
    }

    /// Whether the database has been opened yet.
    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }

    /// Returns the shared handle, opening the database on first call.
    pub async fn get(&self) -> Result<Database, DatabaseError> {
        let db = self
            .cell
            .get_or_try_init(|| async {
                let location = self.location.clone();
                tracing::info!(location = ?location, "Opening request store database");
                tokio::task::spawn_blocking(move || location.open())
                    .await
                    .map_err(|e| DatabaseError::Task(e.to_string()))?
            })
            .await?;
        Ok(db.clone())
    }
}

/// Returns the canonical database path: `~/.requisition/data/requisition.db`.
pub fn default_database_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".requisition").join("data").join("requisition.db"))
}
