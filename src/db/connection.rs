//! Database connection management
//!
//! SQLite connection pool shared by the catalog and the MCP tools.

use std::path::Path;
use std::sync::Arc;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

use super::migrations;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Corrupt catalog row: {0}")]
    CorruptRow(String),
}

pub type DbResult<T> = Result<T, DbError>;

type Conn = PooledConnection<SqliteConnectionManager>;

fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA temp_store = MEMORY;
         PRAGMA busy_timeout = 5000;",
    )
}

/// Pooled handle to the catalog database
#[derive(Clone)]
pub struct Database {
    pool: Arc<Pool<SqliteConnectionManager>>,
}

impl Database {
    /// Open (or create) the database file with up to `pool_size` connections
    pub fn new<P: AsRef<Path>>(path: P, pool_size: u32) -> DbResult<Self> {
        let manager = SqliteConnectionManager::file(path)
            .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE)
            .with_init(init_connection);
        Self::from_manager(manager, pool_size)
    }

    /// Open the database file and bring its schema up to date
    pub fn open_migrated<P: AsRef<Path>>(path: P, pool_size: u32) -> DbResult<Self> {
        let database = Self::new(path, pool_size)?;
        database.with_conn(migrations::run_migrations)?;
        Ok(database)
    }

    /// Migrated private in-memory catalog. Single connection, since every
    /// SQLite memory connection is its own database.
    pub fn in_memory() -> DbResult<Self> {
        let database = Self::from_manager(SqliteConnectionManager::memory(), 1)?;
        database.with_conn(migrations::run_migrations)?;
        Ok(database)
    }

    fn from_manager(manager: SqliteConnectionManager, pool_size: u32) -> DbResult<Self> {
        let pool = Pool::builder().max_size(pool_size.max(1)).build(manager)?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    fn conn(&self) -> DbResult<Conn> {
        Ok(self.pool.get()?)
    }

    /// Execute a closure with a pooled connection
    pub fn with_conn<F, T>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        let conn = self.conn()?;
        f(&conn)
    }

    /// Execute a closure with a mutable connection (for transactions)
    pub fn with_conn_mut<F, T>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&mut Connection) -> DbResult<T>,
    {
        let mut conn = self.conn()?;
        f(&mut conn)
    }
}
