//! Database connection management.
//!
//! Every operation borrows one pooled connection for its whole duration
//! through [`DbPool::with_conn`]. The connection goes back to the pool when the
//! closure returns, whether it succeeded or not.

use std::{path::Path, time::Duration};

use diesel::{
    connection::SimpleConnection,
    r2d2::{ConnectionManager, CustomizeConnection, Pool},
    SqliteConnection,
};
use tracing::{debug, trace};

use crate::{
    error::{DbError, Result},
    migration::apply_migrations,
};

/// Maximum number of pooled connections when none is configured.
pub const DEFAULT_POOL_LIMIT: u32 = 20;
/// How long a caller waits for a pooled connection when none is configured.
pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);
/// How long SQLite waits on a locked database when none is configured.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Tuning knobs for the connection pool.
#[derive(Debug, Clone)]
pub struct PoolOptions {
    /// Upper bound on open connections.
    pub max_size: u32,
    /// How long a caller waits for a free connection before giving up.
    pub connection_timeout: Duration,
    /// How long SQLite waits on a locked database before failing a statement.
    pub busy_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_POOL_LIMIT,
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

/// Applies per-connection pragmas whenever the pool opens a new connection.
#[derive(Debug)]
struct SqlitePragmas {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), diesel::r2d2::Error> {
        // busy_timeout first so the journal mode switch waits on concurrent opens
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA journal_mode = WAL; PRAGMA foreign_keys = ON;",
            self.busy_timeout.as_millis()
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Shared pool of SQLite connections to the content store.
///
/// Cloning is cheap; clones share the same underlying pool.
#[derive(Clone)]
pub struct DbPool {
    pool: Pool<ConnectionManager<SqliteConnection>>,
}

impl DbPool {
    /// Opens a pool against the SQLite database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::StoreUnavailable`] if the initial connections cannot
    /// be established within the configured timeout.
    pub fn open<P: AsRef<Path>>(path: P, options: &PoolOptions) -> Result<Self> {
        let url = path.as_ref().to_string_lossy().into_owned();
        debug!(
            path = url,
            max_size = options.max_size,
            "opening content store pool"
        );

        let max_size = if options.max_size == 0 {
            DEFAULT_POOL_LIMIT
        } else {
            options.max_size
        };

        let pool = Pool::builder()
            .max_size(max_size)
            .connection_timeout(options.connection_timeout)
            .connection_customizer(Box::new(SqlitePragmas {
                busy_timeout: options.busy_timeout,
            }))
            .build(ConnectionManager::<SqliteConnection>::new(url))?;

        Ok(Self {
            pool,
        })
    }

    /// Opens a pool and brings the schema up to date.
    pub fn open_and_migrate<P: AsRef<Path>>(path: P, options: &PoolOptions) -> Result<Self> {
        let pool = Self::open(path, options)?;
        pool.with_conn(|conn| apply_migrations(conn).map(|_| ()))?;
        Ok(pool)
    }

    /// Runs `f` with a pooled connection.
    ///
    /// The connection is checked out before `f` runs and returned to the pool
    /// when this function returns, on success and on error alike.
    pub fn with_conn<T, E, F>(&self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut SqliteConnection) -> std::result::Result<T, E>,
        E: From<DbError>,
    {
        let mut conn = self.pool.get().map_err(DbError::from)?;
        trace!(
            idle = self.pool.state().idle_connections,
            "acquired pooled connection"
        );
        f(&mut conn)
    }

    /// Number of connections currently open and how many of them are idle.
    pub fn status(&self) -> (u32, u32) {
        let state = self.pool.state();
        (state.connections, state.idle_connections)
    }
}
