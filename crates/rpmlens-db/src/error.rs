//! Error types for rpmlens-db.

use miette::Diagnostic;
use thiserror::Error;

/// Database error type for rpmlens-db operations.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Content store unavailable: {0}")]
    #[diagnostic(
        code(rpmlens_db::store_unavailable),
        help("Check that the database path is correct and the pool limit is large enough")
    )]
    StoreUnavailable(String),

    #[error("Query execution failed: {0}")]
    #[diagnostic(
        code(rpmlens_db::query),
        help("The content store may be missing tables; check that migrations were applied")
    )]
    QueryExecution(String),

    #[error("Database migration failed: {0}")]
    #[diagnostic(
        code(rpmlens_db::migration),
        help("The database schema may be corrupted. Try pointing rpmlens at a fresh database.")
    )]
    Migration(String),
}

impl From<diesel::result::Error> for DbError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::DatabaseError(_, info) => {
                DbError::QueryExecution(info.message().to_string())
            }
            other => DbError::QueryExecution(other.to_string()),
        }
    }
}

impl From<diesel::result::ConnectionError> for DbError {
    fn from(err: diesel::result::ConnectionError) -> Self {
        DbError::StoreUnavailable(err.to_string())
    }
}

impl From<diesel::r2d2::PoolError> for DbError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        DbError::StoreUnavailable(err.to_string())
    }
}

/// Result type alias for rpmlens-db operations.
pub type Result<T> = std::result::Result<T, DbError>;
