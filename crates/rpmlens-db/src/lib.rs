//! Content store access for rpmlens.
//!
//! Holds the SQLite connection pool, the embedded schema migrations, a small
//! SQL expression builder, the repository version membership logic and one
//! repository per content type.

pub mod connection;
pub mod entities;
pub mod error;
pub mod expr;
pub mod macros;
pub mod membership;
pub mod migration;
pub mod models;
pub mod query;
pub mod repository;
pub mod schema;
pub mod traits;

pub use connection::{
    DbPool, PoolOptions, DEFAULT_BUSY_TIMEOUT, DEFAULT_CONNECTION_TIMEOUT, DEFAULT_POOL_LIMIT,
};
pub use error::{DbError, Result};
pub use membership::{select_strategy, MembershipPredicate, Strategy, VersionRef};
pub use query::SelectQuery;
