//! The query builder.
//!
//! This module provides a typed interface for constructing the read queries
//! the content index runs, without manually concatenating strings and
//! placeholder lists. Filters are [`crate::traits::Expression`] values; each
//! one binds its own values through a shared [`crate::expr::Params`]
//! counter, so fragments built independently never collide.
//!
//! # Example
//!
//! ```ignore
//! use rpmlens_db::query::SelectQuery;
//!
//! let rows = SelectQuery::<PackageRow>::from(packages::TABLE)
//!     .select(&[packages::NAME, packages::VERSION])
//!     .filter(membership)
//!     .filter(packages::NAME.ilike("peng"))
//!     .order_by(packages::NAME, false)
//!     .limit(10)
//!     .fetch(conn)?;
//! ```
//!
//! # Submodules
//!
//! - [`clause`] - Clause helpers shared by the builder.
//! - [`select`] - Implementation of [`SelectQuery`].

pub mod clause;
pub mod select;

pub use select::{bind_params, SelectQuery};
