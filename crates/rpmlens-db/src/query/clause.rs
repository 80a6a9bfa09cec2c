//! Internal representation of query clauses.
//!
//! These types are used internally by the [`super::SelectQuery`] builder and are not part of the public API.

use crate::expr::Params;

/// A WHERE clause represented as a closure that generates SQL and binds parameters.
///
/// The closure can run more than once, so one filter serves both the page
/// query and its count query.
pub(crate) struct WhereClause {
    pub sql_fn: Box<dyn Fn(&mut Params) -> String>,
}

/// An ORDER BY clause.
pub(crate) struct OrderClause {
    pub expr: String,
    pub desc: bool,
}
