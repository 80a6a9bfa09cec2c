//! The main query builder implementation.

use std::marker::PhantomData;

use diesel::{
    query_builder::{BoxedSqlQuery, SqlQuery},
    sql_types::{BigInt, Text},
    sqlite::Sqlite,
    QueryResult, QueryableByName, RunQueryDsl, SqliteConnection,
};
use tracing::trace;

use crate::{
    expr::{column::Col, BindValue, Params},
    query::clause::{OrderClause, WhereClause},
    traits::Expression,
};

/// Row shape of every count query.
#[derive(Debug, QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    total: i64,
}

/// Attaches `params` to `sql` in placeholder order.
pub fn bind_params(sql: String, params: Params) -> BoxedSqlQuery<'static, Sqlite, SqlQuery> {
    let mut query = diesel::sql_query(sql).into_boxed::<Sqlite>();
    for value in params.into_values() {
        query = match value {
            BindValue::Text(v) => query.bind::<Text, _>(v),
            BindValue::Integer(v) => query.bind::<BigInt, _>(v),
        };
    }
    query
}

enum Source {
    Table(&'static str),
    Subquery {
        inner: Box<SelectQuery<()>>,
        alias: &'static str,
    },
}

/// An ergonomic SQL query builder for SQLite.
///
/// Constructed via [`SelectQuery::from`], then chained with `.filter()`,
/// `.order_by()`, etc. Rendering produces SQL with numbered placeholders and
/// the matching [`Params`]; [`SelectQuery::fetch`] and [`SelectQuery::count`]
/// run it through diesel.
///
/// # Type Parameters
///
/// - `E`: the row type (must implement [`QueryableByName`] to be fetched)
///
/// # Example
///
/// ```rust
/// use rpmlens_db::{define_entity, SelectQuery};
/// use rpmlens_db::traits::Expression as _;
///
/// define_entity!(
///     packages {
///         table: "rpm_package",
///         alias: "rp",
///         columns: {
///             NAME: String => "name"
///         }
///     }
/// );
///
/// let (sql, params) = SelectQuery::<()>::from(packages::TABLE)
///     .select(&[packages::NAME])
///     .filter(packages::NAME.ilike("peng"))
///     .order_by(packages::NAME, false)
///     .limit(10)
///     .build_sql();
///
/// assert_eq!(
///     sql,
///     "SELECT rp.name AS name FROM rpm_package rp \
///      WHERE LOWER(rp.name) LIKE LOWER(?1) ESCAPE '\\' ORDER BY rp.name ASC LIMIT 10"
/// );
/// assert_eq!(params.len(), 1);
/// ```
pub struct SelectQuery<E> {
    source: Source,
    columns: Vec<String>,
    joins: Vec<String>,
    wheres: Vec<WhereClause>,
    group_by: Vec<String>,
    orders: Vec<OrderClause>,
    limit: Option<i64>,
    offset: Option<i64>,
    _entity: PhantomData<E>,
}

impl<E> SelectQuery<E> {
    /// Starts a new query on the given table (optionally followed by an alias).
    pub fn from(table: &'static str) -> Self {
        Self::with_source(Source::Table(table))
    }

    /// Starts a new query that reads from the rows of `inner`.
    pub fn from_subquery<I>(inner: SelectQuery<I>, alias: &'static str) -> Self {
        Self::with_source(Source::Subquery {
            inner: Box::new(inner.untyped()),
            alias,
        })
    }

    fn with_source(source: Source) -> Self {
        Self {
            source,
            columns: vec![],
            joins: vec![],
            wheres: vec![],
            group_by: vec![],
            orders: vec![],
            limit: None,
            offset: None,
            _entity: PhantomData,
        }
    }

    fn untyped(self) -> SelectQuery<()> {
        SelectQuery {
            source: self.source,
            columns: self.columns,
            joins: self.joins,
            wheres: self.wheres,
            group_by: self.group_by,
            orders: self.orders,
            limit: self.limit,
            offset: self.offset,
            _entity: PhantomData,
        }
    }

    /// Select specific columns from the table.
    pub fn select<T>(mut self, cols: &[Col<T>]) -> Self {
        self.columns.extend(cols.iter().map(|c| c.select_expr()));
        self
    }

    /// Select a computed expression, e.g. `MIN(rp.content_ptr_id) AS content_id`.
    pub fn select_raw(mut self, expr: impl Into<String>) -> Self {
        self.columns.push(expr.into());
        self
    }

    /// Adds a JOIN clause.
    pub fn join(mut self, join: impl Into<String>) -> Self {
        self.joins.push(join.into());
        self
    }

    /// Applies the WHERE condition.
    pub fn filter<Expr: Expression + 'static>(mut self, expr: Expr) -> Self {
        self.wheres.push(WhereClause {
            sql_fn: Box::new(move |params| expr.to_sql(params)),
        });
        self
    }

    /// Adds a GROUP BY key.
    pub fn group_by<T>(mut self, col: Col<T>) -> Self {
        self.group_by.push(col.name.to_string());
        self
    }

    /// Adds an ORDER BY clause.
    pub fn order_by<T>(mut self, col: Col<T>, desc: bool) -> Self {
        self.orders.push(OrderClause {
            expr: col.name.to_string(),
            desc,
        });
        self
    }

    /// Adds an ORDER BY clause on a computed expression.
    pub fn order_by_raw(mut self, expr: impl Into<String>, desc: bool) -> Self {
        self.orders.push(OrderClause {
            expr: expr.into(),
            desc,
        });
        self
    }

    /// Limit the number of results
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set query offset
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Renders the page query.
    pub fn build_sql(&self) -> (String, Params) {
        let mut params = Params::new();
        let sql = self.render(&mut params);
        (sql, params)
    }

    /// Renders a query counting the rows the page query would return without
    /// its ORDER BY, LIMIT and OFFSET.
    pub fn build_count_sql(&self) -> (String, Params) {
        let mut params = Params::new();
        let body = self.render_body(&mut params);
        let sql = if self.group_by.is_empty() {
            format!("SELECT COUNT(*) AS total {body}")
        } else {
            format!("SELECT COUNT(*) AS total FROM (SELECT 1 {body})")
        };
        (sql, params)
    }

    fn render(&self, params: &mut Params) -> String {
        let select = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(", ")
        };

        let mut sql = format!("SELECT {} {}", select, self.render_body(params));

        if !self.orders.is_empty() {
            sql.push_str(" ORDER BY ");
            let orders = self
                .orders
                .iter()
                .map(|o| format!("{} {}", o.expr, if o.desc { "DESC" } else { "ASC" }))
                .collect::<Vec<_>>();
            sql.push_str(&orders.join(", "));
        }

        match (self.limit, self.offset) {
            (Some(limit), Some(offset)) => {
                sql.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset))
            }
            (Some(limit), None) => sql.push_str(&format!(" LIMIT {}", limit)),
            (None, Some(offset)) => sql.push_str(&format!(" LIMIT -1 OFFSET {}", offset)),
            (None, None) => {}
        }

        sql
    }

    fn render_body(&self, params: &mut Params) -> String {
        let mut sql = match &self.source {
            Source::Table(table) => format!("FROM {}", table),
            Source::Subquery {
                inner,
                alias,
            } => format!("FROM ({}) {}", inner.render(params), alias),
        };

        for join in &self.joins {
            sql.push_str(&format!(" {}", join));
        }

        if !self.wheres.is_empty() {
            sql.push_str(" WHERE ");
            let conditions = self
                .wheres
                .iter()
                .map(|w| (w.sql_fn)(params))
                .collect::<Vec<_>>();
            sql.push_str(&conditions.join(" AND "));
        }

        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by.join(", "));
        }

        sql
    }

    /// Counts matching rows, ignoring ordering and pagination.
    pub fn count(&self, conn: &mut SqliteConnection) -> QueryResult<i64> {
        let (sql, params) = self.build_count_sql();
        trace!(sql = sql.as_str(), binds = params.len(), "executing count");
        bind_params(sql, params)
            .get_result::<CountRow>(conn)
            .map(|row| row.total)
    }
}

impl<E: QueryableByName<Sqlite> + 'static> SelectQuery<E> {
    pub fn fetch(&self, conn: &mut SqliteConnection) -> QueryResult<Vec<E>> {
        let (sql, params) = self.build_sql();
        trace!(sql = sql.as_str(), binds = params.len(), "executing select");
        bind_params(sql, params).load::<E>(conn)
    }
}
