//! The trait that powers the query builder.

use crate::expr::{
    ops::{BinaryOp, InOp, LikeOp, LogicalOp, NullOp},
    params::{BindValue, Params},
};

/// A trait for types that can be rendered into SQL conditions.
///
/// This enables ergonomic query construction using operators like `.eq()`,
/// `.ilike()`, etc. Implementors include:
/// - [`crate::expr::Col`]: a table column
/// - [`BinaryOp`], [`LikeOp`], etc.: compound expressions
/// - [`crate::membership::MembershipPredicate`]: version visibility
///
/// When `to_sql` is called, it binds values through `params` and returns the
/// SQL fragment with numbered placeholders.
pub trait Expression {
    /// Renders this expression into a SQL fragment, binding its values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rpmlens_db::expr::{Col, Params};
    /// use rpmlens_db::traits::Expression as _;
    ///
    /// let col = Col::<String>::new("rp.name", "name");
    /// let expr = col.eq("penguin");
    /// let mut params = Params::new();
    /// assert_eq!(expr.to_sql(&mut params), "rp.name = ?1");
    /// ```
    fn to_sql(&self, params: &mut Params) -> String;

    /// Creates a SQL `=` condition.
    fn eq<T: Into<BindValue>>(self, value: T) -> BinaryOp<Self>
    where
        Self: Sized,
    {
        BinaryOp::new(self, "=", value.into())
    }

    /// Creates a case-insensitive substring match.
    ///
    /// `%` and `_` in `pattern` match themselves.
    fn ilike(self, pattern: impl Into<String>) -> LikeOp<Self>
    where
        Self: Sized,
    {
        LikeOp::new(self, pattern.into())
    }

    /// Creates a SQL `IN` condition.
    fn in_<T, I>(self, values: I) -> InOp<Self>
    where
        Self: Sized,
        T: Into<BindValue>,
        I: IntoIterator<Item = T>,
    {
        let values = values.into_iter().map(Into::into).collect();
        InOp::new(self, values, false)
    }

    /// Creates a SQL `NOT IN` condition.
    fn not_in<T, I>(self, values: I) -> InOp<Self>
    where
        Self: Sized,
        T: Into<BindValue>,
        I: IntoIterator<Item = T>,
    {
        let values = values.into_iter().map(Into::into).collect();
        InOp::new(self, values, true)
    }

    /// Creates a SQL `IS NULL` condition.
    fn null(self) -> NullOp<Self>
    where
        Self: Sized,
    {
        NullOp::new(self)
    }

    /// Combines two expressions with `AND`.
    fn and<E: Expression>(self, other: E) -> LogicalOp<Self, E>
    where
        Self: Sized,
    {
        LogicalOp::new(self, other, "AND")
    }

    /// Combines two expressions with `OR`.
    fn or<E: Expression>(self, other: E) -> LogicalOp<Self, E>
    where
        Self: Sized,
    {
        LogicalOp::new(self, other, "OR")
    }
}

impl<E: Expression + ?Sized> Expression for Box<E> {
    fn to_sql(&self, params: &mut Params) -> String {
        (**self).to_sql(params)
    }
}
