//! SQL expression operators.
//!
//! These structs represent compound expressions like `col = ?1`,
//! `LOWER(col) LIKE LOWER(?2)`, etc. Each implements [`Expression`] and
//! recursively builds SQL fragments.

use crate::{
    expr::params::{BindValue, Params},
    traits::Expression,
};

/// Represents a binary comparison such as `=`.
pub struct BinaryOp<L> {
    left: L,
    op: &'static str,
    right: BindValue,
}

impl<L> BinaryOp<L> {
    pub fn new(left: L, op: &'static str, right: BindValue) -> Self {
        Self {
            left,
            op,
            right,
        }
    }
}

impl<L: Expression> Expression for BinaryOp<L> {
    fn to_sql(&self, params: &mut Params) -> String {
        let left_sql = self.left.to_sql(params);
        let placeholder = params.bind(self.right.clone());
        format!("{} {} {}", left_sql, self.op, placeholder)
    }
}

/// Escapes `LIKE` wildcards so the pattern only matches literally.
pub fn escape_like(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Represents a case-insensitive substring match.
pub struct LikeOp<L> {
    left: L,
    pattern: String,
}

impl<L> LikeOp<L> {
    pub const fn new(left: L, pattern: String) -> Self {
        Self {
            left,
            pattern,
        }
    }
}

impl<L: Expression> Expression for LikeOp<L> {
    fn to_sql(&self, params: &mut Params) -> String {
        let left_sql = self.left.to_sql(params);
        let placeholder = params.bind(format!("%{}%", escape_like(&self.pattern)));
        format!("LOWER({left_sql}) LIKE LOWER({placeholder}) ESCAPE '\\'")
    }
}

/// Represents an `IN` or `NOT IN` clause.
///
/// An empty value list renders as a constant: nothing is `IN ()` and
/// everything is `NOT IN ()`.
pub struct InOp<L> {
    left: L,
    values: Vec<BindValue>,
    negated: bool,
}

impl<L> InOp<L> {
    pub fn new(left: L, values: Vec<BindValue>, negated: bool) -> Self {
        Self {
            left,
            values,
            negated,
        }
    }
}

impl<L: Expression> Expression for InOp<L> {
    fn to_sql(&self, params: &mut Params) -> String {
        if self.values.is_empty() {
            let constant = if self.negated { "1" } else { "0" };
            return constant.to_string();
        }
        let left_sql = self.left.to_sql(params);
        let placeholders = self
            .values
            .iter()
            .map(|v| params.bind(v.clone()))
            .collect::<Vec<_>>()
            .join(", ");
        let op = if self.negated { "NOT IN" } else { "IN" };
        format!("{} {} ({})", left_sql, op, placeholders)
    }
}

/// Represents an `IS NULL` check.
pub struct NullOp<L> {
    left: L,
}

impl<L> NullOp<L> {
    pub fn new(left: L) -> Self {
        Self {
            left,
        }
    }
}

impl<L: Expression> Expression for NullOp<L> {
    fn to_sql(&self, params: &mut Params) -> String {
        format!("{} IS NULL", self.left.to_sql(params))
    }
}

/// Combines two expressions with `AND` or `OR`.
pub struct LogicalOp<L, R> {
    left: L,
    right: R,
    op: &'static str,
}

impl<L, R> LogicalOp<L, R> {
    pub fn new(left: L, right: R, op: &'static str) -> Self {
        Self {
            left,
            right,
            op,
        }
    }
}

impl<L: Expression, R: Expression> Expression for LogicalOp<L, R> {
    fn to_sql(&self, params: &mut Params) -> String {
        let left_sql = self.left.to_sql(params);
        let right_sql = self.right.to_sql(params);
        format!("({} {} {})", left_sql, self.op, right_sql)
    }
}

/// `OR` over any number of expressions. Empty renders as false.
#[derive(Default)]
pub struct AnyOf {
    exprs: Vec<Box<dyn Expression>>,
}

impl AnyOf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<E: Expression + 'static>(&mut self, expr: E) {
        self.exprs.push(Box::new(expr));
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}

impl Expression for AnyOf {
    fn to_sql(&self, params: &mut Params) -> String {
        match self.exprs.as_slice() {
            [] => "0".to_string(),
            [single] => single.to_sql(params),
            many => {
                let parts = many
                    .iter()
                    .map(|e| e.to_sql(params))
                    .collect::<Vec<_>>();
                format!("({})", parts.join(" OR "))
            }
        }
    }
}
