//! Represents a typed database column.
//!
//! `Col<T>` ties a qualified column reference to a Rust type `T`. It
//! implements [`Expression`], so it can be used directly in filters.

use std::marker::PhantomData;

use crate::{expr::params::Params, traits::Expression};

/// A typed reference to a database column.
///
/// The type parameter `T` indicates the expected Rust type when reading this
/// column, though it is not enforced at runtime.
///
/// # Example
///
/// ```rust
/// use rpmlens_db::expr::Col;
/// const NAME: Col<String> = Col::new("rp.name", "name");
/// ```
pub struct Col<T> {
    /// Reference used in expressions, usually `alias.column`.
    pub name: &'static str,
    /// Bare column name, used as the result alias.
    pub column: &'static str,
    pub is_json: bool,
    _type: PhantomData<T>,
}

// Derived impls would demand `T: Copy`.
impl<T> Clone for Col<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Col<T> {}

impl<T> Col<T> {
    /// Creates a new column reference.
    pub const fn new(name: &'static str, column: &'static str) -> Self {
        Self {
            name,
            column,
            is_json: false,
            _type: PhantomData,
        }
    }

    /// Mark this column as JSON for proper SELECT handling
    pub const fn json(name: &'static str, column: &'static str) -> Self {
        Self {
            name,
            column,
            is_json: true,
            _type: PhantomData,
        }
    }

    /// Get the select expression for this column
    pub fn select_expr(&self) -> String {
        if self.is_json {
            format!("json({}) AS {}", self.name, self.column)
        } else if self.name == self.column {
            self.name.to_string()
        } else {
            format!("{} AS {}", self.name, self.column)
        }
    }
}

impl<T> Expression for Col<T> {
    fn to_sql(&self, _params: &mut Params) -> String {
        self.name.to_string()
    }
}
