//! Indexed parameter collection.
//!
//! Fragments never write a bare `?`. Each bound value gets a numbered
//! placeholder (`?1`, `?2`, ...) from a counter shared by the whole statement,
//! so independently built fragments can be combined without clashing and the
//! rendered SQL is the same every time for the same inputs.

/// A value bound to a numbered placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Text(String),
    Integer(i64),
}

impl From<String> for BindValue {
    fn from(value: String) -> Self {
        BindValue::Text(value)
    }
}

impl From<&str> for BindValue {
    fn from(value: &str) -> Self {
        BindValue::Text(value.to_string())
    }
}

impl From<&String> for BindValue {
    fn from(value: &String) -> Self {
        BindValue::Text(value.clone())
    }
}

impl From<i64> for BindValue {
    fn from(value: i64) -> Self {
        BindValue::Integer(value)
    }
}

/// Ordered list of bound values for one statement.
#[derive(Debug, Default, Clone)]
pub struct Params {
    values: Vec<BindValue>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `value` and returns the placeholder that refers to it.
    ///
    /// The returned placeholder may be repeated inside a fragment to reuse the
    /// same value.
    pub fn bind(&mut self, value: impl Into<BindValue>) -> String {
        self.values.push(value.into());
        format!("?{}", self.values.len())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[BindValue] {
        &self.values
    }

    pub fn into_values(self) -> Vec<BindValue> {
        self.values
    }
}
