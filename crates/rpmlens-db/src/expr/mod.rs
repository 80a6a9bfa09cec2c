//! Expression types for building SQL conditions.
//!
//! This module contains the building blocks of query filters.

pub mod column;
pub mod ops;
pub mod params;

pub use column::Col;
pub use ops::{escape_like, AnyOf};
pub use params::{BindValue, Params};
