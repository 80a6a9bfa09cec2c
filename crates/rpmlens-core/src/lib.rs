//! Version-scoped content queries for RPM repositories.
//!
//! [`ContentIndex`] is the entry point. Every operation takes a list of
//! repository version references, resolves which content units are visible
//! in those versions and returns the matching packages, groups,
//! environments, module streams or advisories.

pub mod error;
pub mod index;
pub mod merge;
pub mod options;
pub mod reference;
pub mod sync;

pub use error::{CoreError, CoreResult};
pub use index::ContentIndex;
