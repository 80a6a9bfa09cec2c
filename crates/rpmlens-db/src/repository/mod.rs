//! Repository pattern implementations for content queries.
//!
//! Each repository answers the read queries for one content type. All of them
//! take a [`crate::membership::MembershipPredicate`] that restricts rows to
//! the requested repository versions:
//!
//! - [`PackageRepository`] - package search and paginated listing
//! - [`GroupRepository`] - package groups and environments
//! - [`ModuleRepository`] - module streams
//! - [`ErrataRepository`] - advisories
//! - [`VersionRepository`] - repository version lookups

pub mod errata;
pub mod group;
pub mod module;
pub mod package;
pub mod version;

pub use errata::{ErrataQuery, ErrataRepository, ErrataSortField};
pub use group::GroupRepository;
pub use module::{ModuleQuery, ModuleRepository};
pub use package::{PackageListQuery, PackageRepository, PackageSortField};
pub use version::VersionRepository;

/// Sort direction for queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn is_desc(self) -> bool {
        self == SortDirection::Desc
    }
}
