//! Filter, sort and page options of the content operations.

use rpmlens_db::repository::{ErrataSortField, PackageSortField, SortDirection};
use serde::{Deserialize, Serialize};

/// Result size used when a caller passes a limit of 0.
pub const DEFAULT_LIMIT: i64 = 500;

/// Replaces a non-positive limit with [`DEFAULT_LIMIT`].
pub fn effective_limit(limit: i64) -> i64 {
    if limit <= 0 {
        DEFAULT_LIMIT
    } else {
        limit
    }
}

/// Pagination and ordering of a listing.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PageOptions {
    pub offset: i64,
    /// Page size; 0 selects [`DEFAULT_LIMIT`].
    pub limit: i64,
    /// `field:direction`, e.g. `issued_date:asc`.
    pub sort_by: Option<String>,
}

impl PageOptions {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset,
            limit,
            sort_by: None,
        }
    }

    pub fn with_sort(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    pub fn offset(&self) -> i64 {
        self.offset.max(0)
    }

    pub fn limit(&self) -> i64 {
        effective_limit(self.limit)
    }

    fn sort_parts(&self) -> (&str, Option<&str>) {
        let sort_by = self.sort_by.as_deref().unwrap_or_default().trim();
        match sort_by.split_once(':') {
            Some((field, direction)) => (field.trim(), Some(direction.trim())),
            None => (sort_by, None),
        }
    }

    /// Package sort key. Unknown fields sort by name; the direction defaults
    /// to ascending.
    pub fn package_sort(&self) -> (PackageSortField, SortDirection) {
        let (field, direction) = self.sort_parts();
        let field = PackageSortField::parse(field).unwrap_or_default();
        let direction = match direction {
            Some(d) if d.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        (field, direction)
    }

    /// Advisory sort key. Unknown fields sort by issue date; the direction
    /// is descending unless `asc` is given.
    pub fn errata_sort(&self) -> (ErrataSortField, SortDirection) {
        let (field, direction) = self.sort_parts();
        let field = ErrataSortField::parse(field).unwrap_or_default();
        let direction = match direction {
            Some(d) if d.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        };
        (field, direction)
    }
}

/// Direction of a module stream listing: descending when any word of
/// `sort_by` is `desc`, ascending otherwise.
pub fn module_sort_direction(sort_by: &str) -> SortDirection {
    let desc = sort_by
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|token| token.eq_ignore_ascii_case("desc"));
    if desc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    }
}

/// Filters of a package listing.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PackageListFilters {
    /// Case-insensitive substring of the package name.
    pub name: String,
}

/// Filters of a module stream listing.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModuleStreamFilters {
    /// Keep streams providing at least one of these package names.
    pub rpm_names: Vec<String>,
    /// Case-insensitive substring of the module name.
    pub search: String,
}

/// Filters of an advisory listing.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ErrataFilters {
    /// Case-insensitive substring of the advisory id or summary.
    pub search: String,
    /// Exact types; `other` matches anything outside the known types.
    pub types: Vec<String>,
    /// Exact severities; `Unknown` matches anything outside the known severities.
    pub severities: Vec<String>,
}
