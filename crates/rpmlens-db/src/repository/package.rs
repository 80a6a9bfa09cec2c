//! Package queries.

use diesel::{prelude::*, sql_types::Text};
use tracing::trace;

use super::SortDirection;
use crate::{
    entities::packages,
    membership::MembershipPredicate,
    models::{PackageListItem, PackageSearchItem},
    query::SelectQuery,
    traits::Expression,
};

/// Helper struct for rows of the distinct-name search.
#[derive(Debug, QueryableByName)]
struct PackageNameRow {
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = Text)]
    summary: String,
}

#[derive(Debug, QueryableByName)]
struct PackageRow {
    #[diesel(sql_type = Text)]
    content_ptr_id: String,
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = Text)]
    epoch: String,
    #[diesel(sql_type = Text)]
    version: String,
    #[diesel(sql_type = Text)]
    release: String,
    #[diesel(sql_type = Text)]
    arch: String,
    #[diesel(sql_type = Text)]
    summary: String,
}

impl From<PackageRow> for PackageListItem {
    fn from(row: PackageRow) -> Self {
        Self {
            content_id: row.content_ptr_id,
            name: row.name,
            epoch: row.epoch,
            version: row.version,
            release: row.release,
            arch: row.arch,
            summary: row.summary,
        }
    }
}

/// Field a package listing can be sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageSortField {
    #[default]
    Name,
    Version,
    Release,
    Arch,
}

impl PackageSortField {
    /// Parses a field name; anything unrecognized yields `None`.
    pub fn parse(field: &str) -> Option<Self> {
        match field.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "version" => Some(Self::Version),
            "release" => Some(Self::Release),
            "arch" => Some(Self::Arch),
            _ => None,
        }
    }
}

/// Filters, ordering and page bounds of a package listing.
#[derive(Debug, Clone, Default)]
pub struct PackageListQuery<'a> {
    pub name: Option<&'a str>,
    pub sort_field: PackageSortField,
    pub direction: SortDirection,
    pub offset: i64,
    pub limit: i64,
}

/// Repository for package content.
pub struct PackageRepository;

impl PackageRepository {
    /// Searches visible packages by name, one row per distinct name.
    ///
    /// The summary comes from the occurrence with the lowest content id.
    pub fn search(
        conn: &mut SqliteConnection,
        membership: MembershipPredicate,
        search: &str,
        limit: i64,
    ) -> QueryResult<Vec<PackageSearchItem>> {
        let rows = SelectQuery::<PackageNameRow>::from(packages::TABLE)
            .select(&[packages::NAME, packages::SUMMARY])
            .select_raw(format!("MIN({}) AS content_id", packages::CONTENT_ID.name))
            .filter(membership)
            .filter(packages::NAME.ilike(search))
            .group_by(packages::NAME)
            .order_by(packages::NAME, false)
            .limit(limit)
            .fetch(conn)?;

        trace!(rows = rows.len(), "package search");

        Ok(rows
            .into_iter()
            .map(|row| {
                PackageSearchItem {
                    name: row.name,
                    summary: row.summary,
                }
            })
            .collect())
    }

    /// Lists visible package units with a total that ignores pagination.
    ///
    /// Rows are ordered by the requested field first, then by name, version,
    /// release and arch ascending.
    pub fn list(
        conn: &mut SqliteConnection,
        membership: MembershipPredicate,
        query: &PackageListQuery<'_>,
    ) -> QueryResult<(Vec<PackageListItem>, i64)> {
        let mut select = SelectQuery::<PackageRow>::from(packages::TABLE)
            .select(&[
                packages::CONTENT_ID,
                packages::NAME,
                packages::EPOCH,
                packages::VERSION,
                packages::RELEASE,
                packages::ARCH,
                packages::SUMMARY,
            ])
            .filter(membership);

        if let Some(name) = query.name.filter(|n| !n.is_empty()) {
            select = select.filter(packages::NAME.ilike(name));
        }

        let total = select.count(conn)?;

        let sort_col = match query.sort_field {
            PackageSortField::Name => packages::NAME,
            PackageSortField::Version => packages::VERSION,
            PackageSortField::Release => packages::RELEASE,
            PackageSortField::Arch => packages::ARCH,
        };

        let rows = select
            .order_by(sort_col, query.direction.is_desc())
            .order_by(packages::NAME, false)
            .order_by(packages::VERSION, false)
            .order_by(packages::RELEASE, false)
            .order_by(packages::ARCH, false)
            .order_by(packages::CONTENT_ID, false)
            .limit(query.limit)
            .offset(query.offset)
            .fetch(conn)?;

        trace!(rows = rows.len(), total, "package list");

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }
}
