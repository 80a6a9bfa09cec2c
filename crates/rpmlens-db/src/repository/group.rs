//! Package group and environment queries.
//!
//! Both return one row per physical occurrence. Occurrences of the same
//! `(name, id)` contributed by different versions are merged by the caller.

use diesel::{prelude::*, sql_types::Text};
use tracing::trace;

use crate::{
    entities::{environments, package_groups},
    membership::MembershipPredicate,
    models::{
        types::{group_package_names, string_list},
        EnvironmentItem, PackageGroupItem,
    },
    query::SelectQuery,
    traits::Expression,
};

#[derive(Debug, QueryableByName)]
struct GroupRow {
    #[diesel(sql_type = Text)]
    id: String,
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = Text)]
    description: String,
    #[diesel(sql_type = Text)]
    packages: String,
}

#[derive(Debug, QueryableByName)]
struct EnvironmentRow {
    #[diesel(sql_type = Text)]
    id: String,
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = Text)]
    description: String,
    #[diesel(sql_type = Text)]
    group_ids: String,
}

/// Repository for package groups and environments.
pub struct GroupRepository;

impl GroupRepository {
    /// Finds visible package groups whose name contains `search`.
    ///
    /// Rows are ordered by name, id and content id.
    pub fn search_groups(
        conn: &mut SqliteConnection,
        membership: MembershipPredicate,
        search: &str,
    ) -> QueryResult<Vec<PackageGroupItem>> {
        let rows = SelectQuery::<GroupRow>::from(package_groups::TABLE)
            .select(&[
                package_groups::ID,
                package_groups::NAME,
                package_groups::DESCRIPTION,
                package_groups::PACKAGES,
            ])
            .filter(membership)
            .filter(package_groups::NAME.ilike(search))
            .order_by(package_groups::NAME, false)
            .order_by(package_groups::ID, false)
            .order_by(package_groups::CONTENT_ID, false)
            .fetch(conn)?;

        trace!(rows = rows.len(), "package group search");

        Ok(rows
            .into_iter()
            .map(|row| {
                PackageGroupItem {
                    packages: group_package_names(&row.packages),
                    id: row.id,
                    name: row.name,
                    description: row.description,
                }
            })
            .collect())
    }

    /// Finds visible environments whose name contains `search`.
    pub fn search_environments(
        conn: &mut SqliteConnection,
        membership: MembershipPredicate,
        search: &str,
    ) -> QueryResult<Vec<EnvironmentItem>> {
        let rows = SelectQuery::<EnvironmentRow>::from(environments::TABLE)
            .select(&[
                environments::ID,
                environments::NAME,
                environments::DESCRIPTION,
                environments::GROUP_IDS,
            ])
            .filter(membership)
            .filter(environments::NAME.ilike(search))
            .order_by(environments::NAME, false)
            .order_by(environments::ID, false)
            .order_by(environments::CONTENT_ID, false)
            .fetch(conn)?;

        trace!(rows = rows.len(), "environment search");

        Ok(rows
            .into_iter()
            .map(|row| {
                EnvironmentItem {
                    groups: string_list(&row.group_ids),
                    id: row.id,
                    name: row.name,
                    description: row.description,
                }
            })
            .collect())
    }
}
