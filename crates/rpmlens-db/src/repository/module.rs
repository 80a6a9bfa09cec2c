//! Module stream queries.
//!
//! Several versions can contribute different builds of the same
//! `(name, stream)`. The one kept is the build with the highest module
//! version; equal versions fall back to the lowest content id.

use diesel::{prelude::*, sql_types::Text};
use tracing::trace;

use super::SortDirection;
use crate::{
    entities::modules,
    expr::{Col, Params},
    membership::MembershipPredicate,
    models::{types::string_list, ModuleStreamItem},
    query::SelectQuery,
    traits::Expression,
};

const PACKAGE_NAME: Col<String> = Col::new("p.name", "name");
const STREAM_RANK: Col<i64> = Col::new("ms.stream_rank", "stream_rank");

/// Matches module streams providing at least one package with one of `names`.
struct ProvidesAnyPackage {
    names: Vec<String>,
}

impl Expression for ProvidesAnyPackage {
    fn to_sql(&self, params: &mut Params) -> String {
        let names = PACKAGE_NAME.in_(self.names.clone()).to_sql(params);
        format!(
            "EXISTS (SELECT 1 FROM rpm_modulemd_packages mp \
             INNER JOIN rpm_package p ON p.content_ptr_id = mp.package_id \
             WHERE mp.modulemd_id = {} AND {})",
            modules::CONTENT_ID.name,
            names
        )
    }
}

#[derive(Debug, QueryableByName)]
struct ModuleStreamRow {
    #[diesel(sql_type = Text)]
    content_ptr_id: String,
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = Text)]
    stream: String,
    #[diesel(sql_type = Text)]
    version: String,
    #[diesel(sql_type = Text)]
    context: String,
    #[diesel(sql_type = Text)]
    arch: String,
    #[diesel(sql_type = Text)]
    description: String,
    #[diesel(sql_type = Text)]
    packages: String,
}

impl From<ModuleStreamRow> for ModuleStreamItem {
    fn from(row: ModuleStreamRow) -> Self {
        let mut packages = string_list(&row.packages);
        packages.sort();
        packages.dedup();

        Self {
            content_id: row.content_ptr_id,
            name: row.name,
            stream: row.stream,
            version: row.version,
            context: row.context,
            arch: row.arch,
            description: row.description,
            packages,
        }
    }
}

/// Filters and ordering of a module stream listing.
#[derive(Debug, Clone, Default)]
pub struct ModuleQuery<'a> {
    /// Case-insensitive substring of the module name.
    pub search: Option<&'a str>,
    /// Keep only streams providing at least one of these package names.
    pub rpm_names: &'a [String],
    pub direction: SortDirection,
}

/// Repository for module streams.
pub struct ModuleRepository;

impl ModuleRepository {
    /// Lists visible module streams, one per `(name, stream)`.
    ///
    /// Ordered by name in the requested direction, then stream and version
    /// ascending.
    pub fn list(
        conn: &mut SqliteConnection,
        membership: MembershipPredicate,
        query: &ModuleQuery<'_>,
    ) -> QueryResult<Vec<ModuleStreamItem>> {
        let mut ranked = SelectQuery::<()>::from(modules::TABLE)
            .select(&[
                modules::CONTENT_ID,
                modules::NAME,
                modules::STREAM,
                modules::VERSION,
                modules::CONTEXT,
                modules::ARCH,
                modules::DESCRIPTION,
            ])
            .select_raw(format!(
                "(SELECT json_group_array(p.name) FROM rpm_modulemd_packages mp \
                 INNER JOIN rpm_package p ON p.content_ptr_id = mp.package_id \
                 WHERE mp.modulemd_id = {}) AS packages",
                modules::CONTENT_ID.name
            ))
            .select_raw(format!(
                "ROW_NUMBER() OVER (PARTITION BY {}, {} ORDER BY CAST({} AS INTEGER) DESC, {} ASC) AS stream_rank",
                modules::NAME.name,
                modules::STREAM.name,
                modules::VERSION.name,
                modules::CONTENT_ID.name
            ))
            .filter(membership);

        if let Some(search) = query.search.filter(|s| !s.is_empty()) {
            ranked = ranked.filter(modules::NAME.ilike(search));
        }

        if !query.rpm_names.is_empty() {
            ranked = ranked.filter(ProvidesAnyPackage {
                names: query.rpm_names.to_vec(),
            });
        }

        let rows = SelectQuery::<ModuleStreamRow>::from_subquery(ranked, "ms")
            .filter(STREAM_RANK.eq(1_i64))
            .order_by_raw("ms.name", query.direction.is_desc())
            .order_by_raw("ms.stream", false)
            .order_by_raw("CAST(ms.version AS INTEGER)", false)
            .fetch(conn)?;

        trace!(rows = rows.len(), "module stream list");

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
