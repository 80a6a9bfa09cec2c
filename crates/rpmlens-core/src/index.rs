//! The content query operations.

use std::path::Path;

use rpmlens_config::config::Config;
use rpmlens_db::{
    entities::{environments, errata, modules, package_groups, packages},
    models::{
        EnvironmentItem, ErrataItem, ModuleStreamItem, PackageGroupItem, PackageListItem,
        PackageSearchItem,
    },
    repository::{
        ErrataQuery, ErrataRepository, GroupRepository, ModuleQuery, ModuleRepository,
        PackageListQuery, PackageRepository,
    },
    DbPool, MembershipPredicate, PoolOptions,
};
use tracing::debug;

use crate::{
    error::{CoreError, CoreResult},
    merge::merge_distinct,
    options::{
        effective_limit, module_sort_direction, ErrataFilters, ModuleStreamFilters,
        PackageListFilters, PageOptions,
    },
    reference::parse_references,
};

/// Read-only queries over the content visible in repository versions.
///
/// Each operation takes version references (see [`crate::reference`]),
/// borrows one pooled connection for its whole duration and keeps no state
/// between calls. An empty reference list short-circuits to an empty result.
#[derive(Clone)]
pub struct ContentIndex {
    pool: DbPool,
}

impl ContentIndex {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
        }
    }

    /// Opens the store at `path`, applying pending schema migrations.
    pub fn open<P: AsRef<Path>>(path: P, options: &PoolOptions) -> CoreResult<Self> {
        let pool = DbPool::open_and_migrate(path, options)?;
        Ok(Self::new(pool))
    }

    /// Opens the store configured in `config`.
    pub fn from_config(config: &Config) -> CoreResult<Self> {
        let options = PoolOptions {
            max_size: config.pool_limit(),
            connection_timeout: config.connection_timeout(),
            busy_timeout: config.busy_timeout(),
        };
        Self::open(config.get_db_path(), &options)
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Searches package names, one result per distinct name, ordered by name.
    ///
    /// A `limit` of 0 selects the default limit.
    pub fn package_search<S: AsRef<str>>(
        &self,
        hrefs: &[S],
        search: &str,
        limit: i64,
    ) -> CoreResult<Vec<PackageSearchItem>> {
        let versions = parse_references(hrefs)?;
        if versions.is_empty() {
            return Ok(Vec::new());
        }

        debug!(versions = versions.len(), search, limit, "package search");

        self.pool.with_conn(|conn| {
            let membership = MembershipPredicate::resolve(conn, packages::CONTENT_ID, &versions)?;
            Ok(PackageRepository::search(
                conn,
                membership,
                search,
                effective_limit(limit),
            )?)
        })
    }

    /// Searches package groups by name, merging occurrences of the same
    /// `(name, id)` across versions.
    pub fn package_group_search<S: AsRef<str>>(
        &self,
        hrefs: &[S],
        search: &str,
        limit: i64,
    ) -> CoreResult<Vec<PackageGroupItem>> {
        let versions = parse_references(hrefs)?;
        if versions.is_empty() {
            return Ok(Vec::new());
        }

        debug!(versions = versions.len(), search, limit, "package group search");

        let rows = self.pool.with_conn(|conn| {
            let membership =
                MembershipPredicate::resolve(conn, package_groups::CONTENT_ID, &versions)?;
            Ok::<_, CoreError>(GroupRepository::search_groups(conn, membership, search)?)
        })?;

        Ok(merge_distinct(rows, effective_limit(limit) as usize))
    }

    /// Searches environments by name, merging occurrences of the same
    /// `(name, id)` across versions.
    pub fn environment_search<S: AsRef<str>>(
        &self,
        hrefs: &[S],
        search: &str,
        limit: i64,
    ) -> CoreResult<Vec<EnvironmentItem>> {
        let versions = parse_references(hrefs)?;
        if versions.is_empty() {
            return Ok(Vec::new());
        }

        debug!(versions = versions.len(), search, limit, "environment search");

        let rows = self.pool.with_conn(|conn| {
            let membership =
                MembershipPredicate::resolve(conn, environments::CONTENT_ID, &versions)?;
            Ok::<_, CoreError>(GroupRepository::search_environments(
                conn, membership, search,
            )?)
        })?;

        Ok(merge_distinct(rows, effective_limit(limit) as usize))
    }

    /// Lists package units page by page.
    ///
    /// Returns the page and the number of matches ignoring pagination.
    pub fn package_list<S: AsRef<str>>(
        &self,
        hrefs: &[S],
        filters: &PackageListFilters,
        page: &PageOptions,
    ) -> CoreResult<(Vec<PackageListItem>, i64)> {
        let versions = parse_references(hrefs)?;
        if versions.is_empty() {
            return Ok((Vec::new(), 0));
        }

        let (sort_field, direction) = page.package_sort();
        let query = PackageListQuery {
            name: Some(filters.name.as_str()),
            sort_field,
            direction,
            offset: page.offset(),
            limit: page.limit(),
        };

        debug!(
            versions = versions.len(),
            name = filters.name.as_str(),
            offset = query.offset,
            limit = query.limit,
            "package list"
        );

        self.pool.with_conn(|conn| {
            let membership = MembershipPredicate::resolve(conn, packages::CONTENT_ID, &versions)?;
            Ok(PackageRepository::list(conn, membership, &query)?)
        })
    }

    /// Lists module streams, one per `(name, stream)`.
    pub fn module_stream_list<S: AsRef<str>>(
        &self,
        hrefs: &[S],
        filters: &ModuleStreamFilters,
        sort_by: &str,
    ) -> CoreResult<Vec<ModuleStreamItem>> {
        let versions = parse_references(hrefs)?;
        if versions.is_empty() {
            return Ok(Vec::new());
        }

        let query = ModuleQuery {
            search: Some(filters.search.as_str()),
            rpm_names: &filters.rpm_names,
            direction: module_sort_direction(sort_by),
        };

        debug!(
            versions = versions.len(),
            search = filters.search.as_str(),
            rpm_names = filters.rpm_names.len(),
            sort_by,
            "module stream list"
        );

        self.pool.with_conn(|conn| {
            let membership = MembershipPredicate::resolve(conn, modules::CONTENT_ID, &versions)?;
            Ok(ModuleRepository::list(conn, membership, &query)?)
        })
    }

    /// Lists advisories page by page.
    ///
    /// Returns the page and the number of matches ignoring pagination.
    pub fn errata_list<S: AsRef<str>>(
        &self,
        hrefs: &[S],
        filters: &ErrataFilters,
        page: &PageOptions,
    ) -> CoreResult<(Vec<ErrataItem>, i64)> {
        let versions = parse_references(hrefs)?;
        if versions.is_empty() {
            return Ok((Vec::new(), 0));
        }

        let (sort_field, direction) = page.errata_sort();
        let query = ErrataQuery {
            search: Some(filters.search.as_str()),
            types: &filters.types,
            severities: &filters.severities,
            sort_field,
            direction,
            offset: page.offset(),
            limit: page.limit(),
        };

        debug!(
            versions = versions.len(),
            search = filters.search.as_str(),
            types = ?filters.types,
            severities = ?filters.severities,
            "errata list"
        );

        self.pool.with_conn(|conn| {
            let membership = MembershipPredicate::resolve(conn, errata::CONTENT_ID, &versions)?;
            Ok(ErrataRepository::list(conn, membership, &query)?)
        })
    }
}
