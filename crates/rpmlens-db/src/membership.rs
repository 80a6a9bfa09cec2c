//! Version membership resolution.
//!
//! A repository version records its content in one of two ways. Newer
//! versions carry a snapshot: a JSON array of content ids on the version row.
//! Older versions only have add/remove events in `core_repositorycontent`,
//! where a unit is visible in version `N` if it was added at or before `N` and
//! not removed at or before `N`.
//!
//! [`select_strategy`] inspects the requested versions once per call and picks
//! a single representation for the whole batch. [`MembershipPredicate`] then
//! renders a `content_id IN (...)` condition for that representation.

use diesel::{dsl::count_star, prelude::*, sql_types::Bool, sqlite::Sqlite};
use serde::Serialize;
use tracing::trace;

use crate::{
    expr::{Col, Params},
    schema::core_repositoryversion as crv,
    traits::Expression,
};

/// A resolved `(repository, version number)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VersionRef {
    pub repository_id: String,
    pub number: i64,
}

impl VersionRef {
    pub fn new(repository_id: impl Into<String>, number: i64) -> Self {
        Self {
            repository_id: repository_id.into(),
            number,
        }
    }
}

/// How membership is resolved for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Every requested version has a content id snapshot.
    Snapshot,
    /// At least one requested version predates snapshots.
    EventSourced,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Strategy::Snapshot => "snapshot",
            Strategy::EventSourced => "event-sourced",
        };
        write!(f, "{msg}")
    }
}

type VersionFilter = Box<dyn BoxableExpression<crv::table, Sqlite, SqlType = Bool>>;

/// Picks the membership strategy for `versions`.
///
/// Counts the requested versions whose snapshot is missing. Zero means every
/// version can be resolved from its snapshot; anything else sends the whole
/// batch down the event-sourced path. An empty list needs no lookup.
pub fn select_strategy(conn: &mut SqliteConnection, versions: &[VersionRef]) -> QueryResult<Strategy> {
    let pairs = versions
        .iter()
        .map(|v| {
            Box::new(
                crv::repository_id
                    .eq(v.repository_id.clone())
                    .and(crv::number.eq(v.number)),
            ) as VersionFilter
        })
        .reduce(|acc, next| Box::new(acc.or(next)) as VersionFilter);

    let Some(pairs) = pairs else {
        return Ok(Strategy::Snapshot);
    };

    let missing: i64 = crv::table
        .filter(pairs)
        .filter(crv::content_ids.is_null())
        .select(count_star())
        .get_result(conn)?;

    let strategy = if missing == 0 {
        Strategy::Snapshot
    } else {
        Strategy::EventSourced
    };
    trace!(
        versions = versions.len(),
        missing_snapshots = missing,
        strategy = %strategy,
        "selected membership strategy"
    );

    Ok(strategy)
}

/// Condition that is true for a content id visible in at least one of the
/// requested versions.
///
/// The predicate holds no connection or parameter state, so it can be
/// rendered into both the count and the page query of one operation.
#[derive(Debug, Clone)]
pub struct MembershipPredicate {
    column: &'static str,
    strategy: Strategy,
    versions: Vec<VersionRef>,
}

impl MembershipPredicate {
    pub fn new<T>(column: Col<T>, strategy: Strategy, versions: Vec<VersionRef>) -> Self {
        Self {
            column: column.name,
            strategy,
            versions,
        }
    }

    /// Selects the strategy for `versions` and builds the predicate on `column`.
    pub fn resolve<T>(
        conn: &mut SqliteConnection,
        column: Col<T>,
        versions: &[VersionRef],
    ) -> QueryResult<Self> {
        let strategy = select_strategy(conn, versions)?;
        Ok(Self::new(column, strategy, versions.to_vec()))
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    fn pair_sql(&self, version: &VersionRef, params: &mut Params) -> String {
        let repo = params.bind(&version.repository_id);
        let number = params.bind(version.number);
        match self.strategy {
            Strategy::Snapshot => {
                format!("(crv.repository_id = {repo} AND crv.number = {number})")
            }
            Strategy::EventSourced => format!(
                "(crc.repository_id = {repo} AND crv.number <= {number} \
                 AND NOT (crv2.number <= {number} AND crv2.number IS NOT NULL))"
            ),
        }
    }
}

impl Expression for MembershipPredicate {
    fn to_sql(&self, params: &mut Params) -> String {
        if self.versions.is_empty() {
            return "0".to_string();
        }

        let pairs = self
            .versions
            .iter()
            .map(|v| self.pair_sql(v, params))
            .collect::<Vec<_>>()
            .join(" OR ");

        match self.strategy {
            Strategy::Snapshot => format!(
                "{} IN (SELECT je.value FROM core_repositoryversion crv, \
                 json_each(crv.content_ids) je \
                 WHERE crv.content_ids IS NOT NULL AND ({}))",
                self.column, pairs
            ),
            Strategy::EventSourced => format!(
                "{} IN (SELECT crc.content_id FROM core_repositorycontent crc \
                 INNER JOIN core_repositoryversion crv ON crv.pulp_id = crc.version_added_id \
                 LEFT OUTER JOIN core_repositoryversion crv2 ON crv2.pulp_id = crc.version_removed_id \
                 WHERE {})",
                self.column, pairs
            ),
        }
    }
}
