//! Repository version lookups.

use diesel::prelude::*;

use crate::{models::RepositoryVersion, schema::core_repositoryversion};

/// Repository for repository version rows.
pub struct VersionRepository;

impl VersionRepository {
    /// Finds version `number` of `repository_id`.
    pub fn find(
        conn: &mut SqliteConnection,
        repository_id: &str,
        number: i64,
    ) -> QueryResult<Option<RepositoryVersion>> {
        core_repositoryversion::table
            .filter(core_repositoryversion::repository_id.eq(repository_id))
            .filter(core_repositoryversion::number.eq(number))
            .select(RepositoryVersion::as_select())
            .first(conn)
            .optional()
    }

    /// Finds the highest numbered version of `repository_id`.
    pub fn latest(
        conn: &mut SqliteConnection,
        repository_id: &str,
    ) -> QueryResult<Option<RepositoryVersion>> {
        core_repositoryversion::table
            .filter(core_repositoryversion::repository_id.eq(repository_id))
            .order(core_repositoryversion::number.desc())
            .select(RepositoryVersion::as_select())
            .first(conn)
            .optional()
    }
}
