use diesel::prelude::*;
use serde_json::Value;

use crate::schema::{core_repositorycontent, core_repositoryversion};

/// A repository version as stored, including its snapshot when one exists.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = core_repositoryversion)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RepositoryVersion {
    pub pulp_id: String,
    pub repository_id: String,
    pub number: i64,
    pub content_ids: Option<Value>,
}

impl RepositoryVersion {
    pub fn has_snapshot(&self) -> bool {
        self.content_ids.is_some()
    }
}

#[derive(Insertable)]
#[diesel(table_name = core_repositoryversion)]
pub struct NewRepositoryVersion<'a> {
    pub pulp_id: &'a str,
    pub repository_id: &'a str,
    pub number: i64,
    pub content_ids: Option<Value>,
}

#[derive(Insertable)]
#[diesel(table_name = core_repositorycontent)]
pub struct NewRepositoryContent<'a> {
    pub pulp_id: &'a str,
    pub repository_id: &'a str,
    pub content_id: &'a str,
    pub version_added_id: &'a str,
    pub version_removed_id: Option<&'a str>,
}
