//! Error types for rpmlens-core.

use std::collections::BTreeMap;

use miette::Diagnostic;
use rpmlens_config::error::ConfigError;
use rpmlens_db::DbError;
use thiserror::Error;

/// Core error type for content queries.
#[derive(Error, Diagnostic, Debug)]
pub enum CoreError {
    #[error("Invalid repository version reference '{value}': {reason}")]
    #[diagnostic(
        code(rpmlens::invalid_reference),
        help("Use a version href such as /api/pulp/<domain>/api/v3/repositories/rpm/rpm/<uuid>/versions/<n>/")
    )]
    InvalidReference { value: String, reason: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Sync task failed: {}", format_task_errors(.0))]
    #[diagnostic(
        code(rpmlens::sync_task),
        help("Inspect the task in the content management service for details")
    )]
    SyncTaskFailed(BTreeMap<String, String>),

    #[error("{0}")]
    #[diagnostic(code(rpmlens::error))]
    Custom(String),
}

fn format_task_errors(errors: &BTreeMap<String, String>) -> String {
    if errors.is_empty() {
        return "no error details".to_string();
    }
    errors
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<diesel::result::Error> for CoreError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Db(DbError::from(err))
    }
}

impl CoreError {
    pub(crate) fn invalid_reference(value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidReference {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
