//! Interface to the content management service that fills the store.
//!
//! Repository creation and synchronization happen outside this crate. The
//! [`ContentSync`] trait is the narrow surface the rest of the system relies
//! on; the integration tests provide an implementation that writes
//! repository versions straight into a store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// State of an asynchronous service task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "state", content = "error", rename_all = "lowercase")]
pub enum TaskState {
    Waiting,
    Running,
    Succeeded,
    Failed(BTreeMap<String, String>),
}

impl TaskState {
    /// Whether the task has finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Succeeded | TaskState::Failed(_))
    }

    /// Turns a failed task into [`CoreError::SyncTaskFailed`].
    pub fn into_result(self) -> CoreResult<TaskState> {
        match self {
            TaskState::Failed(errors) => Err(CoreError::SyncTaskFailed(errors)),
            state => Ok(state),
        }
    }
}

/// Content management service operations.
///
/// References returned by one call are opaque strings meant to be passed back
/// into the others.
pub trait ContentSync {
    /// Creates an RPM repository and a remote pointing at `url`.
    ///
    /// Returns the repository and remote references.
    fn create_repository(&self, domain: &str, name: &str, url: &str)
        -> CoreResult<(String, String)>;

    /// Points an existing remote at a new upstream `url`.
    fn update_remote(&self, remote_ref: &str, url: &str) -> CoreResult<()>;

    /// Starts a sync of `repo_ref` from `remote_ref` and returns the task reference.
    fn sync_repository(&self, repo_ref: &str, remote_ref: &str) -> CoreResult<String>;

    /// Reports the current state of a task.
    fn poll_task(&self, task_ref: &str) -> CoreResult<TaskState>;

    /// Looks up a repository by name and returns the reference of its latest
    /// version, if the repository exists.
    fn repository_by_name(&self, domain: &str, name: &str) -> CoreResult<Option<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!TaskState::Waiting.is_terminal());
        assert!(!TaskState::Running.is_terminal());
        assert!(TaskState::Succeeded.is_terminal());
        assert!(TaskState::Failed(BTreeMap::new()).is_terminal());
    }

    #[test]
    fn test_into_result() {
        assert_eq!(TaskState::Succeeded.into_result().unwrap(), TaskState::Succeeded);

        let failed = TaskState::Failed(BTreeMap::from([(
            "description".to_string(),
            "remote unreachable".to_string(),
        )]));
        match failed.into_result() {
            Err(CoreError::SyncTaskFailed(errors)) => {
                assert_eq!(errors["description"], "remote unreachable");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_task_state_serde() {
        let json = serde_json::to_string(&TaskState::Succeeded).unwrap();
        assert_eq!(json, r#"{"state":"succeeded"}"#);

        let failed: TaskState =
            serde_json::from_str(r#"{"state":"failed","error":{"reason":"timeout"}}"#).unwrap();
        assert!(matches!(failed, TaskState::Failed(ref e) if e["reason"] == "timeout"));
    }
}
