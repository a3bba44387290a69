//! Task handle and run outcome

use crate::state::TaskStatus;
use serde::{Deserialize, Serialize};

/// Orchestrator-assigned identity of a submitted task
///
/// Only the submitter creates one; the poller and retriever address the task
/// exclusively through it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskHandle {
    /// Generated name (e.g. `python-script-abcde`)
    pub name: String,

    /// Namespace the task was created in
    pub namespace: String,
}

impl TaskHandle {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

impl std::fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Result of one complete run: which task, how it ended, what it printed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub handle: TaskHandle,

    /// Terminal status (`Succeeded` or `Failed`)
    pub status: TaskStatus,

    /// Full captured stdout/stderr
    pub output: String,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_display() {
        let handle = TaskHandle::new("python-script-abcde", "default");
        assert_eq!(handle.to_string(), "default/python-script-abcde");
    }

    #[test]
    fn test_outcome_keeps_failed_status() {
        let outcome = RunOutcome {
            handle: TaskHandle::new("python-script-abcde", "default"),
            status: TaskStatus::Failed,
            output: "Traceback...\n".to_string(),
        };
        assert!(!outcome.is_success());
    }
}
