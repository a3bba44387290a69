//! Task status as reported by the orchestrator

use serde::{Deserialize, Serialize};

/// Observed status of a submitted task
///
/// The orchestrator owns and mutates this; podrun only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Accepted but not every container has started
    Pending,

    /// At least one container is running
    Running,

    /// All containers exited with status zero
    Succeeded,

    /// At least one container exited non-zero
    Failed,

    /// The node stopped reporting
    Unknown,
}

impl TaskStatus {
    /// Map a pod phase string; a pod with no phase yet counts as `Pending`
    pub fn from_phase(phase: Option<&str>) -> Self {
        match phase {
            None | Some("Pending") => TaskStatus::Pending,
            Some("Running") => TaskStatus::Running,
            Some("Succeeded") => TaskStatus::Succeeded,
            Some("Failed") => TaskStatus::Failed,
            Some(_) => TaskStatus::Unknown,
        }
    }

    /// Check if this is a terminal status (the orchestrator will not move it again)
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Succeeded | TaskStatus::Failed)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TaskStatus::Succeeded)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::Running => "Running",
            TaskStatus::Succeeded => "Succeeded",
            TaskStatus::Failed => "Failed",
            TaskStatus::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
