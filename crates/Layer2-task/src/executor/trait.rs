//! Orchestrator trait

use crate::container::TaskSpec;
use crate::log::LogChunks;
use crate::state::TaskStatus;
use crate::task::TaskHandle;
use async_trait::async_trait;
use podrun_foundation::Result;

/// The three calls podrun makes against a cluster orchestrator
///
/// Implement to add new backends. Each method maps to exactly one remote
/// operation; none of them retry.
#[async_trait]
pub trait Orchestrator: Send + Sync {
    /// Create a task; the orchestrator picks its name
    async fn create_task(&self, spec: &TaskSpec) -> Result<TaskHandle>;

    /// Current status of a task
    async fn task_status(&self, handle: &TaskHandle) -> Result<TaskStatus>;

    /// Open the task's captured output
    async fn open_logs(&self, handle: &TaskHandle) -> Result<LogChunks>;

    /// Backend name
    fn name(&self) -> &'static str;
}
