//! Task Manager - drives one task through its lifecycle
//!
//! submit → wait for a terminal status → retrieve output. The phases run in
//! order on the caller's task; the first error ends the run.

use crate::container::TaskSpec;
use crate::executor::Orchestrator;
use crate::log::{collect_output, LogChunks};
use crate::state::TaskStatus;
use crate::task::{RunOutcome, TaskHandle};
use podrun_foundation::{Error, PodrunConfig, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Configuration for task manager
#[derive(Debug, Clone)]
pub struct TaskManagerConfig {
    /// Sleep between status queries
    pub poll_interval: Duration,

    /// Give up waiting after this long; `None` waits forever
    pub wait_timeout: Option<Duration>,
}

impl Default for TaskManagerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            wait_timeout: None,
        }
    }
}

impl From<&PodrunConfig> for TaskManagerConfig {
    fn from(config: &PodrunConfig) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            wait_timeout: config.wait_timeout(),
        }
    }
}

/// Task Manager - runs a single task against an orchestrator
pub struct TaskManager {
    orchestrator: Arc<dyn Orchestrator>,
    config: TaskManagerConfig,
}

impl TaskManager {
    pub fn new(orchestrator: Arc<dyn Orchestrator>, config: TaskManagerConfig) -> Self {
        Self {
            orchestrator,
            config,
        }
    }

    /// Create the task. One remote call, never retried; calling twice makes
    /// two tasks.
    pub async fn submit(&self, spec: TaskSpec) -> Result<TaskHandle> {
        info!(
            "Submitting {} task: {} {}",
            self.orchestrator.name(),
            spec.image,
            spec.command.join(" ")
        );
        self.orchestrator.create_task(&spec).await
    }

    /// Poll until the task is `Succeeded` or `Failed` and return that status
    ///
    /// A failed query ends the wait immediately. Both terminal statuses are
    /// returned as `Ok`; telling them apart is the caller's business.
    pub async fn wait_for_completion(&self, handle: &TaskHandle) -> Result<TaskStatus> {
        let deadline = self.config.wait_timeout.map(|t| Instant::now() + t);
        let mut queries = 0usize;

        loop {
            let status = self.orchestrator.task_status(handle).await?;
            queries += 1;
            debug!("Task {} is {} (query {})", handle, status, queries);

            if status.is_terminal() {
                info!("Task {} finished: {}", handle, status);
                return Ok(status);
            }

            // The last sleep is cut short so the final query lands on the deadline
            let pause = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Err(Error::Timeout(format!(
                            "Task {} still {} after {} status queries",
                            handle, status, queries
                        )));
                    }
                    self.config.poll_interval.min(deadline - now)
                }
                None => self.config.poll_interval,
            };

            tokio::time::sleep(pause).await;
        }
    }

    /// Lazy access to the task's output chunks
    pub async fn stream_output(&self, handle: &TaskHandle) -> Result<LogChunks> {
        self.orchestrator.open_logs(handle).await
    }

    /// Full captured output as one string; nothing is returned on error
    pub async fn retrieve(&self, handle: &TaskHandle) -> Result<String> {
        let chunks = self.stream_output(handle).await?;
        let buffer = collect_output(chunks).await?;
        Ok(buffer.into_string())
    }

    /// Submit, wait, and retrieve, all against the one handle the
    /// orchestrator hands back
    pub async fn run(&self, spec: TaskSpec) -> Result<RunOutcome> {
        let handle = self.submit(spec).await?;
        let status = self.wait_for_completion(&handle).await?;
        if !status.is_success() {
            warn!("Task {} ended {}; its output follows", handle, status);
        }
        let output = self.retrieve(&handle).await?;

        Ok(RunOutcome {
            handle,
            status,
            output,
        })
    }
}
