//! # podrun-task
//!
//! Single-task lifecycle against a cluster orchestrator.
//! Builds a pod descriptor for a script, submits it, polls it to a terminal
//! status and collects its output.
//!
//! ## Features
//!
//! - Task descriptor building (image, command, host-directory mount)
//! - `Orchestrator` trait with a Kubernetes backend
//! - Fixed-interval completion polling with an optional deadline
//! - Output as a lazy chunk stream or one buffered string

pub mod container;
pub mod executor;
pub mod log;
pub mod manager;
pub mod state;
pub mod task;

// Task system
pub use executor::{pod_manifest, KubeOrchestrator, Orchestrator};
pub use manager::{TaskManager, TaskManagerConfig};
pub use state::TaskStatus;
pub use task::{RunOutcome, TaskHandle};

// Descriptor
pub use container::{resolve_script_path, RestartPolicy, TaskSpec, VolumeMount};

// Output
pub use log::{collect_output, LogChunks, OutputBuffer};
