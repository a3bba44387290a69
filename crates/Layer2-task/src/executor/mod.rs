//! Orchestrator backends
//!
//! - `Orchestrator` - the create / status / logs contract the lifecycle needs
//! - `KubeOrchestrator` - Kubernetes pods through the `kube` client

pub mod kubernetes;
pub mod r#trait;

pub use kubernetes::{pod_manifest, KubeOrchestrator};
pub use r#trait::Orchestrator;
