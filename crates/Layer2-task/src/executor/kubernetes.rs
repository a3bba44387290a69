//! Kubernetes orchestrator - runs tasks as bare pods

use crate::container::TaskSpec;
use crate::executor::Orchestrator;
use crate::log::LogChunks;
use crate::state::TaskStatus;
use crate::task::TaskHandle;
use async_stream::try_stream;
use async_trait::async_trait;
use futures::{AsyncReadExt, Stream};
use k8s_openapi::api::core::v1::{
    Container, HostPathVolumeSource, Pod, PodSpec, Volume, VolumeMount as PodVolumeMount,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::{LogParams, PostParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config};
use podrun_foundation::{Error, PodrunConfig, Result};
use tracing::{debug, info};

/// Read size for log chunks
const LOG_READ_CHUNK: usize = 8 * 1024;

/// Orchestrator backed by a Kubernetes API server
pub struct KubeOrchestrator {
    /// Kubernetes client
    client: Client,

    /// Namespace new pods are created in
    namespace: String,
}

impl KubeOrchestrator {
    pub fn new(client: Client, namespace: impl Into<String>) -> Self {
        Self {
            client,
            namespace: namespace.into(),
        }
    }

    /// Build a client session from the configured kubeconfig
    ///
    /// Any failure to read, parse or apply the kubeconfig is a config error;
    /// nothing has been created at that point.
    pub async fn connect(config: &PodrunConfig) -> Result<Self> {
        let path = config.kubeconfig_path()?;
        debug!("Reading kubeconfig from {}", path.display());

        let kubeconfig = Kubeconfig::read_from(&path).map_err(|e| {
            Error::Config(format!("Failed to read kubeconfig {}: {}", path.display(), e))
        })?;
        let client_config =
            Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                .await
                .map_err(|e| Error::Config(format!("Invalid kubeconfig: {}", e)))?;
        let client = Client::try_from(client_config)
            .map_err(|e| Error::Config(format!("Failed to create Kubernetes client: {}", e)))?;

        Ok(Self::new(client, config.namespace.clone()))
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn pods(&self, namespace: &str) -> Api<Pod> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl Orchestrator for KubeOrchestrator {
    async fn create_task(&self, spec: &TaskSpec) -> Result<TaskHandle> {
        let pod = pod_manifest(spec);

        let created = self
            .pods(&self.namespace)
            .create(&PostParams::default(), &pod)
            .await
            .map_err(|e| Error::Submission(e.to_string()))?;

        let name = created.metadata.name.ok_or_else(|| {
            Error::Submission("API server returned a pod without a name".to_string())
        })?;
        let namespace = created
            .metadata
            .namespace
            .unwrap_or_else(|| self.namespace.clone());

        info!("Created pod {}/{}", namespace, name);
        Ok(TaskHandle::new(name, namespace))
    }

    async fn task_status(&self, handle: &TaskHandle) -> Result<TaskStatus> {
        let pod = self
            .pods(&handle.namespace)
            .get(&handle.name)
            .await
            .map_err(|e| Error::poll(handle.name.clone(), e))?;

        let phase = pod.status.as_ref().and_then(|s| s.phase.as_deref());
        Ok(TaskStatus::from_phase(phase))
    }

    /// The request is sent when the stream is first polled, so an open
    /// failure arrives as the first item.
    async fn open_logs(&self, handle: &TaskHandle) -> Result<LogChunks> {
        let chunks = log_chunks(self.pods(&handle.namespace), handle.name.clone());
        Ok(Box::pin(chunks))
    }

    fn name(&self) -> &'static str {
        "kubernetes"
    }
}

/// Stream a pod's log in raw chunks of at most `LOG_READ_CHUNK` bytes
fn log_chunks(pods: Api<Pod>, name: String) -> impl Stream<Item = Result<Vec<u8>>> + Send {
    try_stream! {
        let reader = pods
            .log_stream(&name, &LogParams::default())
            .await
            .map_err(|e| Error::log_open(name.clone(), e))?;
        let mut reader = Box::pin(reader);
        let mut buf = vec![0u8; LOG_READ_CHUNK];

        loop {
            let n = reader
                .read(&mut buf)
                .await
                .map_err(|e| Error::log_read(name.clone(), e))?;
            if n == 0 {
                break;
            }
            yield buf[..n].to_vec();
        }
    }
}

/// Pod object for a task spec
///
/// Every volume is a hostPath volume mounted into the single container.
pub fn pod_manifest(spec: &TaskSpec) -> Pod {
    let volume_mounts = spec
        .volumes
        .iter()
        .map(|v| PodVolumeMount {
            name: v.name.clone(),
            mount_path: v.container_path.to_string_lossy().to_string(),
            read_only: v.read_only.then_some(true),
            ..Default::default()
        })
        .collect::<Vec<_>>();

    let volumes = spec
        .volumes
        .iter()
        .map(|v| Volume {
            name: v.name.clone(),
            host_path: Some(HostPathVolumeSource {
                path: v.host_path.to_string_lossy().to_string(),
                ..Default::default()
            }),
            ..Default::default()
        })
        .collect::<Vec<_>>();

    let container = Container {
        name: spec.container_name.clone(),
        image: Some(spec.image.clone()),
        command: Some(spec.command.clone()),
        volume_mounts: if volume_mounts.is_empty() {
            None
        } else {
            Some(volume_mounts)
        },
        ..Default::default()
    };

    Pod {
        metadata: ObjectMeta {
            generate_name: Some(spec.name_prefix.clone()),
            ..Default::default()
        },
        spec: Some(PodSpec {
            containers: vec![container],
            volumes: if volumes.is_empty() {
                None
            } else {
                Some(volumes)
            },
            restart_policy: Some(spec.restart_policy.as_str().to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pod_manifest_from_script_spec() {
        let spec = TaskSpec::for_script("/home/u/project/script.py", &PodrunConfig::default())
            .unwrap();
        let pod = pod_manifest(&spec);

        assert_eq!(pod.metadata.generate_name.as_deref(), Some("python-script-"));
        assert!(pod.metadata.name.is_none());

        let pod_spec = pod.spec.unwrap();
        assert_eq!(pod_spec.restart_policy.as_deref(), Some("Never"));

        let container = &pod_spec.containers[0];
        assert_eq!(container.name, "python");
        assert_eq!(container.image.as_deref(), Some("python:3.8"));
        assert_eq!(
            container.command.as_deref(),
            Some(&["python".to_string(), "/scripts/script.py".to_string()][..])
        );

        let mount = &container.volume_mounts.as_ref().unwrap()[0];
        assert_eq!(mount.name, "script-volume");
        assert_eq!(mount.mount_path, "/scripts");
        assert!(mount.read_only.is_none());

        let volume = &pod_spec.volumes.unwrap()[0];
        assert_eq!(volume.name, "script-volume");
        assert_eq!(volume.host_path.as_ref().unwrap().path, "/home/u/project");
    }

    #[test]
    fn test_pod_manifest_without_volumes() {
        let spec = TaskSpec::new("alpine:3.20")
            .with_command(vec!["echo".to_string(), "hi".to_string()]);
        let pod = pod_manifest(&spec);
        let pod_spec = pod.spec.unwrap();

        assert!(pod_spec.volumes.is_none());
        assert!(pod_spec.containers[0].volume_mounts.is_none());
    }
}
