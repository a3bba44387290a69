//! Task descriptor
//!
//! Describes the single-container pod a script runs in:
//! - Container image and entrypoint command
//! - Host-directory volume exposing the script's folder
//! - Restart policy (always `Never` for ephemeral tasks)
//!
//! Building a descriptor only touches the local filesystem path; nothing here
//! talks to the orchestrator.

use podrun_foundation::{Error, PodrunConfig, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Pod restart policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RestartPolicy {
    #[default]
    Never,
}

impl RestartPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Never => "Never",
        }
    }
}

/// Volume mount binding (host path → container path)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeMount {
    /// Volume name inside the pod
    pub name: String,
    /// Host path
    pub host_path: PathBuf,
    /// Container path
    pub container_path: PathBuf,
    /// Read-only mount
    pub read_only: bool,
}

impl VolumeMount {
    pub fn new(
        name: impl Into<String>,
        host: impl Into<PathBuf>,
        container: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            host_path: host.into(),
            container_path: container.into(),
            read_only: false,
        }
    }
}

/// Everything needed to create one ephemeral task
///
/// Built once, then handed by value to the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Container image
    pub image: String,
    /// Container name inside the pod
    pub container_name: String,
    /// Command and arguments
    pub command: Vec<String>,
    /// Volume mounts (at least one for script tasks)
    pub volumes: Vec<VolumeMount>,
    /// Restart policy
    pub restart_policy: RestartPolicy,
    /// Prefix the orchestrator turns into a unique name
    pub name_prefix: String,
}

impl TaskSpec {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            container_name: "main".to_string(),
            command: vec![],
            volumes: vec![],
            restart_policy: RestartPolicy::Never,
            name_prefix: "task-".to_string(),
        }
    }

    /// Descriptor for running `script` with the configured interpreter
    ///
    /// The directory holding the script is mounted at `config.mount_path` and
    /// the command refers to the script by base name under that mount.
    pub fn for_script(script: impl AsRef<Path>, config: &PodrunConfig) -> Result<Self> {
        let script = resolve_script_path(script.as_ref())?;
        Self::for_resolved_script(&script, config)
    }

    /// Same as [`TaskSpec::for_script`] for a path that is already absolute
    pub fn for_resolved_script(script: &Path, config: &PodrunConfig) -> Result<Self> {
        if !script.is_absolute() {
            return Err(Error::path_resolution(script, "path is not absolute"));
        }
        let base_name = script
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::path_resolution(script, "path has no file name"))?;
        let script_dir = script
            .parent()
            .ok_or_else(|| Error::path_resolution(script, "path has no parent directory"))?;

        let mount_path = config.mount_path.trim_end_matches('/');
        let in_container = format!("{}/{}", mount_path, base_name);

        Ok(Self::new(config.image.clone())
            .with_container_name(config.container_name.clone())
            .with_command(vec![config.interpreter.clone(), in_container])
            .with_volume(VolumeMount::new(
                config.volume_name.clone(),
                script_dir,
                config.mount_path.clone(),
            ))
            .with_name_prefix(config.generate_name.clone()))
    }

    pub fn with_container_name(mut self, name: impl Into<String>) -> Self {
        self.container_name = name.into();
        self
    }

    pub fn with_command(mut self, cmd: Vec<String>) -> Self {
        self.command = cmd;
        self
    }

    pub fn with_volume(mut self, mount: VolumeMount) -> Self {
        self.volumes.push(mount);
        self
    }

    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }
}

/// Make `path` absolute against the current working directory
pub fn resolve_script_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(clean(path));
    }
    let cwd = std::env::current_dir().map_err(|e| Error::path_resolution(path, e))?;
    Ok(resolve_against(&cwd, path))
}

/// Join a relative path onto `base`, dropping `.` segments
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        clean(path)
    } else {
        clean(&base.join(path))
    }
}

fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // `..` at the root stays at the root
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_exposes_script_directory() {
        let spec = TaskSpec::for_script("/home/u/project/script.py", &PodrunConfig::default())
            .unwrap();

        assert_eq!(spec.volumes.len(), 1);
        assert_eq!(spec.volumes[0].host_path, PathBuf::from("/home/u/project"));
        assert_eq!(spec.volumes[0].container_path, PathBuf::from("/scripts"));
        assert!(spec.command.iter().any(|arg| arg.ends_with("script.py")));
        assert!(!spec.command.iter().any(|arg| arg.contains("/home/u")));
    }

    #[test]
    fn test_default_descriptor_shape() {
        let spec = TaskSpec::for_script("/tmp/script.py", &PodrunConfig::default()).unwrap();

        assert_eq!(spec.image, "python:3.8");
        assert_eq!(spec.container_name, "python");
        assert_eq!(spec.command, vec!["python", "/scripts/script.py"]);
        assert_eq!(spec.volumes[0].name, "script-volume");
        assert_eq!(spec.restart_policy, RestartPolicy::Never);
        assert_eq!(spec.name_prefix, "python-script-");
    }

    #[test]
    fn test_trailing_slash_mount_path() {
        let mut config = PodrunConfig::default();
        config.mount_path = "/work/".to_string();
        let spec = TaskSpec::for_script("/srv/jobs/run.py", &config).unwrap();
        assert_eq!(spec.command[1], "/work/run.py");
    }

    #[test]
    fn test_relative_path_resolution() {
        let resolved = resolve_against(Path::new("/home/u"), Path::new("./project/../script.py"));
        assert_eq!(resolved, PathBuf::from("/home/u/script.py"));

        let spec = TaskSpec::for_resolved_script(&resolved, &PodrunConfig::default()).unwrap();
        assert_eq!(spec.volumes[0].host_path, PathBuf::from("/home/u"));
    }

    #[test]
    fn test_relative_path_uses_cwd() {
        let resolved = resolve_script_path(Path::new("script.py")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("script.py"));
    }

    #[test]
    fn test_root_has_no_file_name() {
        let err = TaskSpec::for_resolved_script(Path::new("/"), &PodrunConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::PathResolution { .. }));
    }

    #[test]
    fn test_unresolved_path_rejected() {
        let err = TaskSpec::for_resolved_script(Path::new("script.py"), &PodrunConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::PathResolution { .. }));
    }

    #[test]
    fn test_parent_of_root_is_root() {
        let resolved = resolve_script_path(Path::new("/../tmp/script.py")).unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/script.py"));

        let spec = TaskSpec::for_resolved_script(&resolved, &PodrunConfig::default()).unwrap();
        assert_eq!(spec.volumes[0].host_path, PathBuf::from("/tmp"));

        let resolved = resolve_against(Path::new("/"), Path::new("../../a/../script.py"));
        assert_eq!(resolved, PathBuf::from("/script.py"));
    }

    #[test]
    fn test_clean_keeps_leading_parent_for_relative_paths() {
        assert_eq!(clean(Path::new("../x/../../y")), PathBuf::from("../../y"));
    }
}
