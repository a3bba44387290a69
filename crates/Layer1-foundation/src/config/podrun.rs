//! Podrun Config - 실행 설정
//!
//! 클러스터 위치와 임시 Pod 형태. 글로벌 → 프로젝트 순으로 로드 (프로젝트 우선)

use crate::storage::JsonStore;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// 설정 파일명
pub const PODRUN_CONFIG_FILE: &str = "config.json";

/// 기본 네임스페이스
pub const DEFAULT_NAMESPACE: &str = "default";

/// podrun 통합 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodrunConfig {
    /// kubeconfig 경로 (없으면 `~/.kube/config`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<PathBuf>,

    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default = "default_image")]
    pub image: String,

    /// 스크립트 실행 인터프리터
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    #[serde(default = "default_container_name")]
    pub container_name: String,

    /// 컨테이너 내부 마운트 위치
    #[serde(default = "default_mount_path")]
    pub mount_path: String,

    #[serde(default = "default_volume_name")]
    pub volume_name: String,

    /// Pod 이름 접두사 (서버가 고유 이름으로 완성)
    #[serde(default = "default_generate_name")]
    pub generate_name: String,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// 없으면 무기한 대기
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_timeout_secs: Option<u64>,
}

/// 설정 파일 한 개 (없는 키는 하위 레이어 값 유지)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigLayer {
    pub kubeconfig: Option<PathBuf>,
    pub namespace: Option<String>,
    pub image: Option<String>,
    pub interpreter: Option<String>,
    pub container_name: Option<String>,
    pub mount_path: Option<String>,
    pub volume_name: Option<String>,
    pub generate_name: Option<String>,
    pub poll_interval_secs: Option<u64>,
    pub wait_timeout_secs: Option<u64>,
}

impl Default for PodrunConfig {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            namespace: default_namespace(),
            image: default_image(),
            interpreter: default_interpreter(),
            container_name: default_container_name(),
            mount_path: default_mount_path(),
            volume_name: default_volume_name(),
            generate_name: default_generate_name(),
            poll_interval_secs: default_poll_interval_secs(),
            wait_timeout_secs: None,
        }
    }
}

impl PodrunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // 로드
    // ========================================================================

    /// 글로벌 + 프로젝트 병합 로드
    pub fn load() -> Result<Self> {
        let mut stores = Vec::new();
        if let Ok(global) = JsonStore::global() {
            stores.push(global);
        }
        stores.push(JsonStore::current_project()?);
        Self::load_layered(&stores)
    }

    /// 설정 파일이 있는 저장소를 순서대로 병합 (뒤쪽 우선)
    pub fn load_layered(stores: &[JsonStore]) -> Result<Self> {
        let mut config = Self::new();
        for store in stores {
            if let Some(layer) = store.load_optional::<ConfigLayer>(PODRUN_CONFIG_FILE)? {
                tracing::debug!("Loaded config from {}", store.base_dir().display());
                config.merge(layer);
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// 레이어에 지정된 값은 기본값과 같아도 덮어씀
    pub fn merge(&mut self, layer: ConfigLayer) {
        if let Some(v) = layer.kubeconfig {
            self.kubeconfig = Some(v);
        }
        if let Some(v) = layer.namespace {
            self.namespace = v;
        }
        if let Some(v) = layer.image {
            self.image = v;
        }
        if let Some(v) = layer.interpreter {
            self.interpreter = v;
        }
        if let Some(v) = layer.container_name {
            self.container_name = v;
        }
        if let Some(v) = layer.mount_path {
            self.mount_path = v;
        }
        if let Some(v) = layer.volume_name {
            self.volume_name = v;
        }
        if let Some(v) = layer.generate_name {
            self.generate_name = v;
        }
        if let Some(v) = layer.poll_interval_secs {
            self.poll_interval_secs = v;
        }
        if let Some(v) = layer.wait_timeout_secs {
            self.wait_timeout_secs = Some(v);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.namespace.is_empty() {
            return Err(Error::Config("namespace must not be empty".to_string()));
        }
        if self.image.is_empty() {
            return Err(Error::Config("image must not be empty".to_string()));
        }
        if !self.mount_path.starts_with('/') {
            return Err(Error::Config(format!(
                "mountPath must be absolute, got {}",
                self.mount_path
            )));
        }
        if self.poll_interval_secs == 0 {
            return Err(Error::Config(
                "pollIntervalSecs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    // ========================================================================
    // 접근자
    // ========================================================================

    pub fn kubeconfig_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.kubeconfig {
            return Ok(path.clone());
        }
        dirs::home_dir()
            .map(|home| home.join(".kube").join("config"))
            .ok_or_else(|| Error::Config("Cannot find home directory for kubeconfig".to_string()))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn wait_timeout(&self) -> Option<Duration> {
        self.wait_timeout_secs.map(Duration::from_secs)
    }

    // ========================================================================
    // 빌더
    // ========================================================================

    pub fn kubeconfig(mut self, path: impl Into<PathBuf>) -> Self {
        self.kubeconfig = Some(path.into());
        self
    }
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_image() -> String {
    "python:3.8".to_string()
}

fn default_interpreter() -> String {
    "python".to_string()
}

fn default_container_name() -> String {
    "python".to_string()
}

fn default_mount_path() -> String {
    "/scripts".to_string()
}

fn default_volume_name() -> String {
    "script-volume".to_string()
}

fn default_generate_name() -> String {
    "python-script-".to_string()
}

fn default_poll_interval_secs() -> u64 {
    5
}
