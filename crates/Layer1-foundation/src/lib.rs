//! # podrun-foundation
//!
//! Foundation layer for podrun:
//! - Error: 모든 단계가 공유하는 에러 타입
//! - Config: 클러스터 위치와 Pod 형태 (`PodrunConfig`)
//! - Storage: JsonStore (글로벌, 프로젝트)

pub mod config;
pub mod error;
pub mod storage;

pub use config::{ConfigLayer, PodrunConfig, DEFAULT_NAMESPACE, PODRUN_CONFIG_FILE};
pub use error::{Error, Result};
pub use storage::JsonStore;
