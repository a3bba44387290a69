//! Config - 설정 관리
//!
//! - `podrun.rs` - PodrunConfig (클러스터 위치, Pod 형태, 폴링 주기)

mod podrun;

pub use podrun::{ConfigLayer, PodrunConfig, DEFAULT_NAMESPACE, PODRUN_CONFIG_FILE};
