//! JSON 파일 저장소

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// JSON 설정 저장소
#[derive(Debug, Clone)]
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// 글로벌 설정 (`<config dir>/podrun/`)
    pub fn global() -> Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Cannot find config directory".to_string()))?
            .join("podrun");
        Ok(Self::new(dir))
    }

    /// 프로젝트 설정 (`.podrun/`)
    pub fn project(root: impl Into<PathBuf>) -> Self {
        Self::new(root.into().join(".podrun"))
    }

    pub fn current_project() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| Error::Config(format!("Cannot get current directory: {}", e)))?;
        Ok(Self::project(cwd))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }

    pub fn load<T: DeserializeOwned>(&self, filename: &str) -> Result<T> {
        let path = self.file_path(filename);
        let content = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// 파일이 없으면 `None` (파싱 실패는 에러)
    pub fn load_optional<T: DeserializeOwned>(&self, filename: &str) -> Result<Option<T>> {
        let path = self.file_path(filename);
        if !path.exists() {
            return Ok(None);
        }
        self.load(filename).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        name: String,
    }

    #[test]
    fn test_load_optional_missing() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let loaded: Option<Sample> = store.load_optional("missing.json").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_existing() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("s.json"), r#"{"name":"x"}"#).unwrap();
        let store = JsonStore::new(dir.path());
        let loaded: Sample = store.load("s.json").unwrap();
        assert_eq!(loaded.name, "x");
    }

    #[test]
    fn test_parse_error_is_config_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("s.json"), "{not json").unwrap();
        let store = JsonStore::new(dir.path());
        let err = store.load_optional::<Sample>("s.json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_project_dir() {
        let store = JsonStore::project("/work");
        assert_eq!(store.base_dir(), Path::new("/work/.podrun"));
    }
}
