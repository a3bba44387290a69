//! Error types for podrun
//!
//! 모든 단계의 에러를 중앙에서 관리 (복구 없음)

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// podrun 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // 로컬 경로
    // ========================================================================
    #[error("Cannot resolve script path {path}: {message}")]
    PathResolution { path: PathBuf, message: String },

    // ========================================================================
    // 태스크 라이프사이클
    // ========================================================================
    #[error("Task submission failed: {0}")]
    Submission(String),

    #[error("Status query for {task} failed: {message}")]
    Poll { task: String, message: String },

    #[error("Cannot open log stream for {task}: {message}")]
    LogOpen { task: String, message: String },

    #[error("Log stream for {task} broke off: {message}")]
    LogRead { task: String, message: String },

    #[error("Timeout: {0}")]
    Timeout(String),
}

impl Error {
    pub fn path_resolution(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Error::PathResolution {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn poll(task: impl Into<String>, message: impl ToString) -> Self {
        Error::Poll {
            task: task.into(),
            message: message.to_string(),
        }
    }

    pub fn log_open(task: impl Into<String>, message: impl ToString) -> Self {
        Error::LogOpen {
            task: task.into(),
            message: message.to_string(),
        }
    }

    pub fn log_read(task: impl Into<String>, message: impl ToString) -> Self {
        Error::LogRead {
            task: task.into(),
            message: message.to_string(),
        }
    }
}
