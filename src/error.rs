//! taskd 统一错误类型定义
//!
//! 使用 `thiserror` 库提供统一的错误处理，支持错误链式传播。

use std::io;
use thiserror::Error;

/// taskd 错误类型
#[derive(Debug, Error)]
pub enum TaskError {
    /// I/O 错误（文件读写、端口绑定等）
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON 序列化/解析错误
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML 解析错误
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// 配置错误
    #[error("Config error: {0}")]
    Config(String),

    /// 存储错误（锁中毒、ID 生成失败等）
    #[error("Storage error: {0}")]
    Storage(String),

    /// 请求数据不合法（标题为空、字段类型错误）
    #[error("{0}")]
    Validation(String),

    /// 资源不存在
    #[error("{0}")]
    NotFound(String),

    /// 请求体无法解析
    #[error("{0}")]
    MalformedRequest(String),
}

/// taskd Result 类型别名
pub type Result<T> = std::result::Result<T, TaskError>;

impl TaskError {
    /// 创建 Config 错误
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// 创建 Storage 错误
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// 创建 Validation 错误
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// 任务不存在
    pub fn task_not_found() -> Self {
        Self::NotFound("Task not found".to_string())
    }

    /// 请求体不是合法 JSON
    pub fn invalid_json() -> Self {
        Self::MalformedRequest("Invalid JSON".to_string())
    }

    /// 是否为调用方造成的错误（4xx）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NotFound(_) | Self::MalformedRequest(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TaskError::validation("Title required");
        assert_eq!(err.to_string(), "Title required");

        let err = TaskError::task_not_found();
        assert_eq!(err.to_string(), "Task not found");

        let err = TaskError::storage("lock poisoned");
        assert_eq!(err.to_string(), "Storage error: lock poisoned");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let err: TaskError = io_err.into();
        assert!(matches!(err, TaskError::Io(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_client_errors() {
        assert!(TaskError::invalid_json().is_client_error());
        assert!(TaskError::task_not_found().is_client_error());
        assert!(TaskError::validation("x").is_client_error());
        assert!(!TaskError::config("x").is_client_error());
    }
}
