//! 应用配置

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::ids::IdScheme;
use super::{load_toml, taskd_dir};
use crate::error::{Result, TaskError};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// 任务存储配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// JSON 数据文件路径（相对路径基于当前工作目录）
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub ids: IdScheme,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_store_path() -> PathBuf {
    PathBuf::from("tasks.json")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            ids: IdScheme::default(),
        }
    }
}

/// 默认配置文件路径: <config_dir>/taskd/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    taskd_dir().map(|dir| dir.join("config.toml"))
}

/// 加载配置
///
/// 显式指定的文件必须存在；默认位置的文件不存在时使用默认值。
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(TaskError::config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            load_toml(path)
        }
        None => {
            let Some(path) = default_config_path() else {
                warn!("no config directory on this platform, using defaults");
                return Ok(Config::default());
            };
            if !path.exists() {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            load_toml(&path)
        }
    }
}
