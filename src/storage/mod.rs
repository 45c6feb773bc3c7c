pub mod config;
pub mod ids;
pub mod json_file;
pub mod memory;
pub mod tasks;

use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;
use self::tasks::Task;

/// 任务集合的持久化能力：整体读取、整体写回
///
/// `load` 永不失败：读不到或解析失败都视为空集合，由实现自行记录日志。
/// `save` 的错误原样向上传播。
pub trait TaskBackend: Send + Sync {
    fn load(&self) -> Vec<Task>;
    fn save(&self, tasks: &[Task]) -> Result<()>;
}

impl<B: TaskBackend + ?Sized> TaskBackend for std::sync::Arc<B> {
    fn load(&self) -> Vec<Task> {
        (**self).load()
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        (**self).save(tasks)
    }
}

/// 获取配置目录: <config_dir>/taskd/
pub fn taskd_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("taskd"))
}

/// 确保文件所在目录存在
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// 从 JSON 文件加载反序列化数据
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// 将数据序列化（pretty）后保存到 JSON 文件
pub fn save_json<T: serde::Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(data)?;
    ensure_parent_dir(path)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// 从 TOML 文件加载反序列化数据
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}
