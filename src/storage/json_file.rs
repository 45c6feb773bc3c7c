//! 单个 JSON 文件作为任务集合的存储

use std::path::{Path, PathBuf};

use tracing::warn;

use super::tasks::Task;
use super::{load_json, save_json, TaskBackend};
use crate::error::Result;

/// 整个集合保存为一个 pretty-printed JSON 数组
///
/// 写入直接覆盖原文件，没有临时文件 + rename。
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskBackend for JsonFileBackend {
    fn load(&self) -> Vec<Task> {
        if !self.path.exists() {
            return Vec::new();
        }

        match load_json::<Vec<Task>>(&self.path) {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "task file unreadable, treating as empty"
                );
                Vec::new()
            }
        }
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        save_json(&self.path, tasks)
    }
}
