//! 内存中的任务集合（测试、临时运行）

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::tasks::Task;
use super::TaskBackend;
use crate::error::{Result, TaskError};

#[derive(Debug, Default)]
pub struct InMemoryBackend {
    tasks: Mutex<Vec<Task>>,
    saves: AtomicUsize,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            saves: AtomicUsize::new(0),
        }
    }

    /// 已执行的 save 次数
    #[cfg(test)]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl TaskBackend for InMemoryBackend {
    fn load(&self) -> Vec<Task> {
        match self.tasks.lock() {
            Ok(tasks) => tasks.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        let mut stored = self
            .tasks
            .lock()
            .map_err(|err| TaskError::storage(format!("lock poisoned: {err}")))?;
        *stored = tasks.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
