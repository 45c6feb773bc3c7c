use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::ids::{IdGenerator, UuidIds};
use super::TaskBackend;
use crate::error::{Result, TaskError};

/// 未指定优先级时的默认值
pub const DEFAULT_PRIORITY: &str = "medium";

/// 生成 ID 时遇到重复的最大重试次数
const MAX_ID_ATTEMPTS: usize = 8;

/// 任务数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    /// 自由文本，默认 "medium"
    #[serde(default = "default_priority", deserialize_with = "lenient::priority")]
    pub priority: String,
    #[serde(default, deserialize_with = "lenient::completed")]
    pub completed: bool,
    /// 创建时间（毫秒精度，创建后不可变）
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

fn default_priority() -> String {
    DEFAULT_PRIORITY.to_string()
}

/// `createdAt` 以 `2024-01-02T03:04:05.678Z` 形式读写
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// 旧版数据文件里的字段没有做过类型校验（`completed` 可能是 null 或字符串，
/// `priority` 可能是 null 或数字），读取时逐字段归一化，不让一条记录废掉整个文件
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// 按 JS 真值规则转成 bool
    pub fn completed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(b) => b,
            Value::Null => false,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        })
    }

    /// null 视为未设置；其他非字符串值保留其 JSON 文本
    pub fn priority<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Null => super::default_priority(),
            other => other.to_string(),
        })
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }
}

/// 创建任务的输入
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

/// 按创建时间倒序（最新在前），时间相同保持插入顺序
pub fn sort_newest_first(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// 任务集合的读-改-写
///
/// 每个操作都是一次完整的 load → mutate → save，整个过程持有同一把锁，
/// 同一个 store 上的并发请求不会互相覆盖。
pub struct TaskStore {
    backend: Box<dyn TaskBackend>,
    ids: Box<dyn IdGenerator>,
    guard: Mutex<()>,
}

impl TaskStore {
    pub fn new(backend: impl TaskBackend + 'static) -> Self {
        Self::with_ids(backend, Box::new(UuidIds))
    }

    pub fn with_ids(backend: impl TaskBackend + 'static, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            backend: Box::new(backend),
            ids,
            guard: Mutex::new(()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.guard
            .lock()
            .map_err(|_| TaskError::storage("task store lock poisoned"))
    }

    /// 列出全部任务（最新在前）
    pub fn list(&self) -> Result<Vec<Task>> {
        let _guard = self.lock()?;
        let mut tasks = self.backend.load();
        sort_newest_first(&mut tasks);
        Ok(tasks)
    }

    /// 获取单个任务
    pub fn get(&self, id: &str) -> Result<Task> {
        let _guard = self.lock()?;
        self.backend
            .load()
            .into_iter()
            .find(|task| task.id == id)
            .ok_or_else(TaskError::task_not_found)
    }

    /// 创建任务
    pub fn create(&self, new_task: NewTask) -> Result<Task> {
        let title = new_task.title.trim();
        if title.is_empty() {
            return Err(TaskError::validation("Title required"));
        }

        let _guard = self.lock()?;
        let mut tasks = self.backend.load();

        let task = Task {
            id: self.unique_id(&tasks)?,
            title: title.to_string(),
            description: new_task
                .description
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            priority: new_task.priority.unwrap_or_else(default_priority),
            completed: false,
            created_at: Utc::now().trunc_subsecs(3),
        };

        tasks.push(task.clone());
        self.backend.save(&tasks)?;

        info!(id = %task.id, title = %task.title, "task created");
        Ok(task)
    }

    /// 设置完成状态
    pub fn set_completion(&self, id: &str, completed: bool) -> Result<Task> {
        let _guard = self.lock()?;
        let mut tasks = self.backend.load();

        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(TaskError::task_not_found)?;
        task.completed = completed;
        let updated = task.clone();

        self.backend.save(&tasks)?;

        debug!(id, completed, "task completion updated");
        Ok(updated)
    }

    /// 删除任务
    pub fn delete(&self, id: &str) -> Result<()> {
        let _guard = self.lock()?;
        let mut tasks = self.backend.load();

        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return Err(TaskError::task_not_found());
        }

        self.backend.save(&tasks)?;

        info!(id, "task deleted");
        Ok(())
    }

    fn unique_id(&self, tasks: &[Task]) -> Result<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            if !tasks.iter().any(|task| task.id == id) {
                return Ok(id);
            }
            debug!(id = %id, "generated id already in use, retrying");
        }
        Err(TaskError::storage("could not generate a unique task id"))
    }
}
