//! 任务 ID 生成

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 唯一 ID 生成能力
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// 随机 UUID v4（默认）
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// 毫秒时间戳 ID，兼容旧版数据文件
///
/// 同一毫秒内的多次调用会顺延到 `last + 1`，保证进程内不重复。
#[derive(Debug, Default)]
pub struct TimestampIds {
    last: AtomicU64,
}

impl TimestampIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for TimestampIds {
    fn next_id(&self) -> String {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let next = now.max(last + 1);
            match self
                .last
                .compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return next.to_string(),
                Err(actual) => last = actual,
            }
        }
    }
}

/// 配置文件中的 ID 方案
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    #[default]
    Uuid,
    Timestamp,
}

impl IdScheme {
    pub fn generator(self) -> Box<dyn IdGenerator> {
        match self {
            IdScheme::Uuid => Box::new(UuidIds),
            IdScheme::Timestamp => Box::new(TimestampIds::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uuid_ids_are_valid_uuids() {
        let id = UuidIds.next_id();
        assert!(Uuid::parse_str(&id).is_ok());
        assert_ne!(id, UuidIds.next_id());
    }

    #[test]
    fn test_timestamp_ids_strictly_increase() {
        let ids = TimestampIds::new();
        let values: Vec<u64> = (0..1000)
            .map(|_| ids.next_id().parse().unwrap())
            .collect();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_timestamp_ids_start_near_now() {
        let before = Utc::now().timestamp_millis() as u64;
        let id: u64 = TimestampIds::new().next_id().parse().unwrap();
        assert!(id >= before);
    }

    #[test]
    fn test_timestamp_ids_unique_across_threads() {
        let ids = std::sync::Arc::new(TimestampIds::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = ids.clone();
                std::thread::spawn(move || (0..250).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 1000);
    }

    #[test]
    fn test_id_scheme_parse() {
        #[derive(Deserialize)]
        struct Wrapper {
            ids: IdScheme,
        }
        let w: Wrapper = toml::from_str(r#"ids = "timestamp""#).unwrap();
        assert_eq!(w.ids, IdScheme::Timestamp);
        assert_eq!(IdScheme::default(), IdScheme::Uuid);
    }
}
