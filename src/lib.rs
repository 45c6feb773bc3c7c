//! taskd: a task list served over HTTP, persisted as one JSON file.

pub mod api;
pub mod cli;
pub mod error;
pub mod storage;
