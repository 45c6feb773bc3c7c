//! 命令行列出任务

use std::path::PathBuf;

use clap::Args;

use super::open_store;
use crate::error::Result;
use crate::storage::config::Config;
use crate::storage::tasks::Task;

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct ListArgs {
    /// JSON data file
    #[arg(short, long)]
    pub file: Option<PathBuf>,
    /// Print the raw JSON array
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: ListArgs, config: Config) -> Result<()> {
    let mut store_config = config.store;
    if let Some(file) = args.file {
        store_config.path = file;
    }

    let tasks = open_store(&store_config).list()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No tasks.");
    }
    for task in &tasks {
        println!("{}", format_task_line(task));
    }
    Ok(())
}

/// "[x] Buy milk (medium, 2024-01-02 03:04) <id>"
fn format_task_line(task: &Task) -> String {
    let mark = if task.completed { 'x' } else { ' ' };
    format!(
        "[{}] {} ({}, {}) {}",
        mark,
        task.title,
        task.priority,
        task.created_at.format("%Y-%m-%d %H:%M"),
        task.id
    )
}
