//! CLI 模块

pub mod list;
pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::storage::config::StoreConfig;
use crate::storage::json_file::JsonFileBackend;
use crate::storage::tasks::TaskStore;

#[derive(Parser, Debug)]
#[command(name = "taskd")]
#[command(version)]
#[command(about = "Task list HTTP service backed by a single JSON file")]
pub struct Cli {
    /// Config file (default: <config_dir>/taskd/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP API server (default)
    Serve(serve::ServeArgs),
    /// Print all tasks, newest first
    List(list::ListArgs),
}

/// 打开配置中的 JSON 数据文件
pub fn open_store(store: &StoreConfig) -> TaskStore {
    TaskStore::with_ids(JsonFileBackend::new(&store.path), store.ids.generator())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["taskd"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from([
            "taskd", "serve", "--port", "8080", "--host", "127.0.0.1", "--file", "/tmp/t.json",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Serve(serve::ServeArgs {
                port: Some(8080),
                host: Some("127.0.0.1".to_string()),
                file: Some(PathBuf::from("/tmp/t.json")),
                in_memory: false,
            }))
        );
    }

    #[test]
    fn test_parse_list_with_global_config() {
        let cli = Cli::try_parse_from(["taskd", "list", "--json", "--config", "taskd.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("taskd.toml")));
        assert_eq!(
            cli.command,
            Some(Commands::List(list::ListArgs {
                file: None,
                json: true,
            }))
        );
    }

    #[test]
    fn test_open_store_uses_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            path: dir.path().join("tasks.json"),
            ..StoreConfig::default()
        };

        let store = open_store(&config);
        store
            .create(crate::storage::tasks::NewTask::new("hello"))
            .unwrap();
        assert!(config.path.exists());
    }
}
