//! Web server CLI command

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use super::open_store;
use crate::api::{self, state::AppState};
use crate::error::Result;
use crate::storage::config::Config;
use crate::storage::memory::InMemoryBackend;
use crate::storage::tasks::TaskStore;

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,
    /// JSON data file
    #[arg(short, long)]
    pub file: Option<PathBuf>,
    /// Keep tasks in memory only (nothing is written to disk)
    #[arg(long, conflicts_with = "file")]
    pub in_memory: bool,
}

/// Execute the web server
pub async fn execute(args: ServeArgs, config: Config) -> Result<()> {
    let host = args.host.unwrap_or(config.server.host);
    let port = args.port.unwrap_or(config.server.port);

    let mut store_config = config.store;
    if let Some(file) = args.file {
        store_config.path = file;
    }

    let store = if args.in_memory {
        info!("in-memory mode, tasks will not be persisted");
        TaskStore::with_ids(InMemoryBackend::new(), store_config.ids.generator())
    } else {
        info!(path = %store_config.path.display(), "task file");
        open_store(&store_config)
    };

    api::start_server(&host, port, AppState::new(store)).await?;
    Ok(())
}
