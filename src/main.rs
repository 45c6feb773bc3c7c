use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use taskd::cli::{self, serve::ServeArgs, Cli, Commands};
use taskd::{error, storage};

fn main() {
    init_tracing();

    // 解析命令行参数
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    // RUST_LOG 优先，默认 info；日志写 stderr，stdout 留给 `list` 输出
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn run(cli: Cli) -> error::Result<()> {
    let config = storage::config::load_config(cli.config.as_deref())?;

    // 无子命令：启动 HTTP 服务
    match cli.command.unwrap_or_else(|| Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(cli::serve::execute(args, config))
        }
        Commands::List(args) => cli::list::execute(args, config),
    }
}
