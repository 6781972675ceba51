//! obm - benchmark a local Ollama server and share the results

mod cli;
mod commands;
mod config;
mod error;
mod render;

use clap::Parser;
use cli::{Cli, Commands, RunArgs};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; progress lines are info events on stderr
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(cli.verbose)
        .init();

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Some(Commands::Sysinfo { json }) => commands::sysinfo::run(json),
        Some(Commands::Run(args)) => rt.block_on(run_benchmark(cli.config.as_deref(), args)),
        None => rt.block_on(run_benchmark(cli.config.as_deref(), RunArgs::default())),
    }
}

async fn run_benchmark(config_path: Option<&std::path::Path>, args: RunArgs) -> anyhow::Result<()> {
    let loaded = config::load(config_path)?;
    let bench_config = config::apply_overrides(loaded, &args)?;
    tracing::debug!(host = %bench_config.host, collector = %bench_config.collector_url, "configuration loaded");
    commands::run::run(bench_config, &args).await
}
