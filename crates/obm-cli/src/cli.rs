//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// obm - Benchmark a local Ollama server across model sizes
#[derive(Parser)]
#[command(name = "obm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the benchmark (default)
    Run(RunArgs),

    /// Show the system profile that would be reported
    Sysinfo {
        /// Print the profile as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Ollama server URL
    #[arg(long)]
    pub host: Option<String>,

    /// Collector endpoint receiving the report
    #[arg(long)]
    pub collector: Option<String>,

    /// Prompt used for every measured run
    #[arg(long)]
    pub prompt: Option<String>,

    /// Submit the report without asking
    #[arg(short, long, conflicts_with = "no_submit")]
    pub yes: bool,

    /// Never submit and never ask
    #[arg(long)]
    pub no_submit: bool,

    /// Print the finished report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}
