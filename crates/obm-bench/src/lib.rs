//! # obm-bench
//!
//! Benchmark a local Ollama server across tiered model sizes.
//!
//! A session profiles the host, makes sure the benchmark models are
//! resident, warms the server up, then measures each tier the host has
//! memory for with four sequential chat completions. The resulting
//! [`BenchmarkReport`] can be submitted to a collector that scores it
//! against other devices.
//!
//! | Tier     | Model        | Runs when system memory |
//! |----------|--------------|-------------------------|
//! | baseline | `llama2:7b`  | always                  |
//! | second   | `llama2:13b` | > 13 GB                 |
//! | third    | `llama2:70b` | > 63 GB                 |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use obm_bench::{BenchConfig, BenchmarkSession, SysinfoInspector, SystemProfile, server_version};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), obm_bench::BenchError> {
//!     let config = BenchConfig::default();
//!     let version = server_version(&config.server_binary).await;
//!     let profile = SystemProfile::collect(&SysinfoInspector::new())?;
//!     let report = BenchmarkSession::new(config)?.run(version, profile).await?;
//!     println!("{} tiers measured", report.performance().len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod generation;
pub mod host;
pub mod ollama;
pub mod provision;
pub mod report;
pub mod runner;
pub mod session;
pub mod submit;
pub mod system;
pub mod tier;
pub mod units;
pub mod version;

pub use config::BenchConfig;
pub use error::{BenchError, BenchResult};
pub use generation::GenerationResult;
pub use host::SysinfoInspector;
pub use ollama::OllamaClient;
pub use report::BenchmarkReport;
pub use runner::TierResult;
pub use session::{BenchmarkSession, SubmissionOutcome, submit_with_consent};
pub use submit::{Score, ScoreCard, SubmissionClient};
pub use system::{HostInspector, SystemProfile};
pub use tier::{Tier, select_tiers};
pub use version::server_version;
