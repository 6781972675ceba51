//! The benchmark pipeline
//!
//! Stages run strictly in order, each awaited before the next starts:
//! provision the warm-up and baseline models, discard cold-start effects
//! with a warm-up call, then measure every tier the host has memory for,
//! appending each result to the report as it completes.

use crate::config::BenchConfig;
use crate::error::{BenchError, BenchResult};
use crate::generation::generate;
use crate::ollama::OllamaClient;
use crate::provision::ensure_available;
use crate::report::BenchmarkReport;
use crate::runner;
use crate::submit::{ScoreCard, SubmissionClient};
use crate::system::SystemProfile;
use crate::tier::{Tier, select_tiers};
use tracing::info;

/// One benchmark run against one inference server
pub struct BenchmarkSession {
    config: BenchConfig,
    client: OllamaClient,
}

impl BenchmarkSession {
    pub fn new(config: BenchConfig) -> BenchResult<Self> {
        config.validate()?;
        let client = OllamaClient::new(&config)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Execute the whole pipeline and return the finished report.
    ///
    /// `server_version` and `profile` are captured once by the caller at
    /// startup. Any failure aborts the run and discards tiers measured so far.
    pub async fn run(&self, server_version: String, profile: SystemProfile) -> BenchResult<BenchmarkReport> {
        let tiers = select_tiers(profile.total_memory_gb());

        info!("Ensuring models are loaded");
        ensure_available(&self.client, &self.config.warmup_model).await?;
        ensure_available(&self.client, Tier::Baseline.model()).await?;

        info!("Loading {} to reset", self.config.warmup_alias);
        generate(&self.client, "", &self.config.warmup_alias).await?;

        let mut report = BenchmarkReport::new(server_version, profile);
        for tier in tiers {
            if tier != Tier::Baseline {
                ensure_available(&self.client, tier.model()).await?;
            }
            info!("Loading {}", tier.model());
            let result = runner::run(&self.client, &self.config.prompt, tier.model()).await?;
            report.record(result);
        }
        Ok(report)
    }
}

/// What happened after the benchmark finished
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// The user did not consent; nothing was sent
    Declined,
    Submitted(ScoreCard),
    /// The upload failed; the local report is still complete
    Failed(BenchError),
}

/// Ask for consent and, only if given, submit the report once.
pub async fn submit_with_consent<F>(
    report: &BenchmarkReport,
    submitter: &SubmissionClient,
    consent: F,
) -> SubmissionOutcome
where
    F: FnOnce(&str) -> bool,
{
    if !consent(submitter.endpoint()) {
        info!("Submission declined; report kept locally");
        return SubmissionOutcome::Declined;
    }

    match submitter.submit(report).await {
        Ok(card) => SubmissionOutcome::Submitted(card),
        Err(e) => {
            tracing::warn!(error = %e, "report submission failed");
            SubmissionOutcome::Failed(e)
        }
    }
}
