//! Four-run measurement of a single model

use crate::error::BenchResult;
use crate::generation::{GenerationResult, generate};
use crate::ollama::OllamaClient;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Number of measured calls per model
pub const RUNS_PER_TIER: usize = 4;

/// Measurements for one tier, runs in issuance order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierResult {
    pub model: String,
    #[serde(rename = "firstgen")]
    pub first: GenerationResult,
    #[serde(rename = "secondgen")]
    pub second: GenerationResult,
    #[serde(rename = "thirdgen")]
    pub third: GenerationResult,
    #[serde(rename = "fourthgen")]
    pub fourth: GenerationResult,
    /// Unweighted mean of the four per-run tokens per second.
    /// `None` (serialized as `null`) when any run reported zero eval time.
    #[serde(rename = "averagetps")]
    pub average_tokens_per_second: Option<f64>,
}

impl TierResult {
    /// Build a result from four runs, computing the average throughput.
    pub fn from_runs(model: impl Into<String>, runs: [GenerationResult; RUNS_PER_TIER]) -> Self {
        let average_tokens_per_second = average_tokens_per_second(&runs);
        let [first, second, third, fourth] = runs;
        Self {
            model: model.into(),
            first,
            second,
            third,
            fourth,
            average_tokens_per_second,
        }
    }

    pub fn runs(&self) -> [&GenerationResult; RUNS_PER_TIER] {
        [&self.first, &self.second, &self.third, &self.fourth]
    }
}

/// Arithmetic mean of each run's `eval_count / eval_duration`.
///
/// Every run weighs the same regardless of how many tokens it produced;
/// this is not total tokens over total time. Undefined if any run is.
pub fn average_tokens_per_second(runs: &[GenerationResult]) -> Option<f64> {
    let sum = runs
        .iter()
        .map(GenerationResult::tokens_per_second)
        .sum::<Option<f64>>()?;
    Some(sum / runs.len() as f64)
}

/// Console line printed after each measured run.
pub fn progress_line(ordinal: &str, model: &str, result: &GenerationResult) -> String {
    let tps = match result.tokens_per_second() {
        Some(tps) => format!("{tps:.2}"),
        None => "undefined".to_string(),
    };
    format!(
        "{ordinal} run of {model} took {:.2} seconds to load then {:.2} seconds to evaluate with {tps} tokens per second",
        result.load_duration, result.eval_duration
    )
}

/// Measure `model` with four strictly sequential calls.
///
/// Calls are never overlapped: concurrent requests against the same server
/// would contend for compute and skew load and eval timings. Any failed
/// call aborts the tier without retry.
pub async fn run(client: &OllamaClient, prompt: &str, model: &str) -> BenchResult<TierResult> {
    let runs = [
        measure(client, prompt, model, "First").await?,
        measure(client, prompt, model, "Second").await?,
        measure(client, prompt, model, "Third").await?,
        measure(client, prompt, model, "Fourth").await?,
    ];

    let tier = TierResult::from_runs(model, runs);
    match tier.average_tokens_per_second {
        Some(avg) => info!("Average Tokens per Second for {model} is {avg:.2}\n"),
        None => warn!("Average Tokens per Second for {model} is undefined: a run reported zero eval duration\n"),
    }
    Ok(tier)
}

async fn measure(
    client: &OllamaClient,
    prompt: &str,
    model: &str,
    ordinal: &str,
) -> BenchResult<GenerationResult> {
    let result = generate(client, prompt, model).await?;
    info!("{}", progress_line(ordinal, model, &result));
    Ok(result)
}
