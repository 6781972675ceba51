//! One measured chat completion

use crate::error::BenchResult;
use crate::ollama::{ChatMessage, ChatResponse, OllamaClient};
use serde::{Deserialize, Serialize};

const NANOS_PER_SECOND: f64 = 1e9;

/// Result of one generation call, durations in seconds.
///
/// Only constructible from a wire [`ChatResponse`], so each duration is
/// divided by 1e9 exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub model: String,
    pub created_at: String,
    pub message: ChatMessage,
    pub done: bool,
    pub total_duration: f64,
    pub load_duration: f64,
    pub prompt_eval_count: u64,
    pub prompt_eval_duration: f64,
    pub eval_count: u64,
    pub eval_duration: f64,
}

impl GenerationResult {
    /// Generated tokens per second of generation time.
    ///
    /// `None` when the server reports zero eval duration.
    pub fn tokens_per_second(&self) -> Option<f64> {
        (self.eval_duration > 0.0).then(|| self.eval_count as f64 / self.eval_duration)
    }
}

impl From<ChatResponse> for GenerationResult {
    fn from(raw: ChatResponse) -> Self {
        let seconds = |nanos: u64| nanos as f64 / NANOS_PER_SECOND;
        Self {
            model: raw.model,
            created_at: raw.created_at,
            message: raw.message,
            done: raw.done,
            total_duration: seconds(raw.total_duration),
            load_duration: seconds(raw.load_duration),
            prompt_eval_count: raw.prompt_eval_count,
            prompt_eval_duration: seconds(raw.prompt_eval_duration),
            eval_count: raw.eval_count,
            eval_duration: seconds(raw.eval_duration),
        }
    }
}

/// Issue one non-streaming chat request and normalize its timings.
///
/// An empty prompt is valid; the session uses it to load the warm-up model.
/// Transport or schema failures propagate unchanged, with no retry.
pub async fn generate(
    client: &OllamaClient,
    prompt: &str,
    model: &str,
) -> BenchResult<GenerationResult> {
    let raw = client.chat(model, prompt).await?;
    Ok(GenerationResult::from(raw))
}
