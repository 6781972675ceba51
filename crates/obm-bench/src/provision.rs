//! Make sure a model is resident on the server before it is measured

use crate::error::{BenchError, BenchResult};
use crate::ollama::OllamaClient;
use tracing::info;

/// The only pull status treated as success.
const PULL_SUCCESS: &str = "success";

/// Ensure `model` is available on the server behind `client`.
///
/// Lists the resident models first and returns without side effects when
/// `model` is already there. Otherwise issues exactly one pull; any final
/// status other than `"success"` is a provisioning error. Pulls are never
/// retried.
pub async fn ensure_available(client: &OllamaClient, model: &str) -> BenchResult<()> {
    let resident = client.list_models().await?;
    if resident.iter().any(|name| name == model) {
        tracing::debug!(model, "model already resident");
        return Ok(());
    }

    info!("{model} is not on this system. Downloading first.");
    let pulled = client.pull(model).await?;

    match pulled.status.as_deref() {
        Some(PULL_SUCCESS) => {
            info!("Pulled {model}");
            Ok(())
        }
        other => Err(BenchError::Provisioning {
            model: model.to_string(),
            status: other
                .map(str::to_string)
                .or(pulled.error)
                .unwrap_or_else(|| "no status reported".to_string()),
        }),
    }
}
