//! Configuration for a benchmark session

use crate::error::{BenchError, BenchResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_HOST: &str = "http://127.0.0.1:11434";
pub const DEFAULT_COLLECTOR: &str = "https://obm.tvl.st/api/postbm";
pub const DEFAULT_PROMPT: &str = "Why is the sky blue?";

/// Settings shared by every stage of a benchmark session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Base URL of the inference server
    pub host: String,

    /// Endpoint receiving the finished report
    pub collector_url: String,

    /// Prompt sent on every measured run
    pub prompt: String,

    /// Model pulled at startup and used for the warm-up call
    pub warmup_model: String,

    /// Name the warm-up call addresses the warm-up model by
    pub warmup_alias: String,

    /// Server executable queried for its version
    pub server_binary: String,

    /// Uniform timeout for every HTTP request.
    /// If None, requests wait as long as the server takes.
    pub request_timeout_secs: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            collector_url: DEFAULT_COLLECTOR.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            warmup_model: "orca-mini:latest".to_string(),
            warmup_alias: "orca-mini".to_string(),
            server_binary: "ollama".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl BenchConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    pub fn with_collector(mut self, url: impl Into<String>) -> Self {
        self.collector_url = url.into();
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_server_binary(mut self, binary: impl Into<String>) -> Self {
        self.server_binary = binary.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, secs: u64) -> BenchResult<Self> {
        if secs == 0 {
            return Err(BenchError::Configuration(
                "request_timeout_secs must be > 0".to_string(),
            ));
        }
        self.request_timeout_secs = Some(secs);
        Ok(self)
    }

    /// Check that URLs parse and the host has a usable scheme.
    pub fn validate(&self) -> BenchResult<()> {
        for (field, value) in [("host", &self.host), ("collector_url", &self.collector_url)] {
            let url = reqwest::Url::parse(value).map_err(|e| {
                BenchError::Configuration(format!("{field} '{value}' is not a valid URL: {e}"))
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(BenchError::Configuration(format!(
                    "{field} must use http or https, got '{}'",
                    url.scheme()
                )));
            }
        }
        if self.request_timeout_secs == Some(0) {
            return Err(BenchError::Configuration(
                "request_timeout_secs must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Host without a trailing slash, ready for path concatenation
    pub fn host_base(&self) -> &str {
        self.host.trim_end_matches('/')
    }

    /// HTTP client applying the configured timeout to every request.
    pub fn http_client(&self) -> BenchResult<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = self.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder.build()?)
    }
}

// ============================================================================
// Tests
// ============================================================================
