//! Minimal client for the Ollama HTTP API
//!
//! Only the three endpoints the benchmark needs are covered:
//! `GET /api/tags`, `POST /api/pull` and `POST /api/chat`, all non-streaming.
//! Durations in chat responses stay in nanoseconds here; conversion happens
//! once in [`crate::generation`].

use crate::config::BenchConfig;
use crate::error::{BenchError, BenchResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

#[derive(Debug, Clone, Deserialize)]
pub struct TagsResponse {
    pub models: Vec<LocalModel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalModel {
    pub name: String,
}

#[derive(Debug, Serialize)]
struct PullRequest<'a> {
    name: &'a str,
    stream: bool,
}

/// Final pull status. Failed pulls carry `error` instead of `status`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
}

/// Chat response exactly as it comes off the wire; durations in nanoseconds.
///
/// `eval_count` and `eval_duration` are required. The server omits the
/// prompt counters when the prompt was served from cache, so those default
/// to zero.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub model: String,
    #[serde(default)]
    pub created_at: String,
    pub message: ChatMessage,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub total_duration: u64,
    #[serde(default)]
    pub load_duration: u64,
    #[serde(default)]
    pub prompt_eval_count: u64,
    #[serde(default)]
    pub prompt_eval_duration: u64,
    pub eval_count: u64,
    pub eval_duration: u64,
}

/// Handle on one inference server
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    client: reqwest::Client,
}

impl OllamaClient {
    pub fn new(config: &BenchConfig) -> BenchResult<Self> {
        Ok(Self {
            base_url: config.host_base().to_string(),
            client: config.http_client()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Names of the models resident on the server.
    #[instrument(skip(self), fields(host = %self.base_url))]
    pub async fn list_models(&self) -> BenchResult<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self.client.get(&url).send().await?;
        let tags: TagsResponse = decode("/api/tags", response).await?;
        debug!(count = tags.models.len(), "listed local models");
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Ask the server to pull `model` and wait for the final status.
    ///
    /// The body is returned whatever the HTTP status, because a failed pull
    /// reports its reason in the JSON `error` field.
    #[instrument(skip(self), fields(host = %self.base_url))]
    pub async fn pull(&self, model: &str) -> BenchResult<PullResponse> {
        let url = format!("{}/api/pull", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&PullRequest {
                name: model,
                stream: false,
            })
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(http_status = status.as_u16(), "pull finished");
        serde_json::from_str(&body).map_err(|e| BenchError::MalformedResponse {
            endpoint: "/api/pull".to_string(),
            reason: format!("{e} (HTTP {status}, body: {body})"),
        })
    }

    /// Single-turn, non-streaming chat completion.
    #[instrument(skip(self, prompt), fields(host = %self.base_url, prompt_len = prompt.len()))]
    pub async fn chat(&self, model: &str, prompt: &str) -> BenchResult<ChatResponse> {
        let url = format!("{}/api/chat", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&ChatRequest {
                model,
                messages: vec![ChatMessage::user(prompt)],
                stream: false,
            })
            .send()
            .await?;
        decode("/api/chat", response).await
    }
}

/// Reject non-2xx statuses, then parse the body against `T`.
pub(crate) async fn decode<T: DeserializeOwned>(
    endpoint: &str,
    response: reqwest::Response,
) -> BenchResult<T> {
    let url = response.url().to_string();
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(BenchError::HttpStatus {
            url,
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| BenchError::MalformedResponse {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })
}

// ============================================================================
// Tests
// ============================================================================
