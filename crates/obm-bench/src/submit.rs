//! Best-effort upload of a finished report to the collector

use crate::config::BenchConfig;
use crate::error::BenchResult;
use crate::ollama::decode;
use crate::report::BenchmarkReport;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// A score as returned by the collector, which may send numbers or strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Number(f64),
    Text(String),
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Number(n) => write!(f, "{n}"),
            Score::Text(s) => f.write_str(s),
        }
    }
}

/// Composite score and one component per tier.
///
/// Tiers that were not run may come back null or be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub obmscore: Score,
    #[serde(default)]
    pub obm7: Option<Score>,
    #[serde(default)]
    pub obm13: Option<Score>,
    #[serde(default)]
    pub obm70: Option<Score>,
}

#[derive(Debug, Deserialize)]
struct SubmissionResponse {
    #[serde(rename = "OBMScore")]
    score: ScoreCard,
}

/// Posts reports to a collector endpoint.
///
/// Callers must only submit after explicit user consent. Failures are not
/// retried and leave the local report untouched.
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    endpoint: String,
    client: reqwest::Client,
}

impl SubmissionClient {
    pub fn new(config: &BenchConfig) -> BenchResult<Self> {
        Ok(Self {
            endpoint: config.collector_url.clone(),
            client: config.http_client()?,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[instrument(skip(self, report), fields(endpoint = %self.endpoint, tiers = report.performance().len()))]
    pub async fn submit(&self, report: &BenchmarkReport) -> BenchResult<ScoreCard> {
        let response = self.client.post(&self.endpoint).json(report).send().await?;
        let parsed: SubmissionResponse = decode("/api/postbm", response).await?;
        debug!(score = %parsed.score.obmscore, "collector accepted report");
        Ok(parsed.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BenchError;
    use crate::system::{CpuInfo, MemoryInfo, OsInfo, SystemProfile};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn report() -> BenchmarkReport {
        BenchmarkReport::new(
            "0.1.20",
            SystemProfile {
                os: OsInfo {
                    platform: "darwin".into(),
                    distro: "macOS".into(),
                    release: "14.2".into(),
                    codename: "Sonoma".into(),
                },
                cpu: CpuInfo {
                    manufacturer: "Apple".into(),
                    brand: "M2 Max".into(),
                    cores: 12,
                },
                mem: MemoryInfo { totalgb: 64 },
                gpu: vec![],
            },
        )
    }

    fn client(server: &MockServer) -> SubmissionClient {
        let config = BenchConfig::default().with_collector(format!("{}/api/postbm", server.uri()));
        SubmissionClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_submit_parses_score_card() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/postbm"))
            .and(body_partial_json(json!({"ollamaversion": "0.1.20", "OBMScore": "0"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "OBMScore": {"obmscore": 212.5, "obm7": 120, "obm13": "70.5", "obm70": null}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let card = client(&server).submit(&report()).await.unwrap();
        assert_eq!(card.obmscore, Score::Number(212.5));
        assert_eq!(card.obm7, Some(Score::Number(120.0)));
        assert_eq!(card.obm13.as_ref().map(ToString::to_string).as_deref(), Some("70.5"));
        assert_eq!(card.obm70, None);
    }

    #[tokio::test]
    async fn test_submit_rejects_unexpected_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/postbm"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let err = client(&server).submit(&report()).await.unwrap_err();
        assert!(matches!(err, BenchError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_submit_surfaces_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/postbm"))
            .respond_with(ResponseTemplate::new(502))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server).submit(&report()).await.unwrap_err();
        assert!(matches!(err, BenchError::HttpStatus { status: 502, .. }));
    }
}
