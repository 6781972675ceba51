//! The submission unit: everything measured in one run

use crate::runner::TierResult;
use crate::system::SystemProfile;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Version of this tool, as reported to the collector
pub const OBM_VERSION: &str = "0.0.1";

/// Score field value until the collector computes one
pub const SCORE_PLACEHOLDER: &str = "0";

/// Report sent to the collector.
///
/// Tier results can only be appended, in the order they were measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    testdate: String,
    ollamaversion: String,
    sysinfo: SystemProfile,
    performance: Vec<TierResult>,
    #[serde(rename = "OBMVersion")]
    obm_version: String,
    #[serde(rename = "OBMScore")]
    obm_score: String,
}

impl BenchmarkReport {
    /// Start a report stamped with the current time and no tier results.
    pub fn new(server_version: impl Into<String>, profile: SystemProfile) -> Self {
        Self {
            testdate: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            ollamaversion: server_version.into(),
            sysinfo: profile,
            performance: Vec::new(),
            obm_version: OBM_VERSION.to_string(),
            obm_score: SCORE_PLACEHOLDER.to_string(),
        }
    }

    /// Append the result of the next tier.
    pub fn record(&mut self, tier: TierResult) {
        self.performance.push(tier);
    }

    /// ISO-8601 timestamp of when the run started
    pub fn test_date(&self) -> &str {
        &self.testdate
    }

    pub fn server_version(&self) -> &str {
        &self.ollamaversion
    }

    pub fn system(&self) -> &SystemProfile {
        &self.sysinfo
    }

    pub fn performance(&self) -> &[TierResult] {
        &self.performance
    }

    pub fn tool_version(&self) -> &str {
        &self.obm_version
    }

    pub fn score(&self) -> &str {
        &self.obm_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::tests::result_with;
    use crate::system::{CpuInfo, MemoryInfo, OsInfo};

    fn profile() -> SystemProfile {
        SystemProfile {
            os: OsInfo {
                platform: "linux".into(),
                distro: "Debian GNU/Linux".into(),
                release: "12".into(),
                codename: "bookworm".into(),
            },
            cpu: CpuInfo {
                manufacturer: "GenuineIntel".into(),
                brand: "Intel(R) Core(TM) i7-12700K".into(),
                cores: 20,
            },
            mem: MemoryInfo { totalgb: 16 },
            gpu: vec![],
        }
    }

    fn tier(model: &str) -> TierResult {
        TierResult::from_runs(
            model,
            [
                result_with(10, 1.0),
                result_with(10, 1.0),
                result_with(10, 1.0),
                result_with(10, 1.0),
            ],
        )
    }

    #[test]
    fn test_new_report_defaults() {
        let report = BenchmarkReport::new("0.1.17", profile());
        assert_eq!(report.tool_version(), "0.0.1");
        assert_eq!(report.score(), "0");
        assert!(report.performance().is_empty());
        assert!(chrono::DateTime::parse_from_rfc3339(report.test_date()).is_ok());
    }

    #[test]
    fn test_tiers_keep_append_order() {
        let mut report = BenchmarkReport::new("0.1.17", profile());
        report.record(tier("llama2:7b"));
        report.record(tier("llama2:13b"));
        let models: Vec<_> = report.performance().iter().map(|t| t.model.as_str()).collect();
        assert_eq!(models, vec!["llama2:7b", "llama2:13b"]);
    }

    #[test]
    fn test_serialized_shape() {
        let mut report = BenchmarkReport::new("unknown", profile());
        report.record(tier("llama2:7b"));
        let json = serde_json::to_value(&report).unwrap();

        for key in ["testdate", "ollamaversion", "sysinfo", "performance", "OBMVersion", "OBMScore"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["ollamaversion"], "unknown");
        assert_eq!(json["OBMScore"], "0");
        assert_eq!(json["performance"][0]["averagetps"], 10.0);
        assert!(json["testdate"].as_str().unwrap().ends_with('Z'));
    }
}
