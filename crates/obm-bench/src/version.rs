//! Version string of the inference server

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::process::Command;

pub const UNKNOWN_VERSION: &str = "unknown";

static SEMVER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\.\d+\.\d+").expect("semver pattern is valid"));

/// Run `<binary> --version` and extract the first `x.y.z` it prints.
///
/// Never fails: a missing executable or unrecognized output yields
/// `"unknown"`.
pub async fn server_version(binary: &str) -> String {
    match Command::new(binary).arg("--version").output().await {
        Ok(output) => parse_version(&String::from_utf8_lossy(&output.stdout)),
        Err(e) => {
            tracing::warn!(binary, error = %e, "could not run server binary for version");
            UNKNOWN_VERSION.to_string()
        }
    }
}

pub fn parse_version(text: &str) -> String {
    SEMVER
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_VERSION.to_string())
}
