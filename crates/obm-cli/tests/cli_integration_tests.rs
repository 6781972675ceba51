//! Integration tests for the `obm` binary against mock servers.

#![cfg(test)]
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::str::contains;
use serde_json::{Value, json};
use std::fs;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn obm() -> Command {
    let mut cmd = Command::cargo_bin("obm").expect("obm bin");
    for var in ["OBM_HOST", "OBM_COLLECTOR_URL", "OBM_PROMPT", "RUST_LOG"] {
        cmd.env_remove(var);
    }
    // keep the real user config out of the picture
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir().join("obm-cli-tests-no-config"));
    cmd
}

/// Ollama mock with every benchmark model resident and a fixed chat answer.
async fn ollama_mock() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                {"name": "orca-mini:latest"},
                {"name": "llama2:7b"},
                {"name": "llama2:13b"},
                {"name": "llama2:70b"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/pull"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama2:7b",
            "created_at": "2024-01-01T00:00:00Z",
            "message": {"role": "assistant", "content": "Rayleigh scattering."},
            "done": true,
            "total_duration": 3_000_000_000u64,
            "load_duration": 500_000_000u64,
            "prompt_eval_count": 26,
            "prompt_eval_duration": 200_000_000u64,
            "eval_count": 90,
            "eval_duration": 3_000_000_000u64
        })))
        .mount(&server)
        .await;
    server
}

async fn collector_mock(expected_posts: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/postbm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "OBMScore": {"obmscore": 150, "obm7": 150, "obm13": 0, "obm70": 0}
        })))
        .expect(expected_posts)
        .mount(&server)
        .await;
    server
}

#[test]
fn help_lists_commands() {
    obm()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("run"))
        .stdout(contains("sysinfo"));
}

#[test]
fn sysinfo_json_reports_memory() {
    let output = obm()
        .args(["sysinfo", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: Value = serde_json::from_slice(&output).expect("valid json output");
    assert!(value["mem"]["totalgb"].as_u64().is_some());
    assert!(value["gpu"].is_array());
}

#[test]
fn invalid_host_fails_before_benchmarking() {
    obm()
        .args(["run", "--host", "11434", "--no-submit"])
        .assert()
        .failure()
        .stderr(contains("not a valid URL"));
}

#[test]
fn missing_config_file_fails() {
    obm()
        .args(["--config", "/nonexistent/obm.toml", "run", "--no-submit"])
        .assert()
        .failure()
        .stderr(contains("Config file not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn run_json_prints_report_without_submitting() {
    let ollama = ollama_mock().await;
    let collector = collector_mock(0).await;
    let host = ollama.uri();
    let endpoint = format!("{}/api/postbm", collector.uri());

    let output = tokio::task::spawn_blocking(move || {
        obm()
            .args(["run", "--no-submit", "--json", "--host", &host, "--collector", &endpoint])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    })
    .await
    .unwrap();

    let report: Value = serde_json::from_slice(&output).expect("report json on stdout");
    let performance = report["performance"].as_array().expect("performance array");
    assert!(!performance.is_empty());
    assert_eq!(performance[0]["model"], "llama2:7b");
    assert_eq!(performance[0]["averagetps"], 30.0);
    assert_eq!(report["OBMScore"], "0");
    assert_eq!(report["OBMVersion"], "0.0.1");
}

#[tokio::test(flavor = "multi_thread")]
async fn non_tty_consent_counts_as_decline() {
    let ollama = ollama_mock().await;
    let collector = collector_mock(0).await;
    let host = ollama.uri();
    let endpoint = format!("{}/api/postbm", collector.uri());

    // no terminal attached, so the prompt cannot be shown
    tokio::task::spawn_blocking(move || {
        obm()
            .args(["run", "--host", &host, "--collector", &endpoint])
            .assert()
            .success()
            .stderr(contains("not submitting"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn yes_submits_and_prints_score() {
    let ollama = ollama_mock().await;
    let collector = collector_mock(1).await;
    let host = ollama.uri();
    let endpoint = format!("{}/api/postbm", collector.uri());

    tokio::task::spawn_blocking(move || {
        obm()
            .args(["run", "--yes", "--host", &host, "--collector", &endpoint])
            .assert()
            .success()
            .stdout(contains("Your OBMScore is"))
            .stdout(contains("llama2:7b OBMScore: 150"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn config_file_supplies_host() {
    let ollama = ollama_mock().await;
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("obm.toml");
    fs::write(
        &config_path,
        format!("host = \"{}\"\nprompt = \"Why is the sea salty?\"\n", ollama.uri()),
    )
    .unwrap();

    tokio::task::spawn_blocking(move || {
        obm()
            .arg("--config")
            .arg(&config_path)
            .args(["run", "--no-submit"])
            .assert()
            .success()
            .stderr(contains(
                "First run of llama2:7b took 0.50 seconds to load then 3.00 seconds to evaluate with 30.00 tokens per second",
            ))
            .stderr(contains(
                "Fourth run of llama2:7b took 0.50 seconds to load then 3.00 seconds to evaluate with 30.00 tokens per second",
            ))
            .stderr(contains("Average Tokens per Second for llama2:7b is 30.00"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_submission_still_exits_successfully() {
    let ollama = ollama_mock().await;
    let collector = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/postbm"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&collector)
        .await;
    let host = ollama.uri();
    let endpoint = format!("{}/api/postbm", collector.uri());

    tokio::task::spawn_blocking(move || {
        obm()
            .args(["run", "--yes", "--host", &host, "--collector", &endpoint])
            .assert()
            .success()
            .stderr(contains("Could not submit results"));
    })
    .await
    .unwrap();
}
