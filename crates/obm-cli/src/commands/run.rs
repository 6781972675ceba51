//! `obm run` command implementation
//!
//! Profiles the host, runs the benchmark session and, with consent, submits
//! the report. Human-readable output goes to stderr when `--json` reserves
//! stdout for the report.

use crate::cli::RunArgs;
use crate::render;
use colored::Colorize;
use dialoguer::Confirm;
use obm_bench::{
    BenchConfig, BenchmarkSession, SubmissionClient, SubmissionOutcome, SysinfoInspector,
    SystemProfile, server_version, submit_with_consent,
};

/// Execute the `obm run` command
pub async fn run(config: BenchConfig, args: &RunArgs) -> anyhow::Result<()> {
    let say = |line: &str| {
        if args.json {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    };

    let version = server_version(&config.server_binary).await;
    let profile = SystemProfile::collect(&SysinfoInspector::new())?;

    for line in render::profile_lines(&profile) {
        say(&line);
    }
    say(&format!("Using Ollama version: {}", version.cyan()));

    let session = BenchmarkSession::new(config.clone())?;
    let report = session.run(version, profile).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if args.no_submit {
        tracing::debug!("submission disabled by --no-submit");
        return Ok(());
    }

    let submitter = SubmissionClient::new(&config)?;
    let outcome = submit_with_consent(&report, &submitter, |endpoint| {
        args.yes || ask_consent(endpoint)
    })
    .await;

    match outcome {
        SubmissionOutcome::Submitted(card) => {
            for line in render::score_lines(&card) {
                say(&line);
            }
        }
        SubmissionOutcome::Failed(e) => {
            eprintln!("{} {e}", "Could not submit results:".red());
        }
        SubmissionOutcome::Declined => {}
    }
    Ok(())
}

/// Yes/no prompt; anything but an explicit yes, including a prompt that
/// cannot be shown, counts as no.
fn ask_consent(endpoint: &str) -> bool {
    let prompt = format!(
        "Do you approve to send the output from this command to {} to share with everyone? No personal info is included",
        render::endpoint_host(endpoint)
    );
    match Confirm::new().with_prompt(prompt).default(false).interact() {
        Ok(approved) => approved,
        Err(e) => {
            tracing::warn!(error = %e, "could not ask for consent; not submitting");
            false
        }
    }
}
