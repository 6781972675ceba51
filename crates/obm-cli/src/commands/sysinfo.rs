//! `obm sysinfo` command implementation

use crate::render;
use obm_bench::{SysinfoInspector, SystemProfile};

/// Execute the `obm sysinfo` command
pub fn run(json: bool) -> anyhow::Result<()> {
    let profile = SystemProfile::collect(&SysinfoInspector::new())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        for line in render::profile_lines(&profile) {
            println!("{line}");
        }
    }
    Ok(())
}
