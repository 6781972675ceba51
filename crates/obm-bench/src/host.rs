//! Host inspection backed by `sysinfo` and platform GPU tools
//!
//! CPU, memory and OS facts come from `sysinfo`. Graphics controllers are
//! enumerated with the tool each platform ships:
//! `lspci` (plus `nvidia-smi` for NVIDIA VRAM) on Linux,
//! `system_profiler` on macOS and `Get-CimInstance` on Windows.
//!
//! Raw magnitudes are reported in the platform units expected by
//! [`crate::units`]: RAM in bytes and VRAM in MiB on Linux and Windows,
//! RAM in KiB and VRAM in GB on macOS.

use crate::error::{BenchError, BenchResult};
use crate::system::{HostInspector, RawGpu, RawHostFacts};
use crate::units::Platform;
use serde_json::Value;
use std::process::Command;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

/// Inspects the machine the process runs on.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoInspector;

impl SysinfoInspector {
    pub fn new() -> Self {
        Self
    }
}

impl HostInspector for SysinfoInspector {
    fn inspect(&self) -> BenchResult<RawHostFacts> {
        let platform = Platform::current()?;

        let mut sys = System::new_with_specifics(
            RefreshKind::new()
                .with_memory(MemoryRefreshKind::everything())
                .with_cpu(CpuRefreshKind::everything()),
        );
        sys.refresh_memory();

        let first_cpu = sys
            .cpus()
            .first()
            .ok_or_else(|| BenchError::HostQuery("no CPUs reported".to_string()))?;

        let total_bytes = sys.total_memory();
        if total_bytes == 0 {
            return Err(BenchError::HostQuery(
                "total memory reported as zero".to_string(),
            ));
        }
        let total_memory = match platform {
            Platform::Darwin => total_bytes / 1024,
            Platform::Linux | Platform::Windows => total_bytes,
        };

        let gpus = match platform {
            Platform::Linux => linux_gpus(),
            Platform::Darwin => darwin_gpus()?,
            Platform::Windows => windows_gpus(),
        };

        Ok(RawHostFacts {
            platform: platform.to_string(),
            distro: System::name().unwrap_or_else(System::distribution_id),
            release: System::os_version().unwrap_or_default(),
            codename: codename(platform),
            cpu_manufacturer: first_cpu.vendor_id().to_string(),
            cpu_brand: first_cpu.brand().trim().to_string(),
            cpu_cores: u32::try_from(sys.cpus().len()).unwrap_or(u32::MAX),
            total_memory,
            gpus,
        })
    }
}

// ============================================================================
// Platform probes
// ============================================================================

/// Stdout of a tool, or `None` when it is missing or exits non-zero.
fn tool_output(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        tracing::debug!(program, status = ?output.status, "host tool exited with failure");
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn linux_gpus() -> Vec<RawGpu> {
    let Some(listing) = tool_output("lspci", &["-mm"]) else {
        tracing::debug!("lspci unavailable; reporting no GPUs");
        return Vec::new();
    };
    let mut gpus = parse_lspci(&listing);

    // lspci carries no memory sizes; fill NVIDIA cards in enumeration order
    if let Some(smi) = tool_output(
        "nvidia-smi",
        &["--query-gpu=memory.total", "--format=csv,noheader,nounits"],
    ) {
        let mut vram = parse_nvidia_smi_memory(&smi).into_iter();
        for gpu in gpus.iter_mut().filter(|g| g.vendor.starts_with("NVIDIA")) {
            gpu.vram = vram.next();
        }
    }
    gpus
}

fn darwin_gpus() -> BenchResult<Vec<RawGpu>> {
    match tool_output("system_profiler", &["SPDisplaysDataType", "-json"]) {
        Some(json) => parse_system_profiler(&json),
        None => Ok(Vec::new()),
    }
}

fn windows_gpus() -> Vec<RawGpu> {
    let script = "Get-CimInstance Win32_VideoController | ForEach-Object { \"$($_.AdapterCompatibility)|$($_.Name)|$($_.AdapterRAM)\" }";
    tool_output("powershell", &["-NoProfile", "-Command", script])
        .map(|out| parse_windows_controllers(&out))
        .unwrap_or_default()
}

fn codename(platform: Platform) -> String {
    match platform {
        Platform::Linux => std::fs::read_to_string("/etc/os-release")
            .ok()
            .and_then(|content| parse_os_release_codename(&content))
            .unwrap_or_default(),
        Platform::Darwin | Platform::Windows => String::new(),
    }
}

// ============================================================================
// Output parsers
// ============================================================================

/// Parse `lspci -mm` output into display and 3D controllers.
///
/// Each line looks like
/// `01:00.0 "3D controller" "NVIDIA Corporation" "Device 20b0" -ra1 "NVIDIA Corporation" "Device 145f"`.
fn parse_lspci(listing: &str) -> Vec<RawGpu> {
    listing
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split('"').skip(1).step_by(2).collect();
            let [class, vendor, device, ..] = fields.as_slice() else {
                return None;
            };
            let is_gpu = class.contains("VGA") || class.contains("3D") || class.contains("Display");
            is_gpu.then(|| RawGpu {
                vendor: vendor.to_string(),
                model: device.to_string(),
                vram: None,
                cores: None,
            })
        })
        .collect()
}

/// One MiB figure per line, as printed by `nvidia-smi --query-gpu=memory.total`.
fn parse_nvidia_smi_memory(output: &str) -> Vec<f64> {
    output
        .lines()
        .filter_map(|line| line.trim().parse::<f64>().ok())
        .collect()
}

/// Parse `AdapterCompatibility|Name|AdapterRAM` lines; AdapterRAM is in bytes.
fn parse_windows_controllers(output: &str) -> Vec<RawGpu> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let mut parts = line.trim().splitn(3, '|');
            let vendor = parts.next()?.trim().to_string();
            let model = parts.next()?.trim().to_string();
            let vram = parts
                .next()
                .and_then(|ram| ram.trim().parse::<f64>().ok())
                .map(|bytes| bytes / (1024.0 * 1024.0));
            Some(RawGpu {
                vendor,
                model,
                vram,
                cores: None,
            })
        })
        .collect()
}

/// Parse `system_profiler SPDisplaysDataType -json`.
///
/// Discrete cards report `spdisplays_vram` such as `"8 GB"`; Apple silicon
/// reports none and relies on the unified-memory fallback.
fn parse_system_profiler(json: &str) -> BenchResult<Vec<RawGpu>> {
    let root: Value = serde_json::from_str(json)
        .map_err(|e| BenchError::HostQuery(format!("system_profiler output: {e}")))?;

    let controllers = root
        .get("SPDisplaysDataType")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    Ok(controllers
        .iter()
        .map(|c| {
            let text = |key: &str| c.get(key).and_then(Value::as_str).unwrap_or_default();
            let vendor = text("spdisplays_vendor")
                .trim_start_matches("sppci_vendor_")
                .to_string();
            let vram = ["spdisplays_vram", "spdisplays_vram_shared"]
                .iter()
                .find_map(|key| parse_gb_label(text(key)));
            RawGpu {
                vendor,
                model: text("sppci_model").to_string(),
                vram,
                cores: text("sppci_cores").parse().ok(),
            }
        })
        .collect())
}

/// `"8 GB"` → 8.0, `"1536 MB"` → 1.5
fn parse_gb_label(label: &str) -> Option<f64> {
    let mut parts = label.split_whitespace();
    let value: f64 = parts.next()?.parse().ok()?;
    match parts.next()? {
        "GB" => Some(value),
        "MB" => Some(value / 1024.0),
        _ => None,
    }
}

fn parse_os_release_codename(content: &str) -> Option<String> {
    content
        .lines()
        .find_map(|line| line.strip_prefix("VERSION_CODENAME="))
        .map(|value| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

// ============================================================================
// Tests
// ============================================================================
