//! System profile of the benchmarked host
//!
//! The profile is built once per run from raw facts supplied by a
//! [`HostInspector`] and is never mutated afterwards. Raw memory magnitudes
//! arrive in the platform's native units and are normalized here.

use crate::error::BenchResult;
use crate::units::{MemoryKind, Platform};
use serde::{Deserialize, Serialize};

/// Generic PCI identifiers that should be reported under their marketing name.
const GPU_NAME_REMAP: &[(&str, &str)] = &[(
    "NVIDIA Corporation Device 20b0",
    "NVIDIA Corporation Device A100",
)];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsInfo {
    pub platform: String,
    pub distro: String,
    pub release: String,
    pub codename: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuInfo {
    pub manufacturer: String,
    pub brand: String,
    pub cores: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryInfo {
    /// Total system memory in whole gigabytes
    pub totalgb: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuInfo {
    /// Vendor and model label, remapped for known generic device ids
    pub gpu: String,
    /// Dedicated VRAM in GB, or total system memory for unified memory
    pub vram: f64,
    /// Reported GPU cores, 0 when unknown
    pub cores: u32,
}

/// Immutable description of the host, captured once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemProfile {
    pub os: OsInfo,
    pub cpu: CpuInfo,
    pub mem: MemoryInfo,
    pub gpu: Vec<GpuInfo>,
}

/// One graphics controller as reported by the host, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGpu {
    pub vendor: String,
    pub model: String,
    /// VRAM in the platform's native unit; `None` when not reported
    pub vram: Option<f64>,
    pub cores: Option<u32>,
}

/// Host facts in the units the platform reports them in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawHostFacts {
    /// Platform identifier, e.g. `linux`, `windows`, `darwin`
    pub platform: String,
    pub distro: String,
    pub release: String,
    pub codename: String,
    pub cpu_manufacturer: String,
    pub cpu_brand: String,
    pub cpu_cores: u32,
    /// Total RAM in the platform's native unit
    pub total_memory: u64,
    pub gpus: Vec<RawGpu>,
}

/// Source of raw host facts.
///
/// The production implementation is [`crate::host::SysinfoInspector`];
/// tests supply fixed facts.
pub trait HostInspector {
    fn inspect(&self) -> BenchResult<RawHostFacts>;
}

impl SystemProfile {
    /// Query the inspector and normalize its facts into a profile.
    ///
    /// Fails with a configuration error when the reported platform has no
    /// known memory units, and with whatever the inspector itself returns.
    pub fn collect(inspector: &dyn HostInspector) -> BenchResult<Self> {
        let raw = inspector.inspect()?;
        Self::from_raw(raw)
    }

    pub fn from_raw(raw: RawHostFacts) -> BenchResult<Self> {
        let platform: Platform = raw.platform.parse()?;

        let totalgb = (raw.total_memory as f64 / platform.divisor(MemoryKind::Ram)).round() as u64;
        let vram_divisor = platform.divisor(MemoryKind::Vram);

        let gpu = raw
            .gpus
            .into_iter()
            .map(|g| GpuInfo {
                gpu: remap_gpu_name(&format!("{} {}", g.vendor, g.model)),
                vram: g
                    .vram
                    .filter(|v| *v > 0.0)
                    .map(|v| v / vram_divisor)
                    // no dedicated VRAM reported: treat as unified memory
                    .unwrap_or(totalgb as f64),
                cores: g.cores.unwrap_or(0),
            })
            .collect();

        Ok(Self {
            os: OsInfo {
                platform: platform.to_string(),
                distro: raw.distro,
                release: raw.release,
                codename: raw.codename,
            },
            cpu: CpuInfo {
                manufacturer: raw.cpu_manufacturer,
                brand: raw.cpu_brand,
                cores: raw.cpu_cores,
            },
            mem: MemoryInfo { totalgb },
            gpu,
        })
    }

    /// Total system memory in gigabytes; drives tier selection.
    pub fn total_memory_gb(&self) -> u64 {
        self.mem.totalgb
    }
}

fn remap_gpu_name(label: &str) -> String {
    GPU_NAME_REMAP
        .iter()
        .find(|(generic, _)| *generic == label)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| label.to_string())
}
