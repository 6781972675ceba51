//! Conversion of platform-reported memory magnitudes into gigabytes
//!
//! Host inspection reports RAM and VRAM in different base units depending on
//! the operating system. The divisors below turn those raw magnitudes into
//! the gigabyte figures carried by the system profile.

use crate::error::{BenchError, BenchResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which memory quantity is being converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryKind {
    Ram,
    Vram,
}

/// Platforms with a known reporting convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    Windows,
    Darwin,
}

/// Bytes to gigabytes, as reported for RAM on Linux and Windows.
const BYTES_PER_GB: f64 = 1000.0 * 1024.0 * 1024.0;
/// KiB to gigabytes, as reported for RAM on Darwin.
const KIB_PER_GB: f64 = 1024.0 * 1024.0;
/// MiB to gigabytes, as reported for VRAM on Linux and Windows.
const MIB_PER_GB: f64 = 1024.0;

impl Platform {
    /// Platform of the running process.
    pub fn current() -> BenchResult<Self> {
        std::env::consts::OS.parse()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Windows => "windows",
            Platform::Darwin => "darwin",
        }
    }

    /// Divisor converting this platform's native unit for `kind` into gigabytes.
    pub fn divisor(&self, kind: MemoryKind) -> f64 {
        match (self, kind) {
            (Platform::Linux | Platform::Windows, MemoryKind::Ram) => BYTES_PER_GB,
            (Platform::Linux | Platform::Windows, MemoryKind::Vram) => MIB_PER_GB,
            (Platform::Darwin, MemoryKind::Ram) => KIB_PER_GB,
            (Platform::Darwin, MemoryKind::Vram) => 1.0,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linux" => Ok(Platform::Linux),
            "windows" | "win32" => Ok(Platform::Windows),
            "darwin" | "macos" => Ok(Platform::Darwin),
            other => Err(BenchError::Configuration(format!(
                "no memory unit mapping for platform '{other}'"
            ))),
        }
    }
}

/// Divisor for `kind` on the platform named by `platform`.
///
/// Unknown platforms are a configuration error; there is no fallback unit.
pub fn divisor(kind: MemoryKind, platform: &str) -> BenchResult<f64> {
    Ok(platform.parse::<Platform>()?.divisor(kind))
}
