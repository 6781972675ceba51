//! Memory-based selection of the model tiers to benchmark

use serde::{Deserialize, Serialize};
use std::fmt;

/// A model size class benchmarked independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// 7B parameters; always runs
    Baseline,
    /// 13B parameters
    Second,
    /// 70B parameters
    Third,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Baseline, Tier::Second, Tier::Third];

    /// Model benchmarked for this tier
    pub fn model(&self) -> &'static str {
        match self {
            Tier::Baseline => "llama2:7b",
            Tier::Second => "llama2:13b",
            Tier::Third => "llama2:70b",
        }
    }

    /// System memory this tier needs to exceed, in GB. Strict `>`.
    pub fn memory_threshold_gb(&self) -> Option<u64> {
        match self {
            Tier::Baseline => None,
            Tier::Second => Some(13),
            Tier::Third => Some(63),
        }
    }

    pub fn fits(&self, memory_gb: u64) -> bool {
        self.memory_threshold_gb()
            .is_none_or(|threshold| memory_gb > threshold)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.model())
    }
}

/// Tiers to run for a host with `memory_gb` of system memory, smallest first.
pub fn select_tiers(memory_gb: u64) -> Vec<Tier> {
    Tier::ALL
        .into_iter()
        .filter(|tier| tier.fits(memory_gb))
        .collect()
}
