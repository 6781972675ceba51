//! Console rendering of profiles and scores

use colored::Colorize;
use obm_bench::{ScoreCard, SystemProfile, Tier};

/// Lines describing the host, as printed before the benchmark starts.
pub fn profile_lines(profile: &SystemProfile) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {} with {}GB and {} {} with {} cores",
        profile.os.distro,
        profile.os.release,
        profile.mem.totalgb,
        profile.cpu.manufacturer,
        profile.cpu.brand,
        profile.cpu.cores
    )];

    if !profile.gpu.is_empty() {
        lines.push("GPU Info:".bold().to_string());
        for gpu in &profile.gpu {
            let cores = if gpu.cores > 0 {
                format!(" and {} cores", gpu.cores)
            } else {
                String::new()
            };
            lines.push(format!("{} with {}GB vram{cores}", gpu.gpu, gpu.vram));
        }
        lines.push(String::new());
    }
    lines
}

/// Lines announcing the collector's score.
pub fn score_lines(card: &ScoreCard) -> Vec<String> {
    let component = |score: &Option<obm_bench::Score>| {
        score
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string())
    };
    vec![
        format!(
            "Your OBMScore is {} and is made of 3 components: ",
            card.obmscore.to_string().yellow()
        ),
        format!("{} OBMScore: {}", Tier::Baseline.model(), component(&card.obm7)),
        format!("{} OBMScore: {}", Tier::Second.model(), component(&card.obm13)),
        format!("{} OBMScore: {}", Tier::Third.model(), component(&card.obm70)),
    ]
}

/// Host part of an endpoint URL, for the consent prompt.
pub fn endpoint_host(endpoint: &str) -> &str {
    let without_scheme = endpoint
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(endpoint);
    without_scheme
        .split(['/', '?'])
        .next()
        .unwrap_or(without_scheme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use obm_bench::Score;
    use obm_bench::system::{CpuInfo, GpuInfo, MemoryInfo, OsInfo};

    fn profile(gpu: Vec<GpuInfo>) -> SystemProfile {
        SystemProfile {
            os: OsInfo {
                platform: "darwin".into(),
                distro: "macOS".into(),
                release: "14.2.1".into(),
                codename: "Sonoma".into(),
            },
            cpu: CpuInfo {
                manufacturer: "Apple".into(),
                brand: "M2 Max".into(),
                cores: 12,
            },
            mem: MemoryInfo { totalgb: 64 },
            gpu,
        }
    }

    #[test]
    fn test_profile_summary_without_gpu() {
        let lines = profile_lines(&profile(vec![]));
        assert_eq!(lines, vec!["macOS 14.2.1 with 64GB and Apple M2 Max with 12 cores"]);
    }

    #[test]
    fn test_gpu_cores_only_shown_when_reported() {
        colored::control::set_override(false);
        let lines = profile_lines(&profile(vec![
            GpuInfo {
                gpu: "Apple M2 Max".into(),
                vram: 64.0,
                cores: 38,
            },
            GpuInfo {
                gpu: "NVIDIA Corporation Device A100".into(),
                vram: 40.0,
                cores: 0,
            },
        ]));
        assert_eq!(lines[1], "GPU Info:");
        assert_eq!(lines[2], "Apple M2 Max with 64GB vram and 38 cores");
        assert_eq!(lines[3], "NVIDIA Corporation Device A100 with 40GB vram");
    }

    #[test]
    fn test_score_lines() {
        colored::control::set_override(false);
        let card = ScoreCard {
            obmscore: Score::Number(180.0),
            obm7: Some(Score::Number(120.0)),
            obm13: Some(Score::Text("60".into())),
            obm70: None,
        };
        let lines = score_lines(&card);
        assert_eq!(lines[0], "Your OBMScore is 180 and is made of 3 components: ");
        assert_eq!(lines[1], "llama2:7b OBMScore: 120");
        assert_eq!(lines[2], "llama2:13b OBMScore: 60");
        assert_eq!(lines[3], "llama2:70b OBMScore: -");
    }

    #[test]
    fn test_endpoint_host() {
        assert_eq!(endpoint_host("https://obm.tvl.st/api/postbm"), "obm.tvl.st");
        assert_eq!(endpoint_host("http://127.0.0.1:9000"), "127.0.0.1:9000");
    }
}
