//! Layered configuration loading
//!
//! Sources, lowest priority first:
//! built-in defaults, the config file, `OBM_*` environment variables,
//! then command-line flags. The file format is detected from its extension
//! (TOML, YAML or JSON).

use crate::cli::RunArgs;
use crate::error::CliError;
use config::{Config, Environment, File};
use obm_bench::BenchConfig;
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "OBM";

/// `$XDG_CONFIG_HOME/obm/config.toml` or the platform equivalent
pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|dir| dir.join("obm").join("config.toml"))
}

/// Load the benchmark configuration.
///
/// An explicit `path` must exist; the default location is optional.
pub fn load(path: Option<&Path>) -> Result<BenchConfig, CliError> {
    let mut builder = Config::builder();

    match path {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::ConfigNotFound(path.to_path_buf()));
            }
            builder = builder.add_source(File::from(path).required(true));
        }
        None => {
            if let Some(default) = default_config_path() {
                tracing::debug!(path = %default.display(), "checking default config file");
                builder = builder.add_source(File::from(default).required(false));
            }
        }
    }

    let config: BenchConfig = builder
        .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()?
        .try_deserialize()?;
    Ok(config)
}

/// Apply command-line overrides on top of the loaded configuration.
pub fn apply_overrides(mut config: BenchConfig, args: &RunArgs) -> Result<BenchConfig, CliError> {
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(collector) = &args.collector {
        config.collector_url = collector.clone();
    }
    if let Some(prompt) = &args.prompt {
        config.prompt = prompt.clone();
    }
    config.validate()?;
    Ok(config)
}
