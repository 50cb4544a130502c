/// `load_config` module: loads the optional YAML config into a [`CliConfig`].
///
/// The config file only says where manuals live, where the two output modes write to,
/// whether a failing manual stops the batch and how multi-line front-matter is written.
/// Every key is optional; missing keys fall back to the historical locations (`manuals/`,
/// `output/`, `multi/`), to halting on the first failure and to literal block scalars.
///
/// # Lookup order
/// 1. An explicit path (the CLI's `--config` flag)
/// 2. The `MANUAL_MD_CONFIG` environment variable
/// 3. Built-in defaults
///
/// # Errors
/// All errors in this module use `anyhow::Error` and are surfaced at the CLI boundary.
use anyhow::{Context, Result};
use manual_md_core::markdown::MultilineStyle;
use manual_md_core::FailurePolicy;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const CONFIG_ENV_VAR: &str = "MANUAL_MD_CONFIG";

#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    pub manuals_dir: PathBuf,
    pub single_output_dir: PathBuf,
    pub multi_output_dir: PathBuf,
    pub on_failure: FailurePolicy,
    pub multiline_style: MultilineStyle,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            manuals_dir: PathBuf::from("manuals"),
            single_output_dir: PathBuf::from("output"),
            multi_output_dir: PathBuf::from("multi"),
            on_failure: FailurePolicy::Halt,
            multiline_style: MultilineStyle::Literal,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    manuals_dir: Option<PathBuf>,
    #[serde(default)]
    single: ModeSection,
    #[serde(default)]
    multi: ModeSection,
    on_failure: Option<String>,
    multiline_style: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModeSection {
    output_dir: Option<PathBuf>,
}

pub fn parse_failure_policy(value: &str) -> Result<FailurePolicy> {
    match value {
        "halt" | "Halt" => Ok(FailurePolicy::Halt),
        "skip" | "Skip" => Ok(FailurePolicy::Skip),
        other => {
            error!(on_failure = %other, "Unsupported on_failure in config");
            anyhow::bail!("Unsupported on_failure: {other} (expected `halt` or `skip`)")
        }
    }
}

pub fn parse_multiline_style(value: &str) -> Result<MultilineStyle> {
    match value {
        "literal" | "Literal" => Ok(MultilineStyle::Literal),
        "serializer" | "Serializer" => Ok(MultilineStyle::Serializer),
        other => {
            error!(multiline_style = %other, "Unsupported multiline_style in config");
            anyhow::bail!("Unsupported multiline_style: {other} (expected `literal` or `serializer`)")
        }
    }
}

/// Loads a YAML config file, filling every missing key with its default.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = fs::read_to_string(path_ref)
        .with_context(|| format!("Failed to read config file {path_ref:?}"))?;

    let raw: RawConfig = if config_content.trim().is_empty() {
        info!(config_path = ?path_ref, "Config file is empty, using defaults");
        RawConfig::default()
    } else {
        match serde_yaml::from_str(&config_content) {
            Ok(conf) => {
                info!(config_path = ?path_ref, "Parsed config YAML successfully");
                conf
            }
            Err(e) => {
                error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
                return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
            }
        }
    };

    let defaults = CliConfig::default();
    let on_failure = match raw.on_failure.as_deref() {
        Some(value) => parse_failure_policy(value)?,
        None => defaults.on_failure,
    };
    let multiline_style = match raw.multiline_style.as_deref() {
        Some(value) => parse_multiline_style(value)?,
        None => defaults.multiline_style,
    };
    let config = CliConfig {
        manuals_dir: raw.manuals_dir.unwrap_or(defaults.manuals_dir),
        single_output_dir: raw.single.output_dir.unwrap_or(defaults.single_output_dir),
        multi_output_dir: raw.multi.output_dir.unwrap_or(defaults.multi_output_dir),
        on_failure,
        multiline_style,
    };

    info!(
        manuals_dir = %config.manuals_dir.display(),
        on_failure = ?config.on_failure,
        "Config loaded successfully"
    );
    Ok(config)
}

/// Picks the config source: explicit path, then `MANUAL_MD_CONFIG`, then defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<CliConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) if !path.is_empty() => {
            info!(var = CONFIG_ENV_VAR, "Using config path from environment");
            load_config(PathBuf::from(path))
        }
        _ => {
            info!("No config file given, using defaults");
            Ok(CliConfig::default())
        }
    }
}
