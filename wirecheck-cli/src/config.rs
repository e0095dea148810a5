//! Configuration file loading for wirecheck.
//!
//! Discovers and loads `wirecheck.toml` from the working directory, or reads an
//! explicit `--config` path. CLI arguments take precedence over file values.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;
use wirecheck_core::settings::EngineSettings;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "wirecheck.toml";

/// Output directory used when neither the CLI nor the file names one.
pub const DEFAULT_OUT_DIR: &str = "artifacts/wirecheck";

/// Top-level configuration from wirecheck.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WirecheckConfig {
    pub rules: RulesConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    /// Directory of extra `*.json` ruleset documents.
    pub dir: Option<Utf8PathBuf>,

    /// Ruleset used when `--ruleset` is not given.
    pub default_ruleset: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Where artifacts are written.
    pub dir: Option<Utf8PathBuf>,
}

impl WirecheckConfig {
    /// Make relative paths relative to the directory holding the config file.
    fn anchor(mut self, base: &Utf8Path) -> Self {
        let anchor = |p: Utf8PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.rules.dir = self.rules.dir.map(anchor);
        self.output.dir = self.output.dir.map(anchor);
        self
    }
}

/// Look for `wirecheck.toml` in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a config file. Relative paths inside it are anchored at its directory.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<WirecheckConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    let config =
        parse_config(&contents).with_context(|| format!("parse config file {}", path))?;
    let base = path.parent().unwrap_or(Utf8Path::new(""));
    Ok(config.anchor(base))
}

pub fn parse_config(contents: &str) -> anyhow::Result<WirecheckConfig> {
    let config: WirecheckConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Explicit path if given (must exist), else discovery in `cwd`, else defaults.
pub fn load_or_default(
    explicit: Option<&Utf8Path>,
    cwd: &Utf8Path,
) -> anyhow::Result<WirecheckConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match discover_config(cwd) {
        Some(path) => load_config(&path),
        None => Ok(WirecheckConfig::default()),
    }
}

/// Configuration after applying CLI overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedConfig {
    pub rules_dir: Option<Utf8PathBuf>,
    pub default_ruleset: Option<String>,
    pub out_dir: Utf8PathBuf,
}

impl MergedConfig {
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            rules_dir: self.rules_dir.clone(),
            default_ruleset: self.default_ruleset.clone(),
        }
    }
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: WirecheckConfig,
}

impl ConfigMerger {
    pub fn new(config: WirecheckConfig) -> Self {
        Self { config }
    }

    /// Each CLI value, when given, replaces the file value.
    pub fn merge(
        self,
        cli_rules_dir: Option<Utf8PathBuf>,
        cli_ruleset: Option<String>,
        cli_out_dir: Option<Utf8PathBuf>,
    ) -> MergedConfig {
        MergedConfig {
            rules_dir: cli_rules_dir.or(self.config.rules.dir),
            default_ruleset: cli_ruleset.or(self.config.rules.default_ruleset),
            out_dir: cli_out_dir
                .or(self.config.output.dir)
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUT_DIR)),
        }
    }
}
