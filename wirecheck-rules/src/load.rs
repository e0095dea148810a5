use crate::catalog::{RULESET_SCHEMA_V1, Ruleset};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::glob;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LoadedRuleset {
    pub path: Utf8PathBuf,
    pub ruleset: Result<Ruleset, RulesetLoadError>,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RulesetLoadError {
    #[error("io error: {message}")]
    Io { message: String },

    #[error("json parse error: {message}")]
    Json { message: String },

    #[error("ruleset id must not be empty")]
    MissingId,

    #[error("unsupported ruleset schema: {schema}")]
    UnsupportedSchema { schema: String },
}

/// Read every `*.json` ruleset document directly under `dir`.
///
/// A missing directory yields nothing. Individual files that fail to read or
/// parse are returned with their error so the caller can report them.
pub fn load_rulesets(dir: &Utf8Path) -> anyhow::Result<Vec<LoadedRuleset>> {
    let pattern = dir.join("*.json");
    let pattern_str = pattern.as_str();

    debug!(pattern = %pattern_str, "scanning for rulesets");

    let mut out = Vec::new();
    for entry in glob(pattern_str).context("glob rulesets/*.json")? {
        let path = entry
            .map_err(|e| anyhow::anyhow!("glob error: {e}"))?
            .to_string_lossy()
            .to_string();
        let path = Utf8PathBuf::from(path);

        let ruleset = match fs::read_to_string(&path) {
            Ok(s) => parse_ruleset(&s),
            Err(e) => Err(RulesetLoadError::Io {
                message: e.to_string(),
            }),
        };

        out.push(LoadedRuleset { path, ruleset });
    }

    // Deterministic order matters.
    out.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(out)
}

fn parse_ruleset(s: &str) -> Result<Ruleset, RulesetLoadError> {
    let ruleset: Ruleset = serde_json::from_str(s).map_err(|e| RulesetLoadError::Json {
        message: e.to_string(),
    })?;
    if let Some(schema) = ruleset.schema.as_deref()
        && schema != RULESET_SCHEMA_V1
    {
        return Err(RulesetLoadError::UnsupportedSchema {
            schema: schema.to_string(),
        });
    }
    if ruleset.id().trim().is_empty() {
        return Err(RulesetLoadError::MissingId);
    }
    Ok(ruleset)
}
