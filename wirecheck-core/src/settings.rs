//! Clap-free settings for building an engine.

use camino::Utf8PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineSettings {
    /// Directory of extra `*.json` ruleset documents.
    pub rules_dir: Option<Utf8PathBuf>,

    /// Ruleset used when a call names none.
    pub default_ruleset: Option<String>,
}
