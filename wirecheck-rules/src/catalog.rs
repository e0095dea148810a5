use crate::load::LoadedRuleset;
use crate::tables::RuleTables;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_RULESET_ID: &str = "rs-001";

/// Schema id carried by ruleset documents.
pub const RULESET_SCHEMA_V1: &str = "wirecheck.ruleset.v1";

/// Version reported for a ruleset id the catalog does not know.
const UNKNOWN_VERSION: &str = "unknown";

/// Listing entry returned by `rulesets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetInfo {
    pub id: String,
    pub version: String,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ruleset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(flatten)]
    pub info: RulesetInfo,

    #[serde(default)]
    pub tables: RuleTables,
}

impl Ruleset {
    pub fn builtin() -> Self {
        Self {
            schema: Some(RULESET_SCHEMA_V1.to_string()),
            info: RulesetInfo {
                id: DEFAULT_RULESET_ID.to_string(),
                version: "1.0.0".to_string(),
                created_at: "2025-01-01T00:00:00Z".to_string(),
                notes: "Baseline deterministic ruleset".to_string(),
            },
            tables: RuleTables::builtin(),
        }
    }

    /// Stand-in for an id nobody registered: it carries no tables, so every
    /// table-driven check is skipped.
    pub fn unknown(id: &str) -> Self {
        Self {
            schema: None,
            info: RulesetInfo {
                id: id.to_string(),
                version: UNKNOWN_VERSION.to_string(),
                created_at: String::new(),
                notes: String::new(),
            },
            tables: RuleTables::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.info.id
    }

    pub fn version(&self) -> &str {
        &self.info.version
    }
}

#[derive(Debug, Clone)]
pub struct RulesetCatalog {
    rulesets: Vec<Ruleset>,
    default_id: String,
}

impl Default for RulesetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RulesetCatalog {
    /// A catalog holding only the baseline ruleset.
    pub fn builtin() -> Self {
        Self {
            rulesets: vec![Ruleset::builtin()],
            default_id: DEFAULT_RULESET_ID.to_string(),
        }
    }

    pub fn with_default(mut self, id: impl Into<String>) -> Self {
        self.default_id = id.into();
        self
    }

    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    /// Register a ruleset; one with the same id is replaced in place.
    pub fn insert(&mut self, ruleset: Ruleset) {
        match self.rulesets.iter_mut().find(|r| r.id() == ruleset.id()) {
            Some(existing) => {
                debug!(ruleset_id = %ruleset.id(), "replacing ruleset");
                *existing = ruleset;
            }
            None => self.rulesets.push(ruleset),
        }
    }

    /// Add every successfully loaded ruleset. Broken files are logged and skipped.
    pub fn extend_loaded(&mut self, loaded: Vec<LoadedRuleset>) {
        for entry in loaded {
            match entry.ruleset {
                Ok(ruleset) => self.insert(ruleset),
                Err(err) => warn!(path = %entry.path, error = %err, "skipping ruleset"),
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Ruleset> {
        self.rulesets.iter().find(|r| r.id() == id)
    }

    pub fn list(&self) -> Vec<RulesetInfo> {
        self.rulesets.iter().map(|r| r.info.clone()).collect()
    }

    /// The ruleset to run with. `None` selects the default; an unregistered id
    /// yields an empty ruleset rather than an error.
    pub fn resolve(&self, id: Option<&str>) -> Ruleset {
        let id = id.unwrap_or(&self.default_id);
        match self.get(id) {
            Some(ruleset) => ruleset.clone(),
            None => {
                debug!(ruleset_id = %id, "unknown ruleset; table checks will be skipped");
                Ruleset::unknown(id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_listing() {
        let catalog = RulesetCatalog::builtin();
        assert_eq!(
            catalog.list(),
            vec![RulesetInfo {
                id: "rs-001".to_string(),
                version: "1.0.0".to_string(),
                created_at: "2025-01-01T00:00:00Z".to_string(),
                notes: "Baseline deterministic ruleset".to_string(),
            }]
        );
    }

    #[test]
    fn resolve_none_uses_default() {
        let catalog = RulesetCatalog::builtin();
        let ruleset = catalog.resolve(None);
        assert_eq!(ruleset.id(), "rs-001");
        assert!(ruleset.tables.has_ampacity());
    }

    #[test]
    fn resolve_unknown_id_has_no_tables() {
        let catalog = RulesetCatalog::builtin();
        let ruleset = catalog.resolve(Some("rs-999"));
        assert_eq!(ruleset.id(), "rs-999");
        assert_eq!(ruleset.version(), "unknown");
        assert_eq!(ruleset.tables, RuleTables::default());
    }

    #[test]
    fn insert_replaces_same_id() {
        let mut catalog = RulesetCatalog::builtin();
        let mut replacement = Ruleset::builtin();
        replacement.info.version = "1.1.0".to_string();
        catalog.insert(replacement);
        assert_eq!(catalog.list().len(), 1);
        assert_eq!(catalog.resolve(None).version(), "1.1.0");
    }
}
