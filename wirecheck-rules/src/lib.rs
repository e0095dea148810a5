//! Rule tables and rulesets.
//!
//! Checkers treat tables as pure lookup data. A table that is missing or empty
//! never fails a run: the checks that depend on it are skipped.

mod catalog;
mod load;
mod tables;

pub use catalog::{DEFAULT_RULESET_ID, RULESET_SCHEMA_V1, Ruleset, RulesetCatalog, RulesetInfo};
pub use load::{LoadedRuleset, RulesetLoadError, load_rulesets};
pub use tables::{
    BendStep, DEFAULT_RIBBON_BEND_RADIUS_MM, LocaleColors, RuleTables, VoltageTempLimit,
};
