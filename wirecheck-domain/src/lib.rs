//! Domain logic: evaluate an assembly against a ruleset and produce a report.
//!
//! This crate owns *what* is wrong with a design and which fixes are on offer.
//! It does not mutate assemblies; that is the `wirecheck-edit` crate.

mod aggregator;
mod catalog;
mod checkers;
pub mod codes;
pub mod fixes;
pub mod mpn;

pub use aggregator::{Aggregator, dedup_findings, dedup_fixes, format_timestamp};
pub use catalog::{FIX_CATALOG, FixInfo, RULE_CATALOG, RuleInfo, find_fix, find_rule};
pub use checkers::{CheckContext, CheckOutput, Checker, builtin_checkers};
pub use checkers::{
    ConsistencyChecker, ElectricalChecker, LabelingChecker, MechanicalChecker, StandardsChecker,
};
