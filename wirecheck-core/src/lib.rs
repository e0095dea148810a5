//! Embeddable core library for wirecheck.
//!
//! Provides a clap-free entry point suitable for linking into a service or
//! other host process.
//!
//! # Port traits
//!
//! State and I/O sit behind port traits in [`ports`]:
//! - [`AssemblyStore`](ports::AssemblyStore) keeps the latest assembly per id
//! - [`WritePort`](ports::WritePort) writes files and creates directories
//!
//! The [`adapters`] module provides the in-memory store and a filesystem writer.
//!
//! # Entry points
//!
//! - [`DrcEngine::run_drc`](engine::DrcEngine::run_drc) checks an assembly
//! - [`DrcEngine::apply_fixes`](engine::DrcEngine::apply_fixes) applies fixes and re-checks
//! - [`DrcEngine::rulesets`](engine::DrcEngine::rulesets) lists known rulesets

pub mod adapters;
pub mod engine;
pub mod error;
pub mod ports;
pub mod settings;

pub use engine::{AssemblyInput, DrcEngine, write_apply_artifacts, write_report_artifacts};
pub use error::DrcError;

// Re-export the DTOs so embedders don't need wirecheck-types directly.
pub use wirecheck_rules::RulesetInfo;
pub use wirecheck_types::{ApplyFixesOutcome, Assembly, Report};
