//! Shared DTOs for the wirecheck workspace: the assembly model that checkers read,
//! and the findings, fixes and reports they produce.
//!
//! # Design constraints
//! - Assemblies are hashed over their serialized form, so serialization must be
//!   lossless: absent keys stay absent, `null` stays `null`, unknown keys survive.
//! - Reports are written to disk and returned over the wire; prefer adding fields
//!   over changing semantics.

pub mod apply;
pub mod assembly;
pub mod error;
pub mod presence;
pub mod report;

pub use apply::ApplyFixesOutcome;
pub use assembly::Assembly;
pub use error::SchemaError;
pub use presence::Presence;
pub use report::{Domain, Finding, Fix, FixEffect, Report, Severity};
