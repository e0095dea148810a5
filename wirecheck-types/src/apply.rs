use crate::assembly::Assembly;
use crate::report::Report;
use serde::{Deserialize, Serialize};

/// Response of an apply-fixes call: the updated assembly and its fresh report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyFixesOutcome {
    pub assembly_id: String,
    pub schema_hash: String,

    /// The updated assembly.
    pub schema: Assembly,

    pub drc: Report,

    #[serde(default)]
    pub applied: Vec<String>,

    #[serde(default)]
    pub ignored: Vec<String>,

    /// Unified diff of the assembly JSON. Written as its own artifact.
    #[serde(skip)]
    pub patch: String,
}
