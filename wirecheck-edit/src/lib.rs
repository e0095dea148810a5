//! Fix application.
//!
//! Responsibilities:
//! - Apply fix ids to a copy of an assembly. Every mutation is an absolute
//!   assignment, so applying the same ids again converges on the same content.
//! - Recompute the content hash and re-validate (fail closed).
//! - Report which ids took effect and render a unified diff of the change.
//!
//! Re-running the checkers is the caller's job.

mod error;

pub use error::{FixError, FixResult};

use anyhow::Context;
use std::collections::BTreeMap;
use tracing::debug;
use wirecheck_domain::fixes::{self, FixId, end_suffix};
use wirecheck_types::Assembly;
use wirecheck_types::assembly::EndpointSpec;

/// Result of applying a list of fix ids.
#[derive(Debug, Clone, PartialEq)]
pub struct FixOutcome {
    /// The mutated, re-hashed copy.
    pub assembly: Assembly,
    /// Ids that located their target, in request order.
    pub applied: Vec<String>,
    /// Ids nobody recognizes, or whose target does not exist.
    pub ignored: Vec<String>,
    /// Unified diff between the canonical JSON before and after.
    pub patch: String,
}

impl FixOutcome {
    pub fn changed(&self) -> bool {
        !self.patch.is_empty()
    }
}

/// Apply `fix_ids` to a deep copy of `assembly`. The input is never modified.
pub fn apply_fixes(assembly: &Assembly, fix_ids: &[String]) -> FixResult<FixOutcome> {
    let mut working = assembly.clone();
    let mut applied = Vec::new();
    let mut ignored = Vec::new();

    for id in fix_ids {
        if applied.contains(id) || ignored.contains(id) {
            continue;
        }
        let hit = match FixId::parse(id) {
            Some(fix) => apply_one(&mut working, fix),
            None => false,
        };
        if hit {
            debug!(fix_id = %id, assembly_id = %working.assembly_id, "fix applied");
            applied.push(id.clone());
        } else {
            debug!(fix_id = %id, assembly_id = %working.assembly_id, "fix ignored");
            ignored.push(id.clone());
        }
    }

    working.schema_hash =
        wirecheck_hash::assembly_hash(&working).context("hash fixed assembly")?;
    working.validate()?;

    let patch = render_patch(assembly, &working)?;

    Ok(FixOutcome {
        assembly: working,
        applied,
        ignored,
        patch,
    })
}

/// Mutate `assembly` for one fix. Returns false when the target is missing.
fn apply_one(assembly: &mut Assembly, fix: FixId<'_>) -> bool {
    match fix {
        FixId::LabelOffsetDefault => {
            assembly
                .labels
                .get_or_insert_default()
                .offset_mm
                .set(fixes::LABEL_OFFSET_DEFAULT_MM);
            true
        }
        FixId::ClampAdjust(key) => widen_clamp(assembly, key),
        FixId::ContactPlating(end) => match endpoint_mut(&mut assembly.endpoints, end) {
            Some(endpoint) => {
                endpoint
                    .contacts
                    .get_or_insert_default()
                    .primary
                    .get_or_insert_default()
                    .plating
                    .set(fixes::UPGRADED_PLATING.to_string());
                true
            }
            None => false,
        },
        FixId::AddHeatShrink(end) => match endpoint_mut(&mut assembly.endpoints, end) {
            Some(endpoint) => {
                endpoint.heat_shrink.set(true);
                true
            }
            None => false,
        },
    }
}

/// Widen every clamp whose key matches so it brackets the cable OD. The same
/// part may sit on several endpoints under one key.
fn widen_clamp(assembly: &mut Assembly, key: &str) -> bool {
    let Some(od) = assembly.cable.od_mm.copied() else {
        return false;
    };

    let mut hit = false;
    for (end_name, endpoint) in assembly.endpoints.iter_mut() {
        let Some(accessories) = endpoint.accessories.get_mut() else {
            continue;
        };
        for (index, accessory) in accessories.iter_mut().enumerate() {
            if accessory.fix_key(end_name, index) != key {
                continue;
            }
            let clamp = accessory.clamp.get_or_insert_default();
            let min = clamp.min_od_mm.copied().unwrap_or(od).min(od - fixes::CLAMP_MARGIN_MM);
            let max = clamp.max_od_mm.copied().unwrap_or(od).max(od + fixes::CLAMP_MARGIN_MM);
            clamp.min_od_mm.set(min);
            clamp.max_od_mm.set(max);
            hit = true;
        }
    }
    hit
}

/// Exact endpoint name first, then a case-insensitive match on the id suffix.
fn endpoint_mut<'a>(
    endpoints: &'a mut BTreeMap<String, EndpointSpec>,
    suffix: &str,
) -> Option<&'a mut EndpointSpec> {
    let key = if endpoints.contains_key(suffix) {
        suffix.to_string()
    } else {
        let wanted = suffix.to_uppercase();
        endpoints
            .keys()
            .find(|name| end_suffix(name) == wanted)?
            .clone()
    };
    endpoints.get_mut(&key)
}

fn canonical_pretty(assembly: &Assembly) -> anyhow::Result<String> {
    let value = serde_json::to_value(assembly).context("serialize assembly")?;
    let mut text = serde_json::to_string_pretty(&wirecheck_hash::canonicalize_json(&value))
        .context("render assembly json")?;
    text.push('\n');
    Ok(text)
}

fn render_patch(before: &Assembly, after: &Assembly) -> anyhow::Result<String> {
    let old = canonical_pretty(before)?;
    let new = canonical_pretty(after)?;
    if old == new {
        return Ok(String::new());
    }

    let mut out = String::new();
    out.push_str("--- a/assembly.json\n+++ b/assembly.json\n");
    let patch = diffy::create_patch(&old, &new).to_string();
    // diffy prints its own ---/+++ header; keep only the hunks.
    for line in patch.lines().skip_while(|l| !l.starts_with("@@")) {
        out.push_str(line);
        out.push('\n');
    }
    Ok(out)
}
