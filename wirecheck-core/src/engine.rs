//! The DRC engine: resolves input, runs the checkers and applies fixes.
//!
//! Everything here is synchronous. Calls for distinct assembly ids never
//! contend; calls for the same id are serialized on the store's per-id lock
//! while they read or write the stored copy.

use crate::adapters::InMemoryAssemblyStore;
use crate::error::DrcError;
use crate::ports::{AssemblyStore, WritePort};
use crate::settings::EngineSettings;
use anyhow::Context;
use camino::Utf8Path;
use serde_json::Value;
use std::sync::{Arc, PoisonError};
use tracing::{debug, info};
use wirecheck_domain::Aggregator;
use wirecheck_render::{render_apply_md, render_report_md};
use wirecheck_rules::{Ruleset, RulesetCatalog, RulesetInfo};
use wirecheck_types::{ApplyFixesOutcome, Assembly, Report};

/// How a caller supplies the assembly to check.
#[derive(Debug, Clone)]
pub enum AssemblyInput {
    /// A typed assembly. It is validated and remembered.
    Inline(Box<Assembly>),
    /// A raw JSON document. It is parsed, validated and remembered.
    Json(Value),
    /// An id previously remembered by the store.
    Reference(String),
}

impl From<Assembly> for AssemblyInput {
    fn from(assembly: Assembly) -> Self {
        AssemblyInput::Inline(Box::new(assembly))
    }
}

impl From<Value> for AssemblyInput {
    fn from(value: Value) -> Self {
        AssemblyInput::Json(value)
    }
}

/// Input after decoding; holds either a fresh assembly or a store key.
enum Resolved {
    Fresh(Assembly),
    Stored(String),
}

impl Resolved {
    fn assembly_id(&self) -> &str {
        match self {
            Resolved::Fresh(a) => &a.assembly_id,
            Resolved::Stored(id) => id,
        }
    }
}

pub struct DrcEngine {
    catalog: RulesetCatalog,
    aggregator: Aggregator,
    store: Arc<dyn AssemblyStore>,
}

impl Default for DrcEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DrcEngine {
    /// Built-in rulesets, built-in checkers, in-memory store.
    pub fn new() -> Self {
        Self {
            catalog: RulesetCatalog::builtin(),
            aggregator: Aggregator::new(),
            store: Arc::new(InMemoryAssemblyStore::new()),
        }
    }

    /// Built-in rulesets plus those found in `settings.rules_dir`.
    pub fn from_settings(settings: &EngineSettings) -> anyhow::Result<Self> {
        let mut catalog = RulesetCatalog::builtin();
        if let Some(dir) = &settings.rules_dir {
            let loaded = wirecheck_rules::load_rulesets(dir)
                .with_context(|| format!("load rulesets from {}", dir))?;
            catalog.extend_loaded(loaded);
        }
        if let Some(id) = &settings.default_ruleset {
            catalog = catalog.with_default(id.clone());
        }
        Ok(Self::new().with_catalog(catalog))
    }

    pub fn with_catalog(mut self, catalog: RulesetCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_aggregator(mut self, aggregator: Aggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    pub fn with_store(mut self, store: Arc<dyn AssemblyStore>) -> Self {
        self.store = store;
        self
    }

    pub fn catalog(&self) -> &RulesetCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &Arc<dyn AssemblyStore> {
        &self.store
    }

    pub fn rulesets(&self) -> Vec<RulesetInfo> {
        self.catalog.list()
    }

    /// Check an assembly. Inline input is remembered for later calls.
    pub fn run_drc(
        &self,
        input: AssemblyInput,
        ruleset_id: Option<&str>,
    ) -> Result<Report, DrcError> {
        let resolved = resolve(input)?;
        let assembly = self.checkout(resolved)?;
        let ruleset = self.catalog.resolve(ruleset_id);

        let report = self.aggregator.run(&assembly, &ruleset);
        log_report(&report);
        Ok(report)
    }

    /// Apply `fix_ids` to the assembly, store the result and check it again.
    ///
    /// The stored copy is read, fixed and written back under the per-id lock,
    /// so concurrent calls against one id never lose each other's fixes.
    pub fn apply_fixes(
        &self,
        input: AssemblyInput,
        fix_ids: &[String],
        ruleset_id: Option<&str>,
    ) -> Result<ApplyFixesOutcome, DrcError> {
        let resolved = resolve(input)?;
        let assembly_id = resolved.assembly_id().to_string();
        let fixed = self.locked(&assembly_id, || {
            let current = self.checkout_locked(resolved)?;
            let fixed = wirecheck_edit::apply_fixes(&current, fix_ids)?;
            self.store
                .remember(&fixed.assembly)
                .context("store fixed assembly")?;
            Ok(fixed)
        })?;

        info!(
            assembly_id = %fixed.assembly.assembly_id,
            schema_hash = %fixed.assembly.schema_hash,
            applied = fixed.applied.len(),
            ignored = fixed.ignored.len(),
            "fixes applied"
        );

        let ruleset = self.catalog.resolve(ruleset_id);
        let drc = self.aggregator.run(&fixed.assembly, &ruleset);
        log_report(&drc);

        Ok(ApplyFixesOutcome {
            assembly_id: fixed.assembly.assembly_id.clone(),
            schema_hash: fixed.assembly.schema_hash.clone(),
            schema: fixed.assembly,
            drc,
            applied: fixed.applied,
            ignored: fixed.ignored,
            patch: fixed.patch,
        })
    }

    /// Resolve the ruleset a call would use.
    pub fn ruleset(&self, ruleset_id: Option<&str>) -> Ruleset {
        self.catalog.resolve(ruleset_id)
    }

    fn checkout(&self, resolved: Resolved) -> Result<Assembly, DrcError> {
        let assembly_id = resolved.assembly_id().to_string();
        self.locked(&assembly_id, || self.checkout_locked(resolved))
    }

    /// Run `f` under the per-id lock. A NotFound result hands the lock back
    /// so unknown ids leave nothing behind in the store.
    fn locked<T>(
        &self,
        assembly_id: &str,
        f: impl FnOnce() -> Result<T, DrcError>,
    ) -> Result<T, DrcError> {
        let handle = self.store.lock(assembly_id);
        let result = {
            let _guard = handle.lock().unwrap_or_else(PoisonError::into_inner);
            f()
        };
        drop(handle);
        if matches!(result, Err(DrcError::NotFound { .. })) {
            self.store.release(assembly_id);
        }
        result
    }

    /// Remember fresh input or load stored input. Caller holds the id lock.
    fn checkout_locked(&self, resolved: Resolved) -> Result<Assembly, DrcError> {
        match resolved {
            Resolved::Fresh(assembly) => {
                self.store
                    .remember(&assembly)
                    .context("store assembly")?;
                Ok(assembly)
            }
            Resolved::Stored(assembly_id) => {
                match self.store.load(&assembly_id).context("load assembly")? {
                    Some(assembly) => Ok(assembly),
                    None => {
                        debug!(assembly_id = %assembly_id, "assembly not in store");
                        Err(DrcError::NotFound { assembly_id })
                    }
                }
            }
        }
    }
}

fn resolve(input: AssemblyInput) -> Result<Resolved, DrcError> {
    match input {
        AssemblyInput::Inline(assembly) => {
            assembly.validate()?;
            Ok(Resolved::Fresh(*assembly))
        }
        AssemblyInput::Json(value) => Ok(Resolved::Fresh(Assembly::from_value(value)?)),
        AssemblyInput::Reference(assembly_id) => Ok(Resolved::Stored(assembly_id)),
    }
}

fn log_report(report: &Report) {
    info!(
        assembly_id = %report.assembly_id,
        ruleset_id = %report.ruleset_id,
        passed = report.passed,
        errors = report.errors,
        warnings = report.warnings,
        "drc complete"
    );
}

/// Write `report.json` and `report.md` into `out_dir`.
pub fn write_report_artifacts(
    report: &Report,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let report_json = serde_json::to_string_pretty(report).context("serialize report")?;
    writer.write_file(&out_dir.join("report.json"), report_json.as_bytes())?;

    let report_md = render_report_md(report);
    writer.write_file(&out_dir.join("report.md"), report_md.as_bytes())?;

    Ok(())
}

/// Write the post-fix report, the fixed assembly, the apply summary and the patch.
pub fn write_apply_artifacts(
    outcome: &ApplyFixesOutcome,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    write_report_artifacts(&outcome.drc, out_dir, writer)?;

    let assembly_json =
        serde_json::to_string_pretty(&outcome.schema).context("serialize assembly")?;
    writer.write_file(&out_dir.join("assembly.json"), assembly_json.as_bytes())?;

    let apply_json = serde_json::to_string_pretty(outcome).context("serialize apply outcome")?;
    writer.write_file(&out_dir.join("apply.json"), apply_json.as_bytes())?;

    let apply_md = render_apply_md(outcome);
    writer.write_file(&out_dir.join("apply.md"), apply_md.as_bytes())?;

    writer.write_file(&out_dir.join("patch.diff"), outcome.patch.as_bytes())?;

    Ok(())
}
