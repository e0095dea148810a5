use crate::checkers::{self, CheckContext, CheckOutput, Checker};
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::HashSet;
use tracing::debug;
use wirecheck_rules::Ruleset;
use wirecheck_types::{Assembly, Finding, Fix, Report, Severity};

/// Runs checkers in a fixed order and folds their output into a [`Report`].
pub struct Aggregator {
    checkers: Vec<Box<dyn Checker>>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            checkers: checkers::builtin_checkers(),
        }
    }

    pub fn with_checkers(checkers: Vec<Box<dyn Checker>>) -> Self {
        Self { checkers }
    }

    /// Raw checker output, concatenated in run order, before deduplication.
    pub fn collect(&self, assembly: &Assembly, ruleset: &Ruleset) -> CheckOutput {
        let ctx = CheckContext {
            assembly,
            tables: &ruleset.tables,
        };
        let mut all = CheckOutput::default();
        for checker in &self.checkers {
            let out = checker.check(&ctx);
            debug!(
                domain = %checker.domain(),
                findings = out.findings.len(),
                fixes = out.fixes.len(),
                "checker finished"
            );
            all.append(out);
        }
        all
    }

    pub fn run(&self, assembly: &Assembly, ruleset: &Ruleset) -> Report {
        self.run_at(assembly, ruleset, Utc::now())
    }

    /// Same as [`Aggregator::run`] with a caller-supplied timestamp.
    pub fn run_at(&self, assembly: &Assembly, ruleset: &Ruleset, now: DateTime<Utc>) -> Report {
        let raw = self.collect(assembly, ruleset);
        let findings = dedup_findings(raw.findings);
        let fixes = dedup_fixes(raw.fixes);

        let errors = count(&findings, Severity::Error);
        let warnings = count(&findings, Severity::Warning);

        Report {
            assembly_id: assembly.assembly_id.clone(),
            ruleset_id: ruleset.id().to_string(),
            version: ruleset.version().to_string(),
            passed: errors == 0,
            errors,
            warnings,
            findings,
            fixes,
            generated_at: format_timestamp(now),
        }
    }
}

fn count(findings: &[Finding], severity: Severity) -> u64 {
    findings.iter().filter(|f| f.severity == severity).count() as u64
}

/// Keep the first finding for each `(id, where)`.
pub fn dedup_findings(findings: Vec<Finding>) -> Vec<Finding> {
    let mut seen: HashSet<(String, Option<String>)> = HashSet::new();
    findings
        .into_iter()
        .filter(|f| seen.insert((f.id.clone(), f.where_.clone())))
        .collect()
}

/// Keep the first fix for each id.
pub fn dedup_fixes(fixes: Vec<Fix>) -> Vec<Fix> {
    let mut seen: HashSet<String> = HashSet::new();
    fixes.into_iter().filter(|f| seen.insert(f.id.clone())).collect()
}

/// Second-precision UTC, e.g. `2025-01-01T00:00:00Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
