//! Rendering helpers (markdown) for human-readable artifacts.

use wirecheck_types::{ApplyFixesOutcome, Domain, Finding, Report, Severity};

pub fn render_report_md(report: &Report) -> String {
    let mut out = String::new();
    out.push_str("# wirecheck report\n\n");
    out.push_str(&format!("- Assembly: `{}`\n", report.assembly_id));
    out.push_str(&format!(
        "- Ruleset: `{}` ({})\n",
        report.ruleset_id, report.version
    ));
    out.push_str(&format!("- Verdict: **{}**\n", verdict_label(report.passed)));
    out.push_str(&format!(
        "- Errors: {}\n- Warnings: {}\n",
        report.errors, report.warnings
    ));
    out.push_str(&format!("- Generated: {}\n\n", report.generated_at));

    out.push_str("## Findings\n\n");
    if report.findings.is_empty() {
        out.push_str("_No findings._\n\n");
    } else {
        for domain in Domain::ALL {
            let in_domain: Vec<&Finding> = report
                .findings
                .iter()
                .filter(|f| f.domain == domain)
                .collect();
            if in_domain.is_empty() {
                continue;
            }
            out.push_str(&format!("### {}\n\n", domain_title(domain)));
            for f in in_domain {
                out.push_str(&format!(
                    "- {} `{}` {}\n",
                    severity_badge(f.severity),
                    f.code,
                    f.message
                ));
                if let Some(path) = &f.where_ {
                    out.push_str(&format!("  - Where: `{}`\n", path));
                }
                if !f.refs.is_empty() {
                    out.push_str(&format!("  - Refs: {}\n", f.refs.join(", ")));
                }
            }
            out.push('\n');
        }
    }

    out.push_str("## Fixes\n\n");
    if report.fixes.is_empty() {
        out.push_str("_No fixes offered._\n");
        return out;
    }

    for (i, fix) in report.fixes.iter().enumerate() {
        out.push_str(&format!("### {}. {}\n\n", i + 1, fix.id));
        out.push_str(&format!("- Effect: `{}`\n", fix.effect.as_str()));
        if !fix.applies_to.is_empty() {
            let paths: Vec<String> = fix.applies_to.iter().map(|p| format!("`{}`", p)).collect();
            out.push_str(&format!("- Applies to: {}\n", paths.join(", ")));
        }
        out.push_str(&format!("\n{}: {}\n\n", fix.label, fix.description));
    }

    out
}

pub fn render_apply_md(outcome: &ApplyFixesOutcome) -> String {
    let mut out = String::new();
    out.push_str("# wirecheck apply-fixes\n\n");
    out.push_str(&format!("- Assembly: `{}`\n", outcome.assembly_id));
    out.push_str(&format!("- Schema hash: `{}`\n", outcome.schema_hash));
    out.push_str(&format!(
        "- Applied: {}\n- Ignored: {}\n",
        outcome.applied.len(),
        outcome.ignored.len()
    ));
    out.push_str(&format!(
        "- Verdict after fixes: **{}** ({} errors, {} warnings)\n\n",
        verdict_label(outcome.drc.passed),
        outcome.drc.errors,
        outcome.drc.warnings
    ));

    out.push_str("## Fix ids\n\n");
    if outcome.applied.is_empty() && outcome.ignored.is_empty() {
        out.push_str("_No fixes requested._\n");
    } else {
        for id in &outcome.applied {
            out.push_str(&format!("- `{}` applied\n", id));
        }
        for id in &outcome.ignored {
            out.push_str(&format!("- `{}` ignored\n", id));
        }
    }

    let remaining = outcome.drc.findings.len();
    if remaining > 0 {
        out.push_str(&format!("\n## Remaining findings ({})\n\n", remaining));
        for f in &outcome.drc.findings {
            out.push_str(&format!(
                "- {} `{}` {}\n",
                severity_badge(f.severity),
                f.code,
                f.message
            ));
        }
    }

    out
}

fn verdict_label(passed: bool) -> &'static str {
    if passed { "pass" } else { "fail" }
}

fn severity_badge(s: Severity) -> &'static str {
    match s {
        Severity::Error => "**error**",
        Severity::Warning => "warning",
        Severity::Info => "info",
    }
}

fn domain_title(d: Domain) -> &'static str {
    match d {
        Domain::Mechanical => "Mechanical",
        Domain::Electrical => "Electrical",
        Domain::Standards => "Standards",
        Domain::Labeling => "Labeling",
        Domain::Consistency => "Consistency",
    }
}
