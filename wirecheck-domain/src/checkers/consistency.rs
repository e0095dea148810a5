use super::{CheckContext, CheckOutput, Checker, non_empty};
use crate::codes;
use crate::fixes::{self, end_suffix};
use tracing::debug;
use wirecheck_types::{Assembly, Domain, Finding, Severity};

pub struct ConsistencyChecker;

impl ConsistencyChecker {
    const RING_LUG: &'static str = "ring_lug";

    fn ribbon_stripe(assembly: &Assembly, out: &mut CheckOutput) {
        if !assembly.is_ribbon() {
            return;
        }
        let striped = assembly
            .conductors
            .ribbon
            .get()
            .and_then(|r| r.red_stripe.copied())
            == Some(true);
        if !striped {
            out.finding(
                Finding::new(
                    "CONSIST_RIBBON_STRIPE",
                    Severity::Warning,
                    Domain::Consistency,
                    codes::RIBBON_RED_STRIPE,
                    "Ribbon cable should mark conductor 1 with a red stripe.",
                )
                .at("conductors.ribbon.red_stripe"),
            );
        }
    }

    fn pin1_indicators(assembly: &Assembly, out: &mut CheckOutput) {
        for (end_name, endpoint) in &assembly.endpoints {
            let Some(connector) = endpoint.connector.get().filter(|c| !c.is_empty()) else {
                continue;
            };
            if connector.pin1_indicator.copied() != Some(true) {
                out.finding(
                    Finding::new(
                        format!("CONSIST_PIN1_{}", end_suffix(end_name)),
                        Severity::Warning,
                        Domain::Consistency,
                        codes::PIN1_INDICATOR,
                        format!("Connector at {} should carry a pin-1 indicator.", end_name),
                    )
                    .at(format!("endpoints.{}.connector.pin1_indicator", end_name)),
                );
            }
        }
    }

    fn locale_colors(ctx: &CheckContext<'_>, out: &mut CheckOutput) {
        let Some(locale) = non_empty(&ctx.assembly.cable.locale) else {
            return;
        };
        if !ctx.tables.has_locale_colors() {
            debug!(rule = codes::LOCALE_COLOR, "locale color table missing; skipping");
            return;
        }
        let Some(conventions) = ctx.tables.locale_colors(locale) else {
            return;
        };

        for (index, wire) in ctx.assembly.wirelist.iter().enumerate() {
            let circuit = wire.circuit.get().map(|c| c.to_uppercase()).unwrap_or_default();
            let Some(allowed) = conventions.get(&circuit) else {
                continue;
            };
            let color = wire.color.get().map(|c| c.to_uppercase()).unwrap_or_default();
            if allowed.iter().any(|a| a.eq_ignore_ascii_case(&color)) {
                continue;
            }
            out.finding(
                Finding::new(
                    format!("CONSIST_COLOR_{}", circuit),
                    Severity::Warning,
                    Domain::Consistency,
                    codes::LOCALE_COLOR,
                    format!(
                        "{} locale expects {} conductors in {}, found '{}'.",
                        locale,
                        circuit,
                        allowed.join(" or "),
                        color
                    ),
                )
                .at(format!("wirelist[{}].color", index)),
            );
        }
    }

    fn lug_studs(assembly: &Assembly, out: &mut CheckOutput) {
        for (end_name, endpoint) in &assembly.endpoints {
            if non_empty(&endpoint.termination) != Some(Self::RING_LUG) {
                continue;
            }
            let lugs = endpoint.lugs.get().map(Vec::as_slice).unwrap_or_default();
            let complete = !lugs.is_empty() && lugs.iter().all(|lug| non_empty(&lug.stud).is_some());
            if !complete {
                out.finding(
                    Finding::new(
                        format!("CONSIST_STUD_SIZE_{}", end_suffix(end_name)),
                        Severity::Error,
                        Domain::Consistency,
                        codes::STUD_SIZE_MISSING,
                        format!("Ring lug termination at {} needs a stud size on every lug.", end_name),
                    )
                    .at(format!("{}.lugs[*].stud", end_name)),
                );
            }
        }
    }

    fn heat_shrink(assembly: &Assembly, out: &mut CheckOutput) {
        for (end_name, endpoint) in &assembly.endpoints {
            let required = endpoint.requires_heat_shrink.copied() == Some(true);
            let fitted = endpoint.heat_shrink.copied() == Some(true);
            if !required || fitted {
                continue;
            }
            out.finding(
                Finding::new(
                    format!("CONSIST_HEAT_SHRINK_{}", end_suffix(end_name)),
                    Severity::Warning,
                    Domain::Consistency,
                    codes::HEAT_SHRINK,
                    format!("Heat-shrink is required at {} but not fitted.", end_name),
                )
                .at(format!("endpoints.{}", end_name)),
            );
            out.fix(fixes::add_heat_shrink(end_name));
        }
    }
}

impl Checker for ConsistencyChecker {
    fn domain(&self) -> Domain {
        Domain::Consistency
    }

    fn check(&self, ctx: &CheckContext<'_>) -> CheckOutput {
        let mut out = CheckOutput::default();
        Self::ribbon_stripe(ctx.assembly, &mut out);
        Self::pin1_indicators(ctx.assembly, &mut out);
        Self::locale_colors(ctx, &mut out);
        Self::lug_studs(ctx.assembly, &mut out);
        Self::heat_shrink(ctx.assembly, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::test_support::{assembly, base_doc};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use wirecheck_rules::RuleTables;
    use wirecheck_types::FixEffect;

    fn run_with(doc: Value, tables: &RuleTables) -> CheckOutput {
        let assembly = assembly(doc);
        ConsistencyChecker.check(&CheckContext { assembly: &assembly, tables })
    }

    fn run(doc: Value) -> CheckOutput {
        run_with(doc, &RuleTables::builtin())
    }

    fn eu_mains(colors: [&str; 3]) -> Value {
        let mut doc = base_doc();
        doc["cable"]["locale"] = json!("EU");
        doc["conductors"]["count"] = json!(3);
        for end in ["endA", "endB"] {
            doc["endpoints"][end]["connector"]["positions"] = json!(3);
        }
        doc["wirelist"] = json!([
            { "circuit": "L", "conductor": 1, "color": colors[0] },
            { "circuit": "N", "conductor": 2, "color": colors[1] },
            { "circuit": "PE", "conductor": 3, "color": colors[2] }
        ]);
        doc
    }

    #[test]
    fn clean_assembly_has_no_findings() {
        assert!(run(base_doc()).is_empty());
    }

    #[test]
    fn ribbon_without_stripe_warns() {
        let mut doc = base_doc();
        doc["cable"]["type"] = json!("ribbon");
        doc["conductors"]["ribbon"] = json!({ "ways": 2 });
        let out = run(doc);
        assert_eq!(out.findings.len(), 1);
        assert_eq!(out.findings[0].code, codes::RIBBON_RED_STRIPE);
    }

    #[test]
    fn pin1_checked_only_on_declared_connectors() {
        let mut doc = base_doc();
        doc["endpoints"]["endA"]["connector"] = json!({ "mpn": "CONN-A", "positions": 2 });
        doc["endpoints"]["endB"]["connector"] = json!({});
        let out = run(doc);
        assert_eq!(out.findings.len(), 1);
        assert_eq!(out.findings[0].id, "CONSIST_PIN1_ENDA");
    }

    #[test]
    fn eu_colors_follow_iec() {
        assert!(run(eu_mains(["brown", "BLUE", "GREEN/YELLOW"])).is_empty());

        let out = run(eu_mains(["RED", "BLUE", "GREEN"]));
        let wheres: Vec<_> = out.findings.iter().filter_map(|f| f.where_.clone()).collect();
        assert_eq!(wheres, vec!["wirelist[0].color".to_string(), "wirelist[2].color".to_string()]);
        assert_eq!(out.findings[0].id, "CONSIST_COLOR_L");
    }

    #[test]
    fn locale_without_table_entry_is_not_checked() {
        let mut doc = eu_mains(["RED", "RED", "RED"]);
        doc["cable"]["locale"] = json!("NA");
        assert!(run(doc).is_empty());
        assert!(run_with(eu_mains(["RED", "RED", "RED"]), &RuleTables::default()).is_empty());
    }

    #[test]
    fn ring_lug_without_stud_is_an_error() {
        let mut doc = base_doc();
        doc["endpoints"]["endB"]["termination"] = json!("ring_lug");
        doc["endpoints"]["endB"]["lugs"] = json!([{ "stud": "M6" }, {}]);
        let out = run(doc.clone());
        assert_eq!(out.findings.len(), 1);
        assert_eq!(out.findings[0].severity, Severity::Error);
        assert_eq!(out.findings[0].where_.as_deref(), Some("endB.lugs[*].stud"));

        doc["endpoints"]["endB"]["lugs"] = json!([]);
        assert_eq!(run(doc).findings.len(), 1);
    }

    #[test]
    fn heat_shrink_required_but_missing() {
        let mut doc = base_doc();
        doc["endpoints"]["endA"]["requires_heat_shrink"] = json!(true);
        let out = run(doc.clone());
        assert_eq!(out.findings.len(), 1);
        assert_eq!(out.fixes[0].id, "FIX_ADD_HEAT_SHRINK_ENDA");
        assert_eq!(out.fixes[0].effect, FixEffect::NonDestructive);

        doc["endpoints"]["endA"]["heat_shrink"] = json!(true);
        assert!(run(doc).is_empty());
    }
}
