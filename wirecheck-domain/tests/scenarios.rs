//! End-to-end checks of the baseline ruleset against the reference assemblies.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wirecheck_domain::Aggregator;
use wirecheck_rules::Ruleset;
use wirecheck_types::{Assembly, FixEffect, Report, Severity};

fn fixture(name: &str) -> Value {
    let path = format!(
        "{}/../tests/fixtures/assemblies/{}",
        env!("CARGO_MANIFEST_DIR"),
        name
    );
    let text = std::fs::read_to_string(path).expect("read fixture");
    serde_json::from_str(&text).expect("fixture json")
}

fn drc(doc: Value) -> Report {
    let assembly = Assembly::from_value(doc).expect("valid assembly");
    Aggregator::new().run(&assembly, &Ruleset::builtin())
}

#[test]
fn ribbon_assembly_passes_cleanly() {
    let report = drc(fixture("ribbon_12way.json"));
    assert!(report.passed);
    assert_eq!(report.errors, 0);
    assert_eq!(report.warnings, 0);
    assert!(report.fixes.is_empty());
}

#[test]
fn ribbon_positions_follow_ways() {
    let mut doc = fixture("ribbon_12way.json");
    doc["conductors"]["count"] = json!(12);
    let report = drc(doc.clone());
    assert_eq!(
        report
            .findings_with_code("MECHANICAL/CONNECTOR_POSITION_MISMATCH")
            .count(),
        0
    );

    doc["conductors"]["ribbon"]["ways"] = json!(10);
    let report = drc(doc);
    assert_eq!(
        report
            .findings_with_code("MECHANICAL/CONNECTOR_POSITION_MISMATCH")
            .count(),
        2
    );
}

#[test]
fn ring_lug_missing_stud_is_the_only_error() {
    let report = drc(fixture("ring_lug_power.json"));
    let studs: Vec<_> = report
        .findings_with_code("CONSISTENCY/STUD_SIZE_MISSING")
        .collect();
    assert_eq!(studs.len(), 1);
    assert_eq!(studs[0].severity, Severity::Error);
    assert_eq!(studs[0].where_.as_deref(), Some("endB.lugs[*].stud"));
    assert_eq!(report.errors, 1);
    assert!(!report.passed);
}

#[test]
fn ampacity_scenario() {
    let doc = fixture("ring_lug_power.json");
    let report = drc(doc.clone());
    assert_eq!(report.findings_with_code("ELECTRICAL/AMPACITY_MARGIN").count(), 0);

    let mut hot = doc;
    hot["cable"]["electrical"]["per_circuit"][1]["current_a"] = json!(30.0);
    let report = drc(hot);
    let hits: Vec<_> = report.findings_with_code("ELECTRICAL/AMPACITY_MARGIN").collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].severity, Severity::Error);
}

#[test]
fn clamp_scenario_warns_and_offers_substitution() {
    let report = drc(fixture("clamp_sensor.json"));
    let clamps: Vec<_> = report
        .findings_with_code("MECHANICAL/CLAMP_RANGE_MISMATCH")
        .collect();
    assert_eq!(clamps.len(), 1);
    assert_eq!(clamps[0].severity, Severity::Warning);

    let fix = report
        .fixes
        .iter()
        .find(|f| f.id.starts_with("FIX_CLAMP_ADJUST_"))
        .expect("clamp fix");
    assert_eq!(fix.id, "FIX_CLAMP_ADJUST_CLAMP-6MM");
    assert_eq!(fix.effect, FixEffect::Substitution);
    assert!(report.passed);
}

#[test]
fn missing_label_offset_scenario() {
    let mut doc = fixture("ribbon_12way.json");
    doc["labels"].as_object_mut().expect("labels").remove("offset_mm");
    let report = drc(doc);

    let warning = report
        .findings_with_code("LABEL_OFFSET_MISSING")
        .next()
        .expect("offset warning");
    assert_eq!(warning.severity, Severity::Warning);
    let fix = report.fix("FIX_LABEL_OFFSET_DEFAULT").expect("offset fix");
    assert_eq!(fix.effect, FixEffect::NonDestructive);
}

#[test]
fn unknown_ruleset_skips_table_checks_only() {
    let mut doc = fixture("ring_lug_power.json");
    doc["cable"]["electrical"]["per_circuit"][1]["current_a"] = json!(30.0);
    let assembly = Assembly::from_value(doc).expect("valid");

    let report = Aggregator::new().run(&assembly, &Ruleset::unknown("rs-404"));
    assert_eq!(report.ruleset_id, "rs-404");
    assert_eq!(report.version, "unknown");
    assert_eq!(report.findings_with_code("ELECTRICAL/AMPACITY_MARGIN").count(), 0);
    assert_eq!(report.findings_with_code("CONSISTENCY/STUD_SIZE_MISSING").count(), 1);
}

#[test]
fn explicit_ratings_are_checked_without_tables() {
    let mut doc = fixture("clamp_sensor.json");
    doc["cable"]["ratings"] = json!({ "voltage_v": 30, "temp_c": 60 });
    let assembly = Assembly::from_value(doc).expect("valid");

    let report = Aggregator::new().run(&assembly, &Ruleset::unknown("rs-custom"));
    assert_eq!(report.findings_with_code("ELECTRICAL/VOLTAGE_RATING").count(), 1);
    assert_eq!(report.findings_with_code("ELECTRICAL/TEMPERATURE_RATING").count(), 1);
    assert!(!report.passed);
}

#[test]
fn repeated_runs_agree_apart_from_timestamp() {
    let assembly =
        Assembly::from_value(fixture("clamp_sensor.json")).expect("valid assembly");
    let aggregator = Aggregator::new();
    let a = aggregator.run(&assembly, &Ruleset::builtin());
    let b = aggregator.run(&assembly, &Ruleset::builtin());
    assert_eq!(a.findings, b.findings);
    assert_eq!(a.fixes, b.fixes);
}
