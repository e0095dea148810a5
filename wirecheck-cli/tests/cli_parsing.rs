//! CLI behaviour: subcommands, exit codes, artifacts and config precedence.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn wirecheck() -> Command {
    Command::cargo_bin("wirecheck").expect("wirecheck binary")
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../tests/fixtures/assemblies")
        .join(name)
}

fn workdir() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

fn out_dir(temp: &TempDir) -> PathBuf {
    temp.path().join("artifacts").join("wirecheck")
}

fn write_ruleset(dir: &Path, id: &str) {
    fs::create_dir_all(dir).expect("mkdir");
    fs::write(
        dir.join(format!("{id}.json")),
        format!(r#"{{ "id": "{id}", "version": "2.0.0", "notes": "test ruleset" }}"#),
    )
    .expect("write ruleset");
}

#[test]
fn test_run_clean_assembly_passes() {
    let temp = workdir();

    wirecheck()
        .current_dir(temp.path())
        .arg("run")
        .arg(fixture("ribbon_12way.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"passed\": true"))
        .stdout(predicate::str::contains("\"ruleset_id\": \"rs-001\""));

    assert!(out_dir(&temp).join("report.json").is_file());
    assert!(out_dir(&temp).join("report.md").is_file());
}

#[test]
fn test_run_with_errors_exits_2() {
    let temp = workdir();

    wirecheck()
        .current_dir(temp.path())
        .arg("run")
        .arg(fixture("ring_lug_power.json"))
        .assert()
        .code(2)
        .stdout(predicate::str::contains("CONSISTENCY/STUD_SIZE_MISSING"));
}

#[test]
fn test_run_warnings_only_exits_0() {
    let temp = workdir();

    wirecheck()
        .current_dir(temp.path())
        .arg("run")
        .arg(fixture("clamp_sensor.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("FIX_CLAMP_ADJUST_CLAMP-6MM"));
}

#[test]
fn test_run_missing_file_is_tool_error() {
    let temp = workdir();

    wirecheck()
        .current_dir(temp.path())
        .arg("run")
        .arg(temp.path().join("nope.json"))
        .assert()
        .code(1);
}

#[test]
fn test_run_schema_violation_is_tool_error() {
    let temp = workdir();
    let doc = temp.path().join("bad.json");
    fs::write(
        &doc,
        r#"{"assembly_id":"bad","cable":{"od_mm":-2},"conductors":{},"endpoints":{},
            "shield":{},"wirelist":[],"bom":[]}"#,
    )
    .expect("write doc");

    wirecheck()
        .current_dir(temp.path())
        .arg("run")
        .arg(&doc)
        .assert()
        .code(1);

    assert!(!out_dir(&temp).join("report.json").exists());
}

#[test]
fn test_run_unknown_ruleset_still_reports() {
    let temp = workdir();

    wirecheck()
        .current_dir(temp.path())
        .arg("run")
        .arg(fixture("ribbon_12way.json"))
        .arg("--ruleset")
        .arg("rs-missing")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ruleset_id\": \"rs-missing\""))
        .stdout(predicate::str::contains("\"version\": \"unknown\""));
}

#[test]
fn test_run_custom_out_dir() {
    let temp = workdir();
    let custom = temp.path().join("custom");

    wirecheck()
        .current_dir(temp.path())
        .arg("run")
        .arg(fixture("ribbon_12way.json"))
        .arg("--out-dir")
        .arg(&custom)
        .assert()
        .success();

    assert!(custom.join("report.json").is_file());
    assert!(!out_dir(&temp).exists());
}

#[test]
fn test_apply_fixes_writes_artifacts() {
    let temp = workdir();

    wirecheck()
        .current_dir(temp.path())
        .arg("apply-fixes")
        .arg(fixture("clamp_sensor.json"))
        .arg("--fix")
        .arg("FIX_CLAMP_ADJUST_CLAMP-6MM")
        .arg("--fix")
        .arg("FIX_DOES_NOT_EXIST")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"applied\""))
        .stdout(predicate::str::contains("FIX_DOES_NOT_EXIST"));

    let out = out_dir(&temp);
    for name in ["report.json", "report.md", "assembly.json", "patch.diff", "apply.md"] {
        assert!(out.join(name).is_file(), "missing {name}");
    }
    let patch = fs::read_to_string(out.join("patch.diff")).expect("read patch");
    assert!(patch.contains("max_od_mm"));
}

#[test]
fn test_apply_fixes_all_clears_offered_fixes() {
    let temp = workdir();

    wirecheck()
        .current_dir(temp.path())
        .arg("apply-fixes")
        .arg(fixture("clamp_sensor.json"))
        .arg("--all")
        .assert()
        .success()
        .stdout(predicate::str::contains("FIX_CLAMP_ADJUST_CLAMP-6MM"))
        .stdout(predicate::str::contains("MECHANICAL/CLAMP_RANGE_MISMATCH").not());
}

#[test]
fn test_rulesets_text_marks_default() {
    wirecheck()
        .arg("rulesets")
        .assert()
        .success()
        .stdout(predicate::str::contains("* rs-001"))
        .stdout(predicate::str::contains("Baseline deterministic ruleset"));
}

#[test]
fn test_rulesets_json_format() {
    wirecheck()
        .arg("rulesets")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": \"rs-001\""))
        .stdout(predicate::str::contains("\"created_at\": \"2025-01-01T00:00:00Z\""));
}

#[test]
fn test_config_file_adds_rulesets_and_default() {
    let temp = workdir();
    write_ruleset(&temp.path().join("rulesets"), "rs-site");
    fs::write(
        temp.path().join("wirecheck.toml"),
        "[rules]\ndir = \"rulesets\"\ndefault_ruleset = \"rs-site\"\n",
    )
    .expect("write config");

    wirecheck()
        .current_dir(temp.path())
        .arg("rulesets")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("rs-site"));

    wirecheck()
        .current_dir(temp.path())
        .arg("run")
        .arg(fixture("ribbon_12way.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ruleset_id\": \"rs-site\""));

    // CLI flag wins over the file.
    wirecheck()
        .current_dir(temp.path())
        .arg("run")
        .arg(fixture("ribbon_12way.json"))
        .arg("--ruleset")
        .arg("rs-001")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ruleset_id\": \"rs-001\""));
}

#[test]
fn test_explicit_config_path() {
    let temp = workdir();
    let conf_dir = temp.path().join("conf");
    fs::create_dir_all(&conf_dir).expect("mkdir");
    fs::write(conf_dir.join("site.toml"), "[output]\ndir = \"out\"\n").expect("write config");

    wirecheck()
        .current_dir(temp.path())
        .arg("--config")
        .arg(conf_dir.join("site.toml"))
        .arg("run")
        .arg(fixture("ribbon_12way.json"))
        .assert()
        .success();

    assert!(conf_dir.join("out").join("report.json").is_file());
}

#[test]
fn test_invalid_config_is_tool_error() {
    let temp = workdir();
    fs::write(temp.path().join("wirecheck.toml"), "[rules\n").expect("write config");

    wirecheck()
        .current_dir(temp.path())
        .arg("run")
        .arg(fixture("ribbon_12way.json"))
        .assert()
        .code(1);
}

#[test]
fn test_list_rules_text_format() {
    wirecheck()
        .arg("list-rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("MECHANICAL/CONNECTOR_POSITION_MISMATCH"))
        .stdout(predicate::str::contains("LABEL_OFFSET_MISSING"))
        .stdout(predicate::str::contains("FIX_ADD_HEAT_SHRINK_<END>"));
}

#[test]
fn test_list_rules_json_format() {
    wirecheck()
        .arg("list-rules")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"rules\""))
        .stdout(predicate::str::contains("\"severity\": \"error\""));
}

#[test]
fn test_list_rules_invalid_format() {
    wirecheck()
        .arg("list-rules")
        .arg("--format")
        .arg("yaml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_explain_rule() {
    wirecheck()
        .arg("explain")
        .arg("consistency/stud_size_missing")
        .assert()
        .success()
        .stdout(predicate::str::contains("Code:     CONSISTENCY/STUD_SIZE_MISSING"))
        .stdout(predicate::str::contains("REMEDIATION"));
}

#[test]
fn test_explain_fix_with_subject() {
    wirecheck()
        .arg("explain")
        .arg("FIX_CLAMP_ADJUST_CLAMP-6MM")
        .assert()
        .success()
        .stdout(predicate::str::contains("SUBSTITUTION"))
        .stdout(predicate::str::contains("MECHANICAL/CLAMP_RANGE_MISMATCH"));
}

#[test]
fn test_explain_unknown_key() {
    wirecheck()
        .arg("explain")
        .arg("NOT_A_RULE")
        .assert()
        .failure();
}

#[test]
fn test_unknown_subcommand() {
    wirecheck()
        .arg("lint")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized").or(predicate::str::contains("invalid")));
}

#[test]
fn test_help_flag() {
    wirecheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("apply-fixes"))
        .stdout(predicate::str::contains("list-rules"));
}

#[test]
fn test_version_flag() {
    wirecheck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wirecheck"));
}
