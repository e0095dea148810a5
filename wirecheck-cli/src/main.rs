mod config;
mod explain;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::ConfigMerger;
use fs_err as fs;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use wirecheck_core::adapters::FsWritePort;
use wirecheck_core::{
    AssemblyInput, DrcEngine, Report, write_apply_artifacts, write_report_artifacts,
};
use wirecheck_domain::{FIX_CATALOG, RULE_CATALOG};

/// Exit code when the checks ran and found errors.
const EXIT_DRC_FAILED: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "wirecheck",
    version,
    about = "Design rule checks and machine-applicable fixes for cable assemblies."
)]
struct Cli {
    /// Config file (default: ./wirecheck.toml when present).
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check an assembly document and write a report.
    Run(RunArgs),
    /// Apply fixes to an assembly, then check it again.
    ApplyFixes(ApplyFixesArgs),
    /// List the rulesets the engine knows.
    Rulesets(RulesetsArgs),
    /// List every rule with its domain and severity.
    ListRules(ListArgs),
    /// Explain a rule code or a fix id.
    Explain(ExplainArgs),
}

#[derive(Debug, Parser)]
struct EngineArgs {
    /// Ruleset id (default: from config, else rs-001).
    #[arg(long)]
    ruleset: Option<String>,

    /// Directory of extra ruleset documents.
    #[arg(long)]
    rules_dir: Option<Utf8PathBuf>,

    /// Output directory for artifacts (default: artifacts/wirecheck).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct RunArgs {
    /// Assembly JSON document.
    assembly: Utf8PathBuf,

    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Debug, Parser)]
struct ApplyFixesArgs {
    /// Assembly JSON document.
    assembly: Utf8PathBuf,

    /// Fix id to apply. Repeatable.
    #[arg(long = "fix")]
    fixes: Vec<String>,

    /// Apply every fix the initial report offers.
    #[arg(long, default_value_t = false)]
    all: bool,

    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Debug, Parser)]
struct RulesetsArgs {
    /// Directory of extra ruleset documents.
    #[arg(long)]
    rules_dir: Option<Utf8PathBuf>,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct ListArgs {
    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct ExplainArgs {
    /// Rule code (e.g. "MECHANICAL/BEND_RADIUS_TOO_SMALL") or fix id (e.g. "FIX_LABEL_OFFSET_DEFAULT").
    key: String,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn real_main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;
    match cli.cmd {
        Command::Run(args) => cmd_run(config.as_deref(), args),
        Command::ApplyFixes(args) => cmd_apply_fixes(config.as_deref(), args),
        Command::Rulesets(args) => cmd_rulesets(config.as_deref(), args),
        Command::ListRules(args) => cmd_list_rules(args),
        Command::Explain(args) => cmd_explain(args),
    }
}

/// Engine plus output dir, from config file and CLI flags.
fn build_engine(
    config_path: Option<&Utf8Path>,
    args: EngineArgs,
) -> anyhow::Result<(DrcEngine, Utf8PathBuf)> {
    let file_config = config::load_or_default(config_path, Utf8Path::new("."))
        .context("load wirecheck.toml config")?;
    let merged = ConfigMerger::new(file_config).merge(args.rules_dir, args.ruleset, args.out_dir);
    debug!(
        "merged config: rules_dir={:?}, default_ruleset={:?}, out_dir={}",
        merged.rules_dir, merged.default_ruleset, merged.out_dir
    );

    let engine = DrcEngine::from_settings(&merged.engine_settings()).context("build engine")?;
    Ok((engine, merged.out_dir))
}

fn read_assembly(path: &Utf8Path) -> anyhow::Result<serde_json::Value> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path))?;
    serde_json::from_str(&text).with_context(|| format!("parse {}", path))
}

fn verdict_exit(report: &Report) -> ExitCode {
    if report.passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_DRC_FAILED)
    }
}

fn cmd_run(config_path: Option<&Utf8Path>, args: RunArgs) -> anyhow::Result<ExitCode> {
    let (engine, out_dir) = build_engine(config_path, args.engine)?;
    let document = read_assembly(&args.assembly)?;

    let report = engine
        .run_drc(AssemblyInput::Json(document), None)
        .with_context(|| format!("check {}", args.assembly))?;

    write_report_artifacts(&report, &out_dir, &FsWritePort)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    info!("wrote report to {}", out_dir);
    Ok(verdict_exit(&report))
}

fn cmd_apply_fixes(
    config_path: Option<&Utf8Path>,
    args: ApplyFixesArgs,
) -> anyhow::Result<ExitCode> {
    let (engine, out_dir) = build_engine(config_path, args.engine)?;
    let document = read_assembly(&args.assembly)?;

    let mut fix_ids = args.fixes;
    let input = if args.all {
        let initial = engine
            .run_drc(AssemblyInput::Json(document), None)
            .with_context(|| format!("check {}", args.assembly))?;
        for id in initial.fix_ids() {
            if !fix_ids.contains(&id) {
                fix_ids.push(id);
            }
        }
        AssemblyInput::Reference(initial.assembly_id)
    } else {
        AssemblyInput::Json(document)
    };

    if fix_ids.is_empty() {
        info!("no fixes requested");
    }

    let outcome = engine
        .apply_fixes(input, &fix_ids, None)
        .with_context(|| format!("apply fixes to {}", args.assembly))?;

    write_apply_artifacts(&outcome, &out_dir, &FsWritePort)?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    info!("wrote apply artifacts to {}", out_dir);
    Ok(verdict_exit(&outcome.drc))
}

fn cmd_rulesets(config_path: Option<&Utf8Path>, args: RulesetsArgs) -> anyhow::Result<ExitCode> {
    let (engine, _) = build_engine(
        config_path,
        EngineArgs {
            ruleset: None,
            rules_dir: args.rules_dir,
            out_dir: None,
        },
    )?;
    let default_id = engine.catalog().default_id().to_string();
    let rulesets = engine.rulesets();

    match args.format {
        OutputFormat::Text => {
            println!("  {:<16} {:<10} {:<22} NOTES", "ID", "VERSION", "CREATED");
            println!("  {:<16} {:<10} {:<22} -----", "--", "-------", "-------");
            for r in &rulesets {
                let marker = if r.id == default_id { "*" } else { " " };
                println!(
                    "{} {:<16} {:<10} {:<22} {}",
                    marker, r.id, r.version, r.created_at, r.notes
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rulesets)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_list_rules(args: ListArgs) -> anyhow::Result<ExitCode> {
    use explain::{format_effect, format_severity, fix_display_id};

    match args.format {
        OutputFormat::Text => {
            println!("Rules:\n");
            println!("  {:<40} {:<12} {:<8} TITLE", "CODE", "DOMAIN", "SEVERITY");
            println!("  {:<40} {:<12} {:<8} -----", "----", "------", "--------");
            for rule in RULE_CATALOG {
                println!(
                    "  {:<40} {:<12} {:<8} {}",
                    rule.code,
                    rule.domain.as_str(),
                    format_severity(rule.severity),
                    rule.title
                );
            }
            println!("\nFixes:\n");
            for fix in FIX_CATALOG {
                println!(
                    "  {:<40} {:<22} {}",
                    fix_display_id(fix),
                    format_effect(fix.effect),
                    fix.title
                );
            }
            println!();
            println!("Use 'wirecheck explain <code>' for details.");
        }
        OutputFormat::Json => {
            let rules: Vec<_> = RULE_CATALOG
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "code": r.code,
                        "domain": r.domain,
                        "severity": r.severity,
                        "title": r.title,
                    })
                })
                .collect();
            let fixes: Vec<_> = FIX_CATALOG
                .iter()
                .map(|f| {
                    serde_json::json!({
                        "id": fix_display_id(f),
                        "effect": f.effect,
                        "title": f.title,
                    })
                })
                .collect();
            let listing = serde_json::json!({ "rules": rules, "fixes": fixes });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_explain(args: ExplainArgs) -> anyhow::Result<ExitCode> {
    use explain::{
        Explained, effect_meaning, fix_display_id, format_effect, format_severity,
        list_rule_codes, lookup, rules_offering,
    };

    let Some(found) = lookup(&args.key) else {
        let available = list_rule_codes().join(", ");
        anyhow::bail!(
            "Unknown rule code or fix id: '{}'\n\nAvailable rules: {}",
            args.key,
            available
        );
    };

    let rule_line = "--------------------------------------------------------------------------------";
    match found {
        Explained::Rule(rule) => {
            println!("================================================================================");
            println!("RULE: {}", rule.title);
            println!("================================================================================");
            println!();
            println!("Code:     {}", rule.code);
            println!("Domain:   {}", rule.domain);
            println!("Severity: {}", format_severity(rule.severity));
            println!();
            println!("DESCRIPTION");
            println!("{}", rule_line);
            println!("{}", rule.description);
            println!();
            println!("REMEDIATION");
            println!("{}", rule_line);
            println!("{}", rule.remediation);
            println!();

            let offered: Vec<String> = FIX_CATALOG
                .iter()
                .filter(|f| f.offered_by.contains(&rule.code))
                .map(fix_display_id)
                .collect();
            if !offered.is_empty() {
                println!("FIXES OFFERED");
                println!("{}", rule_line);
                for id in offered {
                    println!("  - {}", id);
                }
                println!();
            }
        }
        Explained::Fix(fix) => {
            println!("================================================================================");
            println!("FIX: {}", fix.title);
            println!("================================================================================");
            println!();
            println!("Fix ID:  {}", fix_display_id(fix));
            println!("Effect:  {}", format_effect(fix.effect));
            println!();
            println!("DESCRIPTION");
            println!("{}", rule_line);
            println!("{}", fix.description);
            println!();
            println!("EFFECT: {}", format_effect(fix.effect));
            println!("{}", rule_line);
            println!("{}", effect_meaning(fix.effect));
            println!();
            println!("OFFERED BY");
            println!("{}", rule_line);
            for rule in rules_offering(fix) {
                println!("  - {} ({})", rule.code, rule.title);
            }
            println!();
        }
    }

    Ok(ExitCode::SUCCESS)
}
