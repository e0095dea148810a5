//! Lookup and formatting for `wirecheck explain` and `wirecheck list-rules`.
//!
//! Keys are rule codes (`MECHANICAL/BEND_RADIUS_TOO_SMALL`, case-insensitive) or fix ids,
//! either exact (`FIX_LABEL_OFFSET_DEFAULT`) or with a subject
//! (`FIX_ADD_HEAT_SHRINK_ENDB`).

use wirecheck_domain::{FixInfo, RULE_CATALOG, RuleInfo, find_fix, find_rule};
use wirecheck_types::{FixEffect, Severity};

#[derive(Debug, Clone, Copy)]
pub enum Explained {
    Rule(&'static RuleInfo),
    Fix(&'static FixInfo),
}

pub fn lookup(key: &str) -> Option<Explained> {
    let key = key.trim();
    if let Some(rule) = find_rule(key) {
        return Some(Explained::Rule(rule));
    }
    find_fix(key).map(Explained::Fix)
}

pub fn list_rule_codes() -> Vec<&'static str> {
    RULE_CATALOG.iter().map(|r| r.code).collect()
}

/// Rules whose findings offer this fix.
pub fn rules_offering(fix: &FixInfo) -> Vec<&'static RuleInfo> {
    fix.offered_by.iter().filter_map(|code| find_rule(code)).collect()
}

pub fn format_severity(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "ERROR",
        Severity::Warning => "WARNING",
        Severity::Info => "INFO",
    }
}

pub fn format_effect(effect: FixEffect) -> &'static str {
    match effect {
        FixEffect::NonDestructive => "NON-DESTRUCTIVE",
        FixEffect::Substitution => "SUBSTITUTION",
        FixEffect::ReSynthesisRequired => "RE-SYNTHESIS REQUIRED",
    }
}

pub fn effect_meaning(effect: FixEffect) -> &'static str {
    match effect {
        FixEffect::NonDestructive => {
            "Fills in missing data. No selected part changes, so the BOM is unaffected."
        }
        FixEffect::Substitution => {
            "Changes a part or a part attribute. Check the BOM and sourcing after applying."
        }
        FixEffect::ReSynthesisRequired => {
            "The design has to go back through synthesis; the fix cannot be applied in place."
        }
    }
}

/// Display form of a fix id: the prefix plus its subject placeholder.
pub fn fix_display_id(fix: &FixInfo) -> String {
    match fix.subject {
        Some(subject) => format!("{}{}", fix.id, subject),
        None => fix.id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rule_lookup_ignores_case() {
        match lookup("mechanical/clamp_range_mismatch") {
            Some(Explained::Rule(rule)) => assert_eq!(rule.code, "MECHANICAL/CLAMP_RANGE_MISMATCH"),
            other => panic!("expected rule, got {other:?}"),
        }
    }

    #[test]
    fn fix_lookup_accepts_subject() {
        match lookup("FIX_ADD_HEAT_SHRINK_ENDB") {
            Some(Explained::Fix(fix)) => {
                assert_eq!(fix_display_id(fix), "FIX_ADD_HEAT_SHRINK_<END>");
                assert_eq!(fix.effect, FixEffect::NonDestructive);
            }
            other => panic!("expected fix, got {other:?}"),
        }
    }

    #[test]
    fn unknown_key_is_none() {
        assert!(lookup("NOT_A_RULE").is_none());
    }

    #[test]
    fn offering_rules_resolve() {
        let Some(Explained::Fix(fix)) = lookup("FIX_LABEL_OFFSET_DEFAULT") else {
            panic!("label offset fix missing");
        };
        let codes: Vec<_> = rules_offering(fix).iter().map(|r| r.code).collect();
        assert_eq!(codes, vec!["LABEL_OFFSET_MISSING"]);
    }

    #[test]
    fn every_rule_is_listed() {
        assert_eq!(list_rule_codes().len(), RULE_CATALOG.len());
    }
}
