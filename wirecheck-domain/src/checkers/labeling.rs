use super::{CheckContext, CheckOutput, Checker, non_empty};
use crate::codes;
use crate::fixes;
use wirecheck_types::assembly::{Labels, TitleBlock};
use wirecheck_types::{Domain, Finding, Severity};

pub struct LabelingChecker;

impl LabelingChecker {
    const REQUIRED_TOKENS: [&'static str; 3] = ["PN", "REV", "MFR"];
    const OFFSET_MIN_MM: f64 = 25.0;
    const OFFSET_MAX_MM: f64 = 50.0;

    fn missing_title_fields(title: Option<&TitleBlock>) -> Vec<&'static str> {
        let Some(title) = title else {
            return vec!["pn", "rev", "mfr", "date"];
        };
        [
            ("pn", &title.pn),
            ("rev", &title.rev),
            ("mfr", &title.mfr),
            ("date", &title.date),
        ]
        .into_iter()
        .filter(|(_, value)| non_empty(value).is_none())
        .map(|(name, _)| name)
        .collect()
    }

    fn text_is_complete(text: &str) -> bool {
        let upper = text.to_uppercase();
        Self::REQUIRED_TOKENS.iter().all(|token| upper.contains(token))
            && text.chars().any(|c| c.is_ascii_digit())
    }
}

impl Checker for LabelingChecker {
    fn domain(&self) -> Domain {
        Domain::Labeling
    }

    fn check(&self, ctx: &CheckContext<'_>) -> CheckOutput {
        let mut out = CheckOutput::default();
        let empty = Labels::default();
        let labels = ctx.assembly.labels.get().unwrap_or(&empty);

        let missing = Self::missing_title_fields(labels.title_block.get());
        if !missing.is_empty() {
            out.finding(
                Finding::new(
                    "LAB_TITLE_BLOCK",
                    Severity::Error,
                    Domain::Labeling,
                    codes::TITLE_BLOCK_MISSING,
                    format!("Title block missing fields: {}.", missing.join(", ")),
                )
                .at("labels.title_block"),
            );
        }

        let text = labels.text.get().map(String::as_str).unwrap_or_default();
        if !Self::text_is_complete(text) {
            out.finding(
                Finding::new(
                    "LAB_TEXT_CONTENT",
                    Severity::Warning,
                    Domain::Labeling,
                    codes::TEXT_CONTENT,
                    "Label text should carry PN, REV and MFR along with a date code.",
                )
                .at("labels.text"),
            );
        }

        match labels.offset_mm.copied() {
            None => {
                out.finding(
                    Finding::new(
                        "LAB_OFFSET_MISSING",
                        Severity::Warning,
                        Domain::Labeling,
                        codes::LABEL_OFFSET_MISSING,
                        format!(
                            "Label offset is not specified; {}mm from the end is the default.",
                            fixes::LABEL_OFFSET_DEFAULT_MM
                        ),
                    )
                    .at("labels.offset_mm"),
                );
                out.fix(fixes::label_offset_default());
            }
            Some(offset) if !(Self::OFFSET_MIN_MM..=Self::OFFSET_MAX_MM).contains(&offset) => {
                out.finding(
                    Finding::new(
                        "LAB_OFFSET_RANGE",
                        Severity::Warning,
                        Domain::Labeling,
                        codes::OFFSET_RANGE,
                        format!(
                            "Label offset {}mm is outside the recommended {}-{}mm.",
                            offset,
                            Self::OFFSET_MIN_MM,
                            Self::OFFSET_MAX_MM
                        ),
                    )
                    .at("labels.offset_mm"),
                );
            }
            Some(_) => {}
        }

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

    fn run(doc: Value) -> CheckOutput {
        let assembly = assembly(doc);
        let tables = RuleTables::builtin();
        LabelingChecker.check(&CheckContext { assembly: &assembly, tables: &tables })
    }

    #[test]
    fn clean_assembly_has_no_findings() {
        assert!(run(base_doc()).is_empty());
    }

    #[test]
    fn title_block_lists_missing_fields_in_order() {
        let mut doc = base_doc();
        doc["labels"]["title_block"] = json!({ "pn": "T-1", "rev": "", "mfr": null });
        let out = run(doc);
        assert_eq!(out.findings.len(), 1);
        assert_eq!(out.findings[0].message, "Title block missing fields: rev, mfr, date.");
    }

    #[test]
    fn text_needs_tokens_and_a_digit() {
        let mut doc = base_doc();
        doc["labels"]["text"] = json!("pn t rev a mfr acme");
        assert_eq!(run(doc.clone()).findings[0].code, codes::TEXT_CONTENT);

        doc["labels"]["text"] = json!("pn t-1 rev a mfr acme");
        assert!(run(doc).is_empty());
    }

    #[test]
    fn missing_offset_offers_default_fix() {
        let mut doc = base_doc();
        doc["labels"].as_object_mut().expect("labels").remove("offset_mm");
        let out = run(doc);
        assert_eq!(out.findings.len(), 1);
        assert_eq!(out.findings[0].code, "LABEL_OFFSET_MISSING");
        assert_eq!(out.fixes.len(), 1);
        assert_eq!(out.fixes[0].id, "FIX_LABEL_OFFSET_DEFAULT");
        assert_eq!(out.fixes[0].effect, FixEffect::NonDestructive);
    }

    #[test]
    fn null_offset_counts_as_missing() {
        let mut doc = base_doc();
        doc["labels"]["offset_mm"] = Value::Null;
        assert_eq!(run(doc).fixes.len(), 1);
    }

    #[test]
    fn offset_range_is_inclusive() {
        for (offset, expected) in [(25.0, 0), (50.0, 0), (24.9, 1), (50.5, 1)] {
            let mut doc = base_doc();
            doc["labels"]["offset_mm"] = json!(offset);
            let out = run(doc);
            assert_eq!(out.findings.len(), expected, "offset {offset}");
            assert!(out.fixes.is_empty());
        }
    }

    #[test]
    fn absent_labels_report_every_labeling_gap() {
        let mut doc = base_doc();
        doc.as_object_mut().expect("doc").remove("labels");
        let seen: Vec<_> = run(doc).findings.into_iter().map(|f| f.code).collect();
        assert_eq!(
            seen,
            vec![
                codes::TITLE_BLOCK_MISSING.to_string(),
                codes::TEXT_CONTENT.to_string(),
                codes::LABEL_OFFSET_MISSING.to_string(),
            ]
        );
    }
}
