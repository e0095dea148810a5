use super::{CheckContext, CheckOutput, Checker, non_empty};
use crate::codes;
use wirecheck_types::{Domain, Finding, Severity};

pub struct StandardsChecker;

impl Checker for StandardsChecker {
    fn domain(&self) -> Domain {
        Domain::Standards
    }

    fn check(&self, ctx: &CheckContext<'_>) -> CheckOutput {
        let mut out = CheckOutput::default();
        let assembly = ctx.assembly;
        let compliance = assembly.cable.compliance.get();

        if compliance.and_then(|c| non_empty(&c.ipc_class)).is_none() {
            out.finding(
                Finding::new(
                    "STD_IPC_CLASS",
                    Severity::Error,
                    Domain::Standards,
                    codes::IPC_CLASS,
                    "IPC/WHMA-A-620 acceptance class must be specified.",
                )
                .at("cable.compliance.ipc_class"),
            );
        }

        // Only a literal `true` counts as a declaration.
        if compliance.and_then(|c| c.rohs_reach.copied()) != Some(true) {
            out.finding(
                Finding::new(
                    "STD_ROHS_REACH",
                    Severity::Error,
                    Domain::Standards,
                    codes::ROHS_REACH,
                    "RoHS/REACH compliance must be declared.",
                )
                .at("cable.compliance.rohs_reach"),
            );
        }

        let has_labels = assembly.labels.get().is_some_and(|l| !l.is_empty());
        if has_labels && compliance.and_then(|c| c.ul94_v0_labels.copied()) != Some(true) {
            out.finding(
                Finding::new(
                    "STD_UL94_V0",
                    Severity::Error,
                    Domain::Standards,
                    codes::UL94_V0,
                    "Label material must be UL94-V0 rated when labels are present.",
                )
                .at("cable.compliance.ul94_v0_labels"),
            );
        }

        out
    }
}
