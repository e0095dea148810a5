//! Static registry of rules and fixes, used by `list-rules` and `explain`.

use crate::{codes, fixes};
use wirecheck_types::{Domain, FixEffect, Severity};

#[derive(Debug, Clone)]
pub struct RuleInfo {
    pub code: &'static str,
    pub domain: Domain,
    /// Worst severity the rule reports.
    pub severity: Severity,
    pub title: &'static str,
    pub description: &'static str,
    pub remediation: &'static str,
}

#[derive(Debug, Clone)]
pub struct FixInfo {
    /// Exact id, or id prefix for fixes that carry a subject.
    pub id: &'static str,
    pub subject: Option<&'static str>,
    pub effect: FixEffect,
    pub title: &'static str,
    pub description: &'static str,
    /// Rule codes that offer this fix.
    pub offered_by: &'static [&'static str],
}

pub static RULE_CATALOG: &[RuleInfo] = &[
    RuleInfo {
        code: codes::CONNECTOR_POSITION_MISMATCH,
        domain: Domain::Mechanical,
        severity: Severity::Error,
        title: "Connector position count",
        description: "Every connector must have as many positions as the cable has conductors \
(ribbon ways for ribbon cable). When `positions` is not declared, a `<n>POS` segment of the \
connector MPN is used instead.",
        remediation: "Pick a connector with the right position count, or correct conductors.count / ribbon.ways.",
    },
    RuleInfo {
        code: codes::TERMINATION_TYPE,
        domain: Domain::Mechanical,
        severity: Severity::Error,
        title: "Termination type",
        description: "Ribbon cable terminates in IDC connectors; IDC is not valid on round cable.",
        remediation: "Change the endpoint termination, or the cable type.",
    },
    RuleInfo {
        code: codes::BEND_RADIUS_TOO_SMALL,
        domain: Domain::Mechanical,
        severity: Severity::Error,
        title: "Bend radius",
        description: "The design bend radius must not be below the recommended minimum: the declared \
min_bend_radius_mm, else the ribbon pitch table, else 8 x cable OD. Reported as a warning for \
static cables and as an error for flexing ones.",
        remediation: "Increase the routing bend radius or choose a more flexible cable.",
    },
    RuleInfo {
        code: codes::CLAMP_RANGE_MISMATCH,
        domain: Domain::Mechanical,
        severity: Severity::Error,
        title: "Clamp range",
        description: "Clamp accessories must grip the cable OD. Within 0.2 mm of the range this is a \
warning with a clamp adjustment fix; further out it is an error.",
        remediation: "Choose a clamp or insert sized for the cable OD.",
    },
    RuleInfo {
        code: codes::AMPACITY_MARGIN,
        domain: Domain::Electrical,
        severity: Severity::Error,
        title: "Ampacity margin",
        description: "The highest circuit current must stay within ampacity(AWG) x bundle factor x 0.8. \
The bundle factor is 0.8 when more than three circuits carry current.",
        remediation: "Use a heavier gauge or split the load across conductors.",
    },
    RuleInfo {
        code: codes::VOLTAGE_RATING,
        domain: Domain::Electrical,
        severity: Severity::Error,
        title: "Voltage rating",
        description: "The cable voltage rating (or the AWG limit of the ruleset) must reach the system voltage.",
        remediation: "Select cable insulation rated for the system voltage.",
    },
    RuleInfo {
        code: codes::TEMPERATURE_RATING,
        domain: Domain::Electrical,
        severity: Severity::Error,
        title: "Temperature rating",
        description: "The cable temperature rating (or the AWG limit of the ruleset) must reach the \
environment maximum.",
        remediation: "Select a cable rated for the environment temperature.",
    },
    RuleInfo {
        code: codes::SHIELD_TERMINATION_MISMATCH,
        domain: Domain::Electrical,
        severity: Severity::Warning,
        title: "Shield termination",
        description: "Endpoint shield terminations must agree with the cable drain policy.",
        remediation: "Align the endpoint shield_termination with shield.drain_policy.",
    },
    RuleInfo {
        code: codes::SHIELD_DRAIN_POLICY,
        domain: Domain::Electrical,
        severity: Severity::Warning,
        title: "Shield drain policy",
        description: "A shielded cable must declare how its drain is terminated.",
        remediation: "Set shield.drain_policy (isolated, fold_back, pigtail).",
    },
    RuleInfo {
        code: codes::CONTACT_PLATING,
        domain: Domain::Electrical,
        severity: Severity::Warning,
        title: "Contact plating",
        description: "Tin-plated contacts on low-level signals (1 A or less) corrode when chemicals are present.",
        remediation: "Apply the contact plating fix or choose gold-flash contacts.",
    },
    RuleInfo {
        code: codes::CONTACT_AWG_COMPATIBILITY,
        domain: Domain::Electrical,
        severity: Severity::Warning,
        title: "Contact wire gauge",
        description: "A `<n>AWG` segment in the primary contact MPN must be within 2 gauges of the conductors.",
        remediation: "Pick contacts rated for the conductor gauge.",
    },
    RuleInfo {
        code: codes::IPC_CLASS,
        domain: Domain::Standards,
        severity: Severity::Error,
        title: "IPC/WHMA-A-620 class",
        description: "The acceptance class must be declared.",
        remediation: "Set cable.compliance.ipc_class.",
    },
    RuleInfo {
        code: codes::ROHS_REACH,
        domain: Domain::Standards,
        severity: Severity::Error,
        title: "RoHS/REACH",
        description: "The design must declare RoHS/REACH compliance with a literal true.",
        remediation: "Set cable.compliance.rohs_reach to true once verified.",
    },
    RuleInfo {
        code: codes::UL94_V0,
        domain: Domain::Standards,
        severity: Severity::Error,
        title: "UL94-V0 labels",
        description: "When labels are present their material must be declared UL94-V0.",
        remediation: "Set cable.compliance.ul94_v0_labels to true with a V0 label stock.",
    },
    RuleInfo {
        code: codes::TITLE_BLOCK_MISSING,
        domain: Domain::Labeling,
        severity: Severity::Error,
        title: "Title block",
        description: "The title block needs pn, rev, mfr and date.",
        remediation: "Fill in the missing title block fields.",
    },
    RuleInfo {
        code: codes::TEXT_CONTENT,
        domain: Domain::Labeling,
        severity: Severity::Warning,
        title: "Label text",
        description: "Label text should contain PN, REV and MFR and a digit for the date code.",
        remediation: "Extend the label text.",
    },
    RuleInfo {
        code: codes::LABEL_OFFSET_MISSING,
        domain: Domain::Labeling,
        severity: Severity::Warning,
        title: "Label offset missing",
        description: "The label position along the cable is not specified.",
        remediation: "Apply FIX_LABEL_OFFSET_DEFAULT or set labels.offset_mm.",
    },
    RuleInfo {
        code: codes::OFFSET_RANGE,
        domain: Domain::Labeling,
        severity: Severity::Warning,
        title: "Label offset range",
        description: "The label offset should be between 25 and 50 mm.",
        remediation: "Move the label into the recommended band.",
    },
    RuleInfo {
        code: codes::RIBBON_RED_STRIPE,
        domain: Domain::Consistency,
        severity: Severity::Warning,
        title: "Ribbon red stripe",
        description: "Ribbon cable should mark conductor 1 with a red stripe.",
        remediation: "Use striped ribbon and set conductors.ribbon.red_stripe.",
    },
    RuleInfo {
        code: codes::PIN1_INDICATOR,
        domain: Domain::Consistency,
        severity: Severity::Warning,
        title: "Pin-1 indicator",
        description: "Each declared connector should carry a pin-1 indicator.",
        remediation: "Choose a keyed or marked connector.",
    },
    RuleInfo {
        code: codes::LOCALE_COLOR,
        domain: Domain::Consistency,
        severity: Severity::Warning,
        title: "Mains conductor colors",
        description: "L/N/PE conductor colors must follow the locale convention of the ruleset (IEC for EU).",
        remediation: "Recolor the wirelist entries.",
    },
    RuleInfo {
        code: codes::STUD_SIZE_MISSING,
        domain: Domain::Consistency,
        severity: Severity::Error,
        title: "Ring lug stud size",
        description: "Every ring lug needs a stud size.",
        remediation: "Set lugs[].stud for the endpoint.",
    },
    RuleInfo {
        code: codes::HEAT_SHRINK,
        domain: Domain::Consistency,
        severity: Severity::Warning,
        title: "Heat-shrink",
        description: "An endpoint that requires heat-shrink must have it fitted.",
        remediation: "Apply the heat-shrink fix for the endpoint.",
    },
];

pub static FIX_CATALOG: &[FixInfo] = &[
    FixInfo {
        id: fixes::LABEL_OFFSET_DEFAULT,
        subject: None,
        effect: FixEffect::NonDestructive,
        title: "Default label offset",
        description: "Sets labels.offset_mm to 30.",
        offered_by: &[codes::LABEL_OFFSET_MISSING],
    },
    FixInfo {
        id: fixes::CLAMP_ADJUST_PREFIX,
        subject: Some("<clamp MPN or end_index>"),
        effect: FixEffect::Substitution,
        title: "Clamp adjustment",
        description: "Widens the clamp range to bracket the cable OD by 0.05 mm on each side.",
        offered_by: &[codes::CLAMP_RANGE_MISMATCH],
    },
    FixInfo {
        id: fixes::CONTACT_PLATING_PREFIX,
        subject: Some("<END>"),
        effect: FixEffect::Substitution,
        title: "Contact plating upgrade",
        description: "Sets the endpoint's primary contact plating to gold-flash.",
        offered_by: &[codes::CONTACT_PLATING],
    },
    FixInfo {
        id: fixes::ADD_HEAT_SHRINK_PREFIX,
        subject: Some("<END>"),
        effect: FixEffect::NonDestructive,
        title: "Add heat-shrink",
        description: "Sets heat_shrink = true on the endpoint.",
        offered_by: &[codes::HEAT_SHRINK],
    },
];

/// Look up a rule by code, ignoring ASCII case.
pub fn find_rule(code: &str) -> Option<&'static RuleInfo> {
    RULE_CATALOG.iter().find(|r| r.code.eq_ignore_ascii_case(code))
}

/// Look up a fix by full id or by its catalog id/prefix.
pub fn find_fix(id: &str) -> Option<&'static FixInfo> {
    FIX_CATALOG.iter().find(|f| match f.subject {
        None => f.id.eq_ignore_ascii_case(id),
        Some(_) => id
            .get(..f.id.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(f.id)),
    })
}
