use wirecheck_rules::RuleTables;
use wirecheck_types::{Assembly, Domain, Finding, Fix};

mod consistency;
mod electrical;
mod labeling;
mod mechanical;
mod standards;

pub use consistency::ConsistencyChecker;
pub use electrical::ElectricalChecker;
pub use labeling::LabelingChecker;
pub use mechanical::MechanicalChecker;
pub use standards::StandardsChecker;

/// Everything a checker may read.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    pub assembly: &'a Assembly,
    pub tables: &'a RuleTables,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckOutput {
    pub findings: Vec<Finding>,
    pub fixes: Vec<Fix>,
}

impl CheckOutput {
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty() && self.fixes.is_empty()
    }

    pub(crate) fn finding(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub(crate) fn fix(&mut self, fix: Fix) {
        self.fixes.push(fix);
    }

    pub fn append(&mut self, mut other: CheckOutput) {
        self.findings.append(&mut other.findings);
        self.fixes.append(&mut other.fixes);
    }
}

/// One domain of design rules.
///
/// Checkers are pure: they read the assembly and tables and never fail. A rule
/// violation is a finding; a rule that cannot be evaluated is skipped.
pub trait Checker: Send + Sync {
    fn domain(&self) -> Domain;

    fn check(&self, ctx: &CheckContext<'_>) -> CheckOutput;
}

/// The built-in checkers in run order.
pub fn builtin_checkers() -> Vec<Box<dyn Checker>> {
    vec![
        Box::new(MechanicalChecker),
        Box::new(ElectricalChecker),
        Box::new(StandardsChecker),
        Box::new(LabelingChecker),
        Box::new(ConsistencyChecker),
    ]
}

/// A string field counts as set only when it is present and non-empty.
pub(crate) fn non_empty(value: &wirecheck_types::Presence<String>) -> Option<&str> {
    value.get().map(String::as_str).filter(|s| !s.is_empty())
}

/// A number counts as set only when it is present and non-zero.
pub(crate) fn non_zero(value: &wirecheck_types::Presence<f64>) -> Option<f64> {
    value.copied().filter(|v| *v != 0.0)
}

#[cfg(test)]
pub(crate) mod test_support {
    use serde_json::{Value, json};
    use wirecheck_types::Assembly;

    /// A clean non-ribbon assembly that passes every rule of the baseline ruleset.
    pub fn base_doc() -> Value {
        json!({
            "assembly_id": "assy-test",
            "schema_hash": "",
            "cable": {
                "type": "sensor_lead",
                "length_mm": 500,
                "od_mm": 5.0,
                "bend_radius_mm": 50.0,
                "environment": { "temp_min_c": -20, "temp_max_c": 80, "flex_class": "static", "chemicals": [] },
                "electrical": {
                    "system_voltage_v": 24,
                    "per_circuit": [
                        { "circuit": "SIG", "current_a": 0.5, "voltage_v": 24 },
                        { "circuit": "RET", "current_a": 0.5, "voltage_v": 24 }
                    ]
                },
                "ratings": { "voltage_v": 300, "temp_c": 105 },
                "locale": "NA",
                "compliance": { "ipc_class": "2", "ul94_v0_labels": true, "rohs_reach": true }
            },
            "conductors": { "count": 2, "awg": 22 },
            "endpoints": {
                "endA": {
                    "connector": { "mpn": "CONN-A", "positions": 2, "pin1_indicator": true },
                    "termination": "crimp",
                    "contacts": { "primary": { "mpn": "CT-22AWG", "plating": "gold-flash" } },
                    "accessories": []
                },
                "endB": {
                    "connector": { "mpn": "CONN-B", "positions": 2, "pin1_indicator": true },
                    "termination": "crimp",
                    "contacts": { "primary": { "mpn": "CT-22AWG", "plating": "gold-flash" } },
                    "accessories": []
                }
            },
            "shield": { "type": "none" },
            "wirelist": [
                { "circuit": "SIG", "conductor": 1, "color": "WHITE" },
                { "circuit": "RET", "conductor": 2, "color": "BLACK" }
            ],
            "bom": [ { "ref": { "mpn": "CONN-A" }, "qty": 1, "role": "primary" } ],
            "labels": {
                "title_block": { "pn": "T-1", "rev": "A", "mfr": "ACME", "date": "01/25" },
                "text": "PN T-1 REV A MFR ACME 01/25",
                "offset_mm": 30
            }
        })
    }

    pub fn assembly(doc: Value) -> Assembly {
        Assembly::from_value(doc).expect("test assembly must validate")
    }
}
