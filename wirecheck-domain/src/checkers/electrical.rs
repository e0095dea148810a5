use super::{CheckContext, CheckOutput, Checker, non_empty, non_zero};
use crate::codes;
use crate::fixes::{self, end_suffix};
use crate::mpn::PartNumber;
use tracing::debug;
use wirecheck_types::{Assembly, Domain, Finding, Severity};

pub struct ElectricalChecker;

/// Current profile of the circuits on a cable.
#[derive(Debug, Clone, Copy)]
struct Loading {
    max_current_a: f64,
    loaded_circuits: usize,
    circuits: usize,
}

impl Loading {
    fn of(assembly: &Assembly) -> Self {
        let circuits = assembly
            .cable
            .electrical
            .get()
            .and_then(|e| e.per_circuit.get())
            .map(Vec::as_slice)
            .unwrap_or_default();
        let currents = circuits
            .iter()
            .map(|c| c.current_a.copied().unwrap_or(0.0));
        Self {
            max_current_a: currents.clone().fold(0.0, f64::max),
            loaded_circuits: currents.filter(|a| *a > 0.0).count(),
            circuits: circuits.len(),
        }
    }
}

impl ElectricalChecker {
    /// Bundles with more loaded circuits than this are derated.
    const BUNDLE_THRESHOLD: usize = 3;
    const BUNDLE_FACTOR: f64 = 0.8;
    /// Flat margin applied on top of any bundle derate.
    const DESIGN_MARGIN: f64 = 0.8;
    /// At or below this current a circuit is a low-level signal.
    const LOW_LEVEL_SIGNAL_A: f64 = 1.0;
    const MAX_CONTACT_AWG_DELTA: u32 = 2;

    fn ampacity(ctx: &CheckContext<'_>, loading: Loading, out: &mut CheckOutput) {
        let Some(awg) = ctx.assembly.conductors.awg.copied() else {
            return;
        };
        if loading.circuits == 0 {
            return;
        }
        if !ctx.tables.has_ampacity() {
            debug!(rule = codes::AMPACITY_MARGIN, "ampacity table missing; skipping");
            return;
        }
        let Some(ampacity) = ctx.tables.ampacity(awg) else {
            debug!(awg, "AWG not in ampacity table; skipping");
            return;
        };

        let bundle = if loading.loaded_circuits > Self::BUNDLE_THRESHOLD {
            Self::BUNDLE_FACTOR
        } else {
            1.0
        };
        let allowable = ampacity * bundle * Self::DESIGN_MARGIN;
        if loading.max_current_a > allowable {
            out.finding(
                Finding::new(
                    "ELEC_AMPACITY_MARGIN",
                    Severity::Error,
                    Domain::Electrical,
                    codes::AMPACITY_MARGIN,
                    format!(
                        "Circuit current {}A exceeds the {:.2}A allowed for AWG {} after derating and margin.",
                        loading.max_current_a, allowable, awg
                    ),
                )
                .at("cable.electrical.per_circuit"),
            );
        }
    }

    /// Voltage and temperature ratings. Explicit cable ratings win over the
    /// per-AWG limits of the table.
    fn ratings(ctx: &CheckContext<'_>, out: &mut CheckOutput) {
        let cable = &ctx.assembly.cable;
        let limit = if ctx.tables.has_voltage_temp() {
            ctx.assembly
                .conductors
                .awg
                .copied()
                .and_then(|awg| ctx.tables.voltage_temp(awg))
        } else {
            debug!(rule = codes::VOLTAGE_RATING, "voltage/temp table missing; no per-AWG fallback");
            None
        };
        let ratings = cable.ratings.get();

        let rated_voltage = ratings
            .and_then(|r| non_zero(&r.voltage_v))
            .or(limit.map(|l| l.voltage_v));
        let system_voltage = cable.electrical.get().and_then(|e| non_zero(&e.system_voltage_v));
        if let (Some(rated), Some(system)) = (rated_voltage, system_voltage)
            && rated < system
        {
            out.finding(
                Finding::new(
                    "ELEC_VOLTAGE_RATING",
                    Severity::Error,
                    Domain::Electrical,
                    codes::VOLTAGE_RATING,
                    format!(
                        "Cable voltage rating {}V is below the {}V system voltage.",
                        rated, system
                    ),
                )
                .at("cable.ratings.voltage_v"),
            );
        }

        let rated_temp = ratings
            .and_then(|r| non_zero(&r.temp_c))
            .or(limit.map(|l| l.temp_c));
        let max_temp = cable.environment.get().and_then(|e| non_zero(&e.temp_max_c));
        if let (Some(rated), Some(max)) = (rated_temp, max_temp)
            && rated < max
        {
            out.finding(
                Finding::new(
                    "ELEC_TEMPERATURE_RATING",
                    Severity::Error,
                    Domain::Electrical,
                    codes::TEMPERATURE_RATING,
                    format!(
                        "Cable temperature rating {}°C is below the {}°C environment maximum.",
                        rated, max
                    ),
                )
                .at("cable.ratings.temp_c"),
            );
        }
    }

    fn shield(assembly: &Assembly, out: &mut CheckOutput) {
        let shield = &assembly.shield;
        let Some(shield_type) = non_empty(&shield.shield_type).filter(|t| *t != "none") else {
            return;
        };

        let Some(drain) = non_empty(&shield.drain_policy) else {
            out.finding(
                Finding::new(
                    "ELEC_SHIELD_DRAIN",
                    Severity::Warning,
                    Domain::Electrical,
                    codes::SHIELD_DRAIN_POLICY,
                    format!("Shield type '{}' has no drain policy.", shield_type),
                )
                .at("shield.drain_policy"),
            );
            return;
        };

        for (end_name, endpoint) in &assembly.endpoints {
            let Some(termination) = non_empty(&endpoint.shield_termination) else {
                continue;
            };
            if termination != drain {
                out.finding(
                    Finding::new(
                        format!("ELEC_SHIELD_POLICY_{}", end_suffix(end_name)),
                        Severity::Warning,
                        Domain::Electrical,
                        codes::SHIELD_TERMINATION_MISMATCH,
                        format!(
                            "Shield termination at {} ({}) differs from the drain policy ({}).",
                            end_name, termination, drain
                        ),
                    )
                    .at(format!("endpoints.{}.shield_termination", end_name)),
                );
            }
        }
    }

    fn contact_plating(assembly: &Assembly, loading: Loading, out: &mut CheckOutput) {
        let has_chemicals = assembly
            .cable
            .environment
            .get()
            .and_then(|e| e.chemicals.get())
            .is_some_and(|c| !c.is_empty());
        if !has_chemicals || loading.max_current_a > Self::LOW_LEVEL_SIGNAL_A {
            return;
        }

        for (end_name, endpoint) in &assembly.endpoints {
            let plating = endpoint
                .contacts
                .get()
                .and_then(|c| c.primary.get())
                .and_then(|p| p.plating.get());
            if !plating.is_some_and(|p| p.eq_ignore_ascii_case("tin")) {
                continue;
            }
            out.finding(
                Finding::new(
                    format!("ELEC_CONTACT_PLATING_{}", end_suffix(end_name)),
                    Severity::Warning,
                    Domain::Electrical,
                    codes::CONTACT_PLATING,
                    format!(
                        "Tin-plated contacts at {} carry low-level signals in a chemical environment.",
                        end_name
                    ),
                )
                .at(format!("endpoints.{}.contacts.primary.plating", end_name)),
            );
            out.fix(fixes::contact_plating(end_name));
        }
    }

    fn contact_awg(assembly: &Assembly, out: &mut CheckOutput) {
        let Some(awg) = assembly.conductors.awg.copied() else {
            return;
        };
        for (end_name, endpoint) in &assembly.endpoints {
            let Some(mpn) = endpoint
                .contacts
                .get()
                .and_then(|c| c.primary.get())
                .and_then(|p| non_empty(&p.mpn))
            else {
                continue;
            };
            let Some(contact_awg) = PartNumber::parse(mpn).awg else {
                continue;
            };
            if contact_awg.abs_diff(awg) > Self::MAX_CONTACT_AWG_DELTA {
                out.finding(
                    Finding::new(
                        format!("ELEC_CONTACT_AWG_{}", end_suffix(end_name)),
                        Severity::Warning,
                        Domain::Electrical,
                        codes::CONTACT_AWG_COMPATIBILITY,
                        format!(
                            "Contact {} at {} is rated for AWG {}; the conductors are AWG {}.",
                            mpn, end_name, contact_awg, awg
                        ),
                    )
                    .at(format!("endpoints.{}.contacts.primary.mpn", end_name))
                    .with_ref(mpn),
                );
            }
        }
    }
}

impl Checker for ElectricalChecker {
    fn domain(&self) -> Domain {
        Domain::Electrical
    }

    fn check(&self, ctx: &CheckContext<'_>) -> CheckOutput {
        let mut out = CheckOutput::default();
        let loading = Loading::of(ctx.assembly);
        Self::ampacity(ctx, loading, &mut out);
        Self::ratings(ctx, &mut out);
        Self::shield(ctx.assembly, &mut out);
        Self::contact_plating(ctx.assembly, loading, &mut out);
        Self::contact_awg(ctx.assembly, &mut out);
        out
    }
}
