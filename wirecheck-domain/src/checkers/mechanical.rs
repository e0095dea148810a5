use super::{CheckContext, CheckOutput, Checker, non_empty, non_zero};
use crate::codes;
use crate::fixes::{self, end_suffix};
use crate::mpn::PartNumber;
use tracing::debug;
use wirecheck_types::{Assembly, Domain, Finding, Severity};

pub struct MechanicalChecker;

impl MechanicalChecker {
    /// A clamp this close to the cable OD is a substitution, not a redesign.
    const CLAMP_TOLERANCE_MM: f64 = 0.2;
    const OD_BEND_MULTIPLIER: f64 = 8.0;
    const RIBBON_TERMINATION: &'static str = "idc";

    /// Positions every connector must have.
    fn expected_positions(assembly: &Assembly) -> usize {
        if assembly.is_ribbon()
            && let Some(ways) = assembly
                .conductors
                .ribbon
                .get()
                .and_then(|r| r.ways.copied())
                .filter(|w| *w > 0)
        {
            return ways as usize;
        }
        match assembly.conductors.count.copied().filter(|c| *c > 0) {
            Some(count) => count as usize,
            None => assembly.wirelist.len(),
        }
    }

    fn connector_positions(assembly: &Assembly, out: &mut CheckOutput) {
        let expected = Self::expected_positions(assembly);
        for (end_name, endpoint) in &assembly.endpoints {
            let Some(connector) = endpoint.connector.get() else {
                continue;
            };

            let (positions, path) = match connector.positions.copied() {
                Some(p) => (p, format!("endpoints.{}.connector.positions", end_name)),
                None => {
                    let from_mpn = non_empty(&connector.mpn)
                        .and_then(|mpn| PartNumber::parse(mpn).positions);
                    match from_mpn {
                        Some(p) => (p, format!("endpoints.{}.connector.mpn", end_name)),
                        None => continue,
                    }
                }
            };

            if positions as usize != expected {
                out.finding(
                    Finding::new(
                        format!("MECH_CONNECTOR_POSITIONS_{}", end_suffix(end_name)),
                        Severity::Error,
                        Domain::Mechanical,
                        codes::CONNECTOR_POSITION_MISMATCH,
                        format!(
                            "Connector at {} has {} positions; the design needs {}.",
                            end_name, positions, expected
                        ),
                    )
                    .at(path),
                );
            }
        }
    }

    fn termination_type(assembly: &Assembly, out: &mut CheckOutput) {
        let ribbon = assembly.is_ribbon();
        for (end_name, endpoint) in &assembly.endpoints {
            let Some(termination) = non_empty(&endpoint.termination) else {
                continue;
            };
            let is_idc = termination == Self::RIBBON_TERMINATION;
            let message = if ribbon && !is_idc {
                format!(
                    "Ribbon cable needs IDC termination at {}, found {}.",
                    end_name, termination
                )
            } else if !ribbon && is_idc {
                format!(
                    "IDC termination at {} is only valid on ribbon cable.",
                    end_name
                )
            } else {
                continue;
            };
            out.finding(
                Finding::new(
                    format!("MECH_TERMINATION_{}", end_suffix(end_name)),
                    Severity::Error,
                    Domain::Mechanical,
                    codes::TERMINATION_TYPE,
                    message,
                )
                .at(format!("endpoints.{}.termination", end_name)),
            );
        }
    }

    /// An explicit minimum wins; otherwise ribbon pitch or OD drives it.
    fn recommended_bend_radius(ctx: &CheckContext<'_>) -> Option<f64> {
        let cable = &ctx.assembly.cable;
        if let Some(explicit) = non_zero(&cable.min_bend_radius_mm) {
            return Some(explicit);
        }
        if ctx.assembly.is_ribbon() {
            let pitch = ctx
                .assembly
                .conductors
                .ribbon
                .get()
                .and_then(|r| r.pitch_in.copied());
            let radius = ctx.tables.ribbon_bend_radius(pitch);
            if radius.is_none() {
                debug!(rule = codes::BEND_RADIUS_TOO_SMALL, "ribbon bend table missing; skipping");
            }
            return radius;
        }
        cable
            .od_mm
            .copied()
            .map(|od| round2(Self::OD_BEND_MULTIPLIER * od))
    }

    fn bend_radius(ctx: &CheckContext<'_>, out: &mut CheckOutput) {
        let cable = &ctx.assembly.cable;
        let Some(design) = cable.bend_radius_mm.copied() else {
            return;
        };
        let Some(recommended) = Self::recommended_bend_radius(ctx) else {
            return;
        };
        if design >= recommended {
            return;
        }

        let flex_class = cable
            .environment
            .get()
            .and_then(|env| env.flex_class.get())
            .map(String::as_str)
            .unwrap_or("static");
        let severity = if flex_class == "static" {
            Severity::Warning
        } else {
            Severity::Error
        };

        out.finding(
            Finding::new(
                "MECH_BEND_RADIUS",
                severity,
                Domain::Mechanical,
                codes::BEND_RADIUS_TOO_SMALL,
                format!(
                    "Bend radius {}mm is below the recommended {}mm for flex class '{}'.",
                    design, recommended, flex_class
                ),
            )
            .at("cable.bend_radius_mm"),
        );
    }

    fn clamp_ranges(assembly: &Assembly, out: &mut CheckOutput) {
        let Some(od) = assembly.cable.od_mm.copied() else {
            return;
        };

        for (end_name, endpoint) in &assembly.endpoints {
            let Some(accessories) = endpoint.accessories.get() else {
                continue;
            };
            for (index, accessory) in accessories.iter().enumerate() {
                let Some(clamp) = accessory.clamp.get() else {
                    continue;
                };
                let (Some(min), Some(max)) = (clamp.min_od_mm.copied(), clamp.max_od_mm.copied())
                else {
                    continue;
                };
                if (min..=max).contains(&od) {
                    continue;
                }

                let (delta, direction) = if od < min {
                    (min - od, "below")
                } else {
                    (od - max, "above")
                };
                // Absorb float noise such as 6.0 - 5.8 = 0.2000000000000002.
                let within_tolerance = delta <= Self::CLAMP_TOLERANCE_MM + 1e-9;
                let severity = if within_tolerance {
                    Severity::Warning
                } else {
                    Severity::Error
                };

                out.finding(
                    Finding::new(
                        format!("MECH_CLAMP_RANGE_{}_{}", end_suffix(end_name), index),
                        severity,
                        Domain::Mechanical,
                        codes::CLAMP_RANGE_MISMATCH,
                        format!(
                            "Clamp range [{}, {}]mm at {} sits {:.2}mm {} the cable OD {}mm.",
                            min, max, end_name, delta, direction, od
                        ),
                    )
                    .at(format!("endpoints.{}.accessories[{}].clamp", end_name, index)),
                );

                if within_tolerance {
                    out.fix(fixes::clamp_adjust(
                        &accessory.fix_key(end_name, index),
                        end_name,
                        index,
                    ));
                }
            }
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

impl Checker for MechanicalChecker {
    fn domain(&self) -> Domain {
        Domain::Mechanical
    }

    fn check(&self, ctx: &CheckContext<'_>) -> CheckOutput {
        let mut out = CheckOutput::default();
        Self::connector_positions(ctx.assembly, &mut out);
        Self::termination_type(ctx.assembly, &mut out);
        Self::bend_radius(ctx, &mut out);
        Self::clamp_ranges(ctx.assembly, &mut out);
        out
    }
}
