use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Recommended ribbon bend radius when the pitch is unknown or not listed.
pub const DEFAULT_RIBBON_BEND_RADIUS_MM: f64 = 10.0;

const PITCH_EPSILON: f64 = 1e-9;

/// Circuit name (`L`, `N`, `PE`) to the colors accepted for it.
pub type LocaleColors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BendStep {
    pub pitch_in: f64,
    pub radius_mm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoltageTempLimit {
    pub voltage_v: f64,
    pub temp_c: f64,
}

/// The four lookup tables a ruleset supplies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleTables {
    /// AWG to continuous ampacity in amperes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ampacity: Option<BTreeMap<u32, f64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ribbon_bend: Option<Vec<BendStep>>,

    /// AWG to insulation limits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage_temp: Option<BTreeMap<u32, VoltageTempLimit>>,

    /// Locale code (`EU`, `NA`, ...) to mains color conventions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale_ac_colors: Option<BTreeMap<String, LocaleColors>>,
}

impl RuleTables {
    /// Tables of the baseline ruleset.
    pub fn builtin() -> Self {
        let ampacity = [
            (30, 0.86),
            (28, 1.4),
            (26, 2.2),
            (24, 3.5),
            (22, 5.5),
            (20, 8.8),
            (18, 14.0),
            (16, 22.0),
            (14, 32.0),
            (12, 41.0),
            (10, 55.0),
        ]
        .into_iter()
        .collect();

        let ribbon_bend = vec![
            BendStep { pitch_in: 0.025, radius_mm: 5.0 },
            BendStep { pitch_in: 0.05, radius_mm: 7.5 },
            BendStep { pitch_in: 0.1, radius_mm: 12.5 },
        ];

        let voltage_temp = [30, 28, 26, 24, 22, 20, 18]
            .into_iter()
            .map(|awg| (awg, VoltageTempLimit { voltage_v: 300.0, temp_c: 80.0 }))
            .chain(
                [16, 14, 12, 10]
                    .into_iter()
                    .map(|awg| (awg, VoltageTempLimit { voltage_v: 600.0, temp_c: 90.0 })),
            )
            .collect();

        let eu: LocaleColors = [
            ("L", vec!["BROWN", "BLACK"]),
            ("N", vec!["BLUE"]),
            ("PE", vec!["GREEN/YELLOW", "GREEN-YELLOW", "GREEN/YEL"]),
        ]
        .into_iter()
        .map(|(circuit, colors)| {
            (
                circuit.to_string(),
                colors.into_iter().map(str::to_string).collect(),
            )
        })
        .collect();

        let mut locale_ac_colors = BTreeMap::new();
        locale_ac_colors.insert("EU".to_string(), eu);

        Self {
            ampacity: Some(ampacity),
            ribbon_bend: Some(ribbon_bend),
            voltage_temp: Some(voltage_temp),
            locale_ac_colors: Some(locale_ac_colors),
        }
    }

    pub fn has_ampacity(&self) -> bool {
        self.ampacity.as_ref().is_some_and(|t| !t.is_empty())
    }

    pub fn has_ribbon_bend(&self) -> bool {
        self.ribbon_bend.as_ref().is_some_and(|t| !t.is_empty())
    }

    pub fn has_voltage_temp(&self) -> bool {
        self.voltage_temp.as_ref().is_some_and(|t| !t.is_empty())
    }

    pub fn has_locale_colors(&self) -> bool {
        self.locale_ac_colors.as_ref().is_some_and(|t| !t.is_empty())
    }

    pub fn ampacity(&self, awg: u32) -> Option<f64> {
        self.ampacity.as_ref()?.get(&awg).copied()
    }

    /// Recommended ribbon bend radius for a pitch.
    ///
    /// `None` only when the table itself is missing. An unknown or unlisted
    /// pitch falls back to [`DEFAULT_RIBBON_BEND_RADIUS_MM`].
    pub fn ribbon_bend_radius(&self, pitch_in: Option<f64>) -> Option<f64> {
        if !self.has_ribbon_bend() {
            return None;
        }
        let steps = self.ribbon_bend.as_deref().unwrap_or_default();
        let radius = pitch_in
            .and_then(|pitch| {
                steps
                    .iter()
                    .find(|step| (step.pitch_in - pitch).abs() < PITCH_EPSILON)
            })
            .map(|step| step.radius_mm)
            .unwrap_or(DEFAULT_RIBBON_BEND_RADIUS_MM);
        Some(radius)
    }

    pub fn voltage_temp(&self, awg: u32) -> Option<VoltageTempLimit> {
        self.voltage_temp.as_ref()?.get(&awg).copied()
    }

    pub fn locale_colors(&self, locale: &str) -> Option<&LocaleColors> {
        self.locale_ac_colors.as_ref()?.get(locale)
    }
}
