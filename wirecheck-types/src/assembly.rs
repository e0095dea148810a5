//! The assembly model: a cable design as produced by synthesis or supplied by a caller.
//!
//! Every section is a typed struct. Optional keys are [`Presence`] values so that a
//! missing key, an explicit `null` and a value stay distinguishable, and every struct
//! keeps unknown keys in `extra` so they survive a mutate/re-hash cycle untouched.

use crate::error::SchemaError;
use crate::presence::Presence;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assembly {
    pub assembly_id: String,

    /// Content digest of everything except this field.
    #[serde(default)]
    pub schema_hash: String,

    pub cable: CableSpec,
    pub conductors: ConductorSpec,
    pub endpoints: BTreeMap<String, EndpointSpec>,
    pub shield: ShieldSpec,
    pub wirelist: Vec<WireRow>,
    pub bom: Vec<BomLine>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub labels: Presence<Labels>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CableSpec {
    #[serde(rename = "type", default, skip_serializing_if = "Presence::is_absent")]
    pub cable_type: Presence<String>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub length_mm: Presence<f64>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub od_mm: Presence<f64>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub bend_radius_mm: Presence<f64>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub min_bend_radius_mm: Presence<f64>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub environment: Presence<Environment>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub electrical: Presence<ElectricalSpec>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub ratings: Presence<Ratings>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub emi: Presence<EmiSpec>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub locale: Presence<String>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub compliance: Presence<Compliance>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub temp_min_c: Presence<f64>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub temp_max_c: Presence<f64>,

    /// `static`, `flex` or `high_flex`.
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub flex_class: Presence<String>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub chemicals: Presence<Vec<String>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElectricalSpec {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub system_voltage_v: Presence<f64>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub per_circuit: Presence<Vec<CircuitLoad>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CircuitLoad {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub circuit: Presence<String>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub current_a: Presence<f64>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub voltage_v: Presence<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ratings {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub voltage_v: Presence<f64>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub temp_c: Presence<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmiSpec {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub shield: Presence<String>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub drain_policy: Presence<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Compliance {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub ipc_class: Presence<String>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub ul94_v0_labels: Presence<bool>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub rohs_reach: Presence<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConductorSpec {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub count: Presence<u32>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub awg: Presence<u32>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub ribbon: Presence<RibbonSpec>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RibbonSpec {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub ways: Presence<u32>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub pitch_in: Presence<f64>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub red_stripe: Presence<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointSpec {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub connector: Presence<ConnectorSpec>,

    /// `crimp`, `idc`, `ring_lug` or `solder`.
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub termination: Presence<String>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub contacts: Presence<Contacts>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub accessories: Presence<Vec<Accessory>>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub lugs: Presence<Vec<Lug>>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub requires_heat_shrink: Presence<bool>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub heat_shrink: Presence<bool>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub shield_termination: Presence<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectorSpec {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub mpn: Presence<String>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub positions: Presence<u32>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub pin1_indicator: Presence<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConnectorSpec {
    /// True when the connector object has no keys at all.
    pub fn is_empty(&self) -> bool {
        self.mpn.is_absent()
            && self.positions.is_absent()
            && self.pin1_indicator.is_absent()
            && self.extra.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contacts {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub primary: Presence<ContactSpec>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactSpec {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub mpn: Presence<String>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub plating: Presence<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Accessory {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub mpn: Presence<String>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub clamp: Presence<ClampRange>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Accessory {
    /// Identifier used in clamp fix ids: the MPN, or `<end>_<index>` without one.
    pub fn fix_key(&self, end_name: &str, index: usize) -> String {
        match self.mpn.get() {
            Some(mpn) if !mpn.is_empty() => mpn.clone(),
            _ => format!("{}_{}", end_name, index),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClampRange {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub min_od_mm: Presence<f64>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub max_od_mm: Presence<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lug {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub stud: Presence<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShieldSpec {
    /// `none`, `foil`, `braid` or `foil_braid`.
    #[serde(rename = "type", default, skip_serializing_if = "Presence::is_absent")]
    pub shield_type: Presence<String>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub drain_policy: Presence<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireRow {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub circuit: Presence<String>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub conductor: Presence<u32>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub color: Presence<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BomLine {
    #[serde(rename = "ref", default, skip_serializing_if = "Presence::is_absent")]
    pub part: Presence<PartRef>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub qty: Presence<u32>,

    /// `primary` or `alternate`.
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub role: Presence<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartRef {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub mpn: Presence<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Labels {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub title_block: Presence<TitleBlock>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub text: Presence<String>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub offset_mm: Presence<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Labels {
    /// True when the labels object has no keys at all (`{}`).
    pub fn is_empty(&self) -> bool {
        self.title_block.is_absent()
            && self.text.is_absent()
            && self.offset_mm.is_absent()
            && self.extra.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleBlock {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub pn: Presence<String>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub rev: Presence<String>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub mfr: Presence<String>,

    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub date: Presence<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Assembly {
    /// Decode and structurally validate an assembly document.
    pub fn from_json_str(s: &str) -> Result<Self, SchemaError> {
        let assembly: Assembly = serde_json::from_str(s)?;
        assembly.validate()?;
        Ok(assembly)
    }

    /// Decode and structurally validate an already-parsed JSON document.
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        let assembly: Assembly = serde_json::from_value(value)?;
        assembly.validate()?;
        Ok(assembly)
    }

    pub fn cable_type(&self) -> Option<&str> {
        self.cable.cable_type.get().map(String::as_str)
    }

    pub fn is_ribbon(&self) -> bool {
        self.cable_type() == Some("ribbon")
    }

    /// Structural checks that serde cannot express.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.assembly_id.trim().is_empty() {
            return Err(SchemaError::invalid("assembly_id", "must not be empty"));
        }

        non_negative("cable.length_mm", &self.cable.length_mm)?;
        non_negative("cable.od_mm", &self.cable.od_mm)?;
        non_negative("cable.bend_radius_mm", &self.cable.bend_radius_mm)?;
        non_negative("cable.min_bend_radius_mm", &self.cable.min_bend_radius_mm)?;

        // Finding and fix ids carry the upper-cased endpoint name.
        let mut folded = BTreeMap::new();
        for (end_name, endpoint) in &self.endpoints {
            if end_name.trim().is_empty() {
                return Err(SchemaError::invalid("endpoints", "endpoint name must not be empty"));
            }
            if let Some(other) = folded.insert(end_name.to_uppercase(), end_name) {
                return Err(SchemaError::invalid(
                    format!("endpoints.{}", end_name),
                    format!("endpoint name differs from {} only by letter case", other),
                ));
            }
            let Some(accessories) = endpoint.accessories.get() else {
                continue;
            };
            for (index, accessory) in accessories.iter().enumerate() {
                let Some(clamp) = accessory.clamp.get() else {
                    continue;
                };
                let path = format!("endpoints.{}.accessories[{}].clamp", end_name, index);
                if let (Some(min), Some(max)) = (clamp.min_od_mm.copied(), clamp.max_od_mm.copied())
                    && min > max
                {
                    return Err(SchemaError::invalid(
                        path,
                        format!("min_od_mm {} exceeds max_od_mm {}", min, max),
                    ));
                }
            }
        }

        for (index, wire) in self.wirelist.iter().enumerate() {
            if wire.conductor.copied() == Some(0) {
                return Err(SchemaError::invalid(
                    format!("wirelist[{}].conductor", index),
                    "conductor numbers start at 1",
                ));
            }
        }

        for (index, line) in self.bom.iter().enumerate() {
            if line.qty.copied() == Some(0) {
                return Err(SchemaError::invalid(
                    format!("bom[{}].qty", index),
                    "quantity must be at least 1",
                ));
            }
        }

        Ok(())
    }
}

fn non_negative(path: &str, value: &Presence<f64>) -> Result<(), SchemaError> {
    match value.copied() {
        Some(v) if !v.is_finite() || v < 0.0 => Err(SchemaError::invalid(
            path,
            format!("expected a non-negative number, got {}", v),
        )),
        _ => Ok(()),
    }
}
