//! Fix identifiers and the fixes checkers offer.
//!
//! Ids are either a fixed name or a prefix followed by a subject: an endpoint
//! name (upper-cased) or a clamp accessory key.

use wirecheck_types::{Fix, FixEffect};

pub const LABEL_OFFSET_DEFAULT: &str = "FIX_LABEL_OFFSET_DEFAULT";
pub const CLAMP_ADJUST_PREFIX: &str = "FIX_CLAMP_ADJUST_";
pub const CONTACT_PLATING_PREFIX: &str = "FIX_CONTACT_PLATING_";
pub const ADD_HEAT_SHRINK_PREFIX: &str = "FIX_ADD_HEAT_SHRINK_";

/// Offset written by [`LABEL_OFFSET_DEFAULT`].
pub const LABEL_OFFSET_DEFAULT_MM: f64 = 30.0;

/// Half-width of the band a widened clamp keeps around the cable OD.
pub const CLAMP_MARGIN_MM: f64 = 0.05;

/// Plating written by the contact plating upgrade.
pub const UPGRADED_PLATING: &str = "gold-flash";

/// A parsed fix id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixId<'a> {
    LabelOffsetDefault,
    ClampAdjust(&'a str),
    ContactPlating(&'a str),
    AddHeatShrink(&'a str),
}

impl<'a> FixId<'a> {
    /// `None` for ids no fix recognizes.
    pub fn parse(id: &'a str) -> Option<Self> {
        if id == LABEL_OFFSET_DEFAULT {
            return Some(FixId::LabelOffsetDefault);
        }
        let subject = |prefix: &str| id.strip_prefix(prefix).filter(|rest| !rest.is_empty());
        if let Some(key) = subject(CLAMP_ADJUST_PREFIX) {
            return Some(FixId::ClampAdjust(key));
        }
        if let Some(end) = subject(CONTACT_PLATING_PREFIX) {
            return Some(FixId::ContactPlating(end));
        }
        if let Some(end) = subject(ADD_HEAT_SHRINK_PREFIX) {
            return Some(FixId::AddHeatShrink(end));
        }
        None
    }
}

/// Upper-cased endpoint name as used in finding and fix ids. Validation
/// rejects endpoint names that collide here.
pub fn end_suffix(end_name: &str) -> String {
    end_name.to_uppercase()
}

pub fn label_offset_default() -> Fix {
    Fix {
        id: LABEL_OFFSET_DEFAULT.to_string(),
        label: "Apply default label offset".to_string(),
        description: format!(
            "Set the label offset to {} mm from the connector datum.",
            LABEL_OFFSET_DEFAULT_MM
        ),
        applies_to: vec!["labels.offset_mm".to_string()],
        effect: FixEffect::NonDestructive,
    }
}

pub fn clamp_adjust(clamp_key: &str, end_name: &str, index: usize) -> Fix {
    Fix {
        id: format!("{}{}", CLAMP_ADJUST_PREFIX, clamp_key),
        label: "Match clamp to cable OD".to_string(),
        description: format!(
            "Use a clamp or insert whose range brackets the cable OD by {} mm on each side.",
            CLAMP_MARGIN_MM
        ),
        applies_to: vec![format!("endpoints.{}.accessories[{}]", end_name, index)],
        effect: FixEffect::Substitution,
    }
}

pub fn contact_plating(end_name: &str) -> Fix {
    Fix {
        id: format!("{}{}", CONTACT_PLATING_PREFIX, end_suffix(end_name)),
        label: "Upgrade contact plating".to_string(),
        description: format!(
            "Switch the primary contacts at {} to {} plating for low-level signals in a chemical environment.",
            end_name, UPGRADED_PLATING
        ),
        applies_to: vec![format!("endpoints.{}.contacts.primary.plating", end_name)],
        effect: FixEffect::Substitution,
    }
}

pub fn add_heat_shrink(end_name: &str) -> Fix {
    Fix {
        id: format!("{}{}", ADD_HEAT_SHRINK_PREFIX, end_suffix(end_name)),
        label: "Add heat-shrink".to_string(),
        description: format!(
            "Add an adhesive heat-shrink sleeve at {} for strain relief and insulation.",
            end_name
        ),
        applies_to: vec![format!("endpoints.{}", end_name)],
        effect: FixEffect::NonDestructive,
    }
}
