//! Canonical finding codes.

pub const CONNECTOR_POSITION_MISMATCH: &str = "MECHANICAL/CONNECTOR_POSITION_MISMATCH";
pub const TERMINATION_TYPE: &str = "MECHANICAL/TERMINATION_TYPE";
pub const BEND_RADIUS_TOO_SMALL: &str = "MECHANICAL/BEND_RADIUS_TOO_SMALL";
pub const CLAMP_RANGE_MISMATCH: &str = "MECHANICAL/CLAMP_RANGE_MISMATCH";

pub const AMPACITY_MARGIN: &str = "ELECTRICAL/AMPACITY_MARGIN";
pub const VOLTAGE_RATING: &str = "ELECTRICAL/VOLTAGE_RATING";
pub const TEMPERATURE_RATING: &str = "ELECTRICAL/TEMPERATURE_RATING";
pub const SHIELD_TERMINATION_MISMATCH: &str = "ELECTRICAL/SHIELD_TERMINATION_MISMATCH";
pub const SHIELD_DRAIN_POLICY: &str = "ELECTRICAL/SHIELD_DRAIN_POLICY";
pub const CONTACT_PLATING: &str = "ELECTRICAL/CONTACT_PLATING";
pub const CONTACT_AWG_COMPATIBILITY: &str = "ELECTRICAL/CONTACT_AWG_COMPATIBILITY";

pub const IPC_CLASS: &str = "STANDARDS/IPC_CLASS";
pub const ROHS_REACH: &str = "STANDARDS/ROHS_REACH";
pub const UL94_V0: &str = "STANDARDS/UL94_V0";

pub const TITLE_BLOCK_MISSING: &str = "LABELING/TITLE_BLOCK_MISSING";
pub const TEXT_CONTENT: &str = "LABELING/TEXT_CONTENT";
pub const LABEL_OFFSET_MISSING: &str = "LABEL_OFFSET_MISSING";
pub const OFFSET_RANGE: &str = "LABELING/OFFSET_RANGE";

pub const RIBBON_RED_STRIPE: &str = "CONSISTENCY/RIBBON_RED_STRIPE";
pub const PIN1_INDICATOR: &str = "CONSISTENCY/PIN1_INDICATOR";
pub const LOCALE_COLOR: &str = "CONSISTENCY/LOCALE_COLOR";
pub const STUD_SIZE_MISSING: &str = "CONSISTENCY/STUD_SIZE_MISSING";
pub const HEAT_SHRINK: &str = "CONSISTENCY/HEAT_SHRINK";
